/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, trace};
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::dispatcher::PendingQueue;
use crate::shared::{Behaviour, Direction, ElevatorId, ElevatorStatus, Request};

/***************************************/
/*             Constants               */
/***************************************/
pub const DOOR_DWELL_TICKS: u8 = 2;

/**
 * One car of the elevator bank, advanced one step per tick.
 *
 * The elevator owns its passengers and door timer. The dispatcher may only add
 * target floors through `add_target`; everything else changes inside `step`.
 *
 * # Fields
 * - `id`:              Position of the car in the bank, used for tie-breaking.
 * - `n_floors`:        Floors are numbered `1..=n_floors`.
 * - `floor`:           Current floor.
 * - `behaviour`:       Idle, moving, doors open or doors closing.
 * - `direction`:       Committed travel direction, `Stop` when unlocked.
 * - `passengers`:      Admitted requests still on board.
 * - `target_floors`:   Floors the car has committed to visit.
 * - `door_timer`:      Ticks left before the doors start closing.
 * - `max_people`:      Passenger count limit.
 * - `max_weight`:      Total passenger weight limit.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Elevator {
    id: ElevatorId,
    n_floors: u8,
    floor: u8,
    behaviour: Behaviour,
    direction: Direction,
    passengers: Vec<Request>,
    target_floors: BTreeSet<u8>,
    door_timer: u8,
    max_people: usize,
    max_weight: f64,
}

/// What happened at the doors during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub alighted: usize,
    pub boarded: usize,
}

impl Elevator {
    pub fn new(id: ElevatorId, n_floors: u8, config: &ElevatorConfig) -> Elevator {
        Elevator {
            id,
            n_floors,
            floor: config.start_floor.clamp(1, n_floors.max(1)),
            behaviour: Behaviour::Idle,
            direction: Direction::Stop,
            passengers: Vec::new(),
            target_floors: BTreeSet::new(),
            door_timer: 0,
            max_people: config.max_people,
            max_weight: config.max_weight,
        }
    }

    /***************************************/
    /*              Accessors              */
    /***************************************/
    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn passengers(&self) -> &[Request] {
        &self.passengers
    }

    pub fn target_floors(&self) -> &BTreeSet<u8> {
        &self.target_floors
    }

    pub fn door_timer(&self) -> u8 {
        self.door_timer
    }

    pub fn max_people(&self) -> usize {
        self.max_people
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn people_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.passengers.iter().fold(0.0, |acc, p| acc + p.weight)
    }

    pub fn is_full(&self) -> bool {
        self.people_count() >= self.max_people || self.total_weight() >= self.max_weight
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            floor: self.floor,
            behaviour: self.behaviour,
            direction: self.direction,
            people_count: self.people_count(),
            total_weight: self.total_weight(),
            targets: self.target_floors.iter().copied().collect(),
        }
    }

    /***************************************/
    /*             Public API              */
    /***************************************/

    /// Commits the car to visiting `floor`.
    ///
    /// Floors outside the building are ignored, as is the current floor while
    /// the doors are open or closing: that stop is already being served.
    pub fn add_target(&mut self, floor: u8) {
        if floor < 1 || floor > self.n_floors {
            return;
        }
        if floor == self.floor
            && matches!(self.behaviour, Behaviour::DoorOpen | Behaviour::DoorClose)
        {
            return;
        }

        self.target_floors.insert(floor);

        if self.behaviour == Behaviour::Idle {
            if floor == self.floor {
                self.target_floors.remove(&floor);
                self.open_door();
            } else {
                self.start_moving(Direction::between(self.floor, floor));
            }
        }
    }

    /// Advances the state machine by exactly one tick.
    pub fn step(&mut self, pending: &mut PendingQueue) -> StepReport {
        match self.behaviour {
            Behaviour::Idle => {
                self.head_for_nearest_target();
                StepReport::default()
            }
            Behaviour::Moving => {
                self.advance();
                StepReport::default()
            }
            Behaviour::DoorOpen => {
                let alighted = self.alight();
                let boarded = self.board(pending);
                self.door_timer = self.door_timer.saturating_sub(1);
                if self.door_timer == 0 {
                    self.set_behaviour(Behaviour::DoorClose);
                }
                if alighted > 0 || boarded > 0 {
                    trace!(
                        "elevator {} floor {}: {} off, {} on",
                        self.id,
                        self.floor,
                        alighted,
                        boarded
                    );
                }
                StepReport { alighted, boarded }
            }
            Behaviour::DoorClose => {
                self.head_for_nearest_target();
                StepReport::default()
            }
        }
    }

    /***************************************/
    /*           Private helpers           */
    /***************************************/
    fn advance(&mut self) {
        if self.target_floors.is_empty() {
            self.go_idle();
            return;
        }

        // Re-aim whenever nothing is left ahead; this also covers the car
        // trying to run past the top or bottom floor.
        if !self.has_target_ahead() {
            match self.nearest_target() {
                Some(target) if target == self.floor => {
                    self.target_floors.remove(&target);
                    self.open_door();
                    return;
                }
                Some(target) => self.direction = Direction::between(self.floor, target),
                None => {
                    self.go_idle();
                    return;
                }
            }
        }

        self.floor = match self.direction {
            Direction::Up => self.floor.saturating_add(1).min(self.n_floors),
            Direction::Down => self.floor.saturating_sub(1).max(1),
            Direction::Stop => self.floor,
        };

        if self.target_floors.remove(&self.floor) {
            self.open_door();
        }
    }

    /// Shared by Idle and DoorClose: pick the nearest target, or rest.
    fn head_for_nearest_target(&mut self) {
        match self.nearest_target() {
            Some(target) if target == self.floor => {
                self.target_floors.remove(&target);
                self.open_door();
            }
            Some(target) => self.start_moving(Direction::between(self.floor, target)),
            None => self.go_idle(),
        }
    }

    fn has_target_ahead(&self) -> bool {
        match self.direction {
            Direction::Up => self
                .target_floors
                .range((Excluded(self.floor), Unbounded))
                .next()
                .is_some(),
            Direction::Down => self.target_floors.range(..self.floor).next().is_some(),
            Direction::Stop => false,
        }
    }

    /// Closest target floor; equal distances go to the lower floor.
    fn nearest_target(&self) -> Option<u8> {
        self.target_floors
            .iter()
            .copied()
            .min_by_key(|&target| (target.abs_diff(self.floor), target))
    }

    fn alight(&mut self) -> usize {
        let floor = self.floor;
        let before = self.passengers.len();
        self.passengers.retain(|p| p.dest != floor);
        before - self.passengers.len()
    }

    fn board(&mut self, pending: &mut PendingQueue) -> usize {
        let floor = self.floor;
        let direction = self.direction;
        let max_people = self.max_people;
        let max_weight = self.max_weight;
        let mut people = self.people_count();
        let mut weight = self.total_weight();
        let mut has_targets = !self.target_floors.is_empty();

        let admitted = pending.take_admitted(|request| {
            if people >= max_people || weight >= max_weight {
                return false;
            }
            if request.origin != floor {
                return false;
            }
            let heading_ok =
                direction == Direction::Stop || request.direction() == direction || !has_targets;
            if !heading_ok {
                return false;
            }
            if people + 1 > max_people || weight + request.weight > max_weight {
                return false;
            }
            people += 1;
            weight += request.weight;
            has_targets = true;
            true
        });

        let boarded = admitted.len();
        for request in admitted {
            debug!("elevator {} boarded request {} ({})", self.id, request.id, request);
            self.target_floors.insert(request.dest);
            self.passengers.push(request);
        }
        boarded
    }

    /// The stop's own target must already be removed: boarding checks the
    /// direction set here, so it has to point at what is left to serve.
    fn open_door(&mut self) {
        if !self.has_target_ahead() {
            self.direction = match self.nearest_target() {
                Some(target) => Direction::between(self.floor, target),
                None => Direction::Stop,
            };
        }
        self.door_timer = DOOR_DWELL_TICKS;
        self.set_behaviour(Behaviour::DoorOpen);
    }

    fn start_moving(&mut self, direction: Direction) {
        self.direction = direction;
        self.set_behaviour(Behaviour::Moving);
    }

    fn go_idle(&mut self) {
        self.direction = Direction::Stop;
        self.set_behaviour(Behaviour::Idle);
    }

    fn set_behaviour(&mut self, behaviour: Behaviour) {
        if self.behaviour != behaviour {
            debug!(
                "elevator {} floor {}: {:?} -> {:?} ({:?})",
                self.id, self.floor, self.behaviour, behaviour, self.direction
            );
        }
        self.behaviour = behaviour;
    }
}

/***************************************/
/*           Test utilities            */
/***************************************/
#[cfg(test)]
impl Elevator {
    pub fn test_place_at(&mut self, floor: u8) {
        self.floor = floor;
    }

    pub fn test_set_motion(&mut self, behaviour: Behaviour, direction: Direction) {
        self.behaviour = behaviour;
        self.direction = direction;
    }

    pub fn test_insert_target(&mut self, floor: u8) {
        self.target_floors.insert(floor);
    }
}
