/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, trace, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::dispatcher::PendingQueue;
use crate::elevator::Elevator;
use crate::error::{ConfigError, SubmitError};
use crate::shared::{Behaviour, Direction, ElevatorId, Request, RequestId, SystemStatus};

/**
 * Owns the whole simulation: the elevator bank and the pending queue.
 *
 * `tick` is the only way time moves. Callers (usually the clock) must invoke
 * it strictly one call at a time.
 *
 * # Fields
 * - `n_floors`:        Floors are numbered `1..=n_floors`.
 * - `elevators`:       The bank, in fixed enumeration order.
 * - `pending`:         Requests waiting to board.
 * - `next_request_id`: Id handed to the next accepted request.
 * - `tick`:            Number of ticks processed so far.
 * - `sweep_interval`:  Ticks between sweeps, 0 disables them.
 * - `default_weight`:  Weight used by `submit_default`.
 */
#[derive(Debug, Clone)]
pub struct Dispatcher {
    n_floors: u8,
    elevators: Vec<Elevator>,
    pending: PendingQueue,
    next_request_id: RequestId,
    tick: u64,
    sweep_interval: u64,
    default_weight: f64,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Result<Dispatcher, ConfigError> {
        config.validate()?;

        let n_floors = config.building.n_floors;
        let elevators = (0..config.elevator.count)
            .map(|id| Elevator::new(id, n_floors, &config.elevator))
            .collect();

        Ok(Dispatcher {
            n_floors,
            elevators,
            pending: PendingQueue::new(),
            next_request_id: 1,
            tick: 0,
            sweep_interval: config.simulation.sweep_interval,
            default_weight: config.simulation.default_weight,
        })
    }

    /***************************************/
    /*              Accessors              */
    /***************************************/
    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /***************************************/
    /*             Public API              */
    /***************************************/

    /// Validates and queues a ride. The request is queued whether or not an
    /// elevator could be targeted right away.
    pub fn submit_request(
        &mut self,
        origin: u8,
        dest: u8,
        weight: f64,
    ) -> Result<RequestId, SubmitError> {
        if let Err(e) = self.check_request(origin, dest, weight) {
            warn!("Rejected request {}->{} ({} kg): {}", origin, dest, weight, e);
            return Err(e);
        }

        let request = Request {
            id: self.next_request_id,
            origin,
            dest,
            weight,
        };
        self.next_request_id += 1;

        let claimed_by = self.assign(&request);
        info!(
            "Accepted request {} ({}, {} kg), targeted elevator {:?}",
            request.id, request, weight, claimed_by
        );

        let id = request.id;
        self.pending.push(request, claimed_by);
        Ok(id)
    }

    pub fn submit_default(&mut self, origin: u8, dest: u8) -> Result<RequestId, SubmitError> {
        self.submit_request(origin, dest, self.default_weight)
    }

    /// Advances the simulation by one tick and returns the resulting snapshot.
    pub fn tick(&mut self) -> SystemStatus {
        self.tick += 1;

        // Retry assignment for everything still waiting. Nothing leaves the queue here.
        for request in self.pending.requests() {
            if let Some(elevator) = self.assign(&request) {
                self.pending.claim(request.id, elevator);
            }
        }

        for elevator in self.elevators.iter_mut() {
            let report = elevator.step(&mut self.pending);
            if report.boarded > 0 || report.alighted > 0 {
                trace!(
                    "tick {}: elevator {} boarded {}, alighted {}",
                    self.tick,
                    elevator.id(),
                    report.boarded,
                    report.alighted
                );
            }
        }

        let status = self.status();

        if self.sweep_interval > 0 && self.tick % self.sweep_interval == 0 {
            self.sweep();
        }

        status
    }

    /// Read-only snapshot of every elevator and the pending queue.
    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            tick: self.tick,
            elevators: self.elevators.iter().map(Elevator::status).collect(),
            pending_count: self.pending.len(),
            pending_summary: self.pending.summary(),
        }
    }

    /***************************************/
    /*           Private helpers           */
    /***************************************/
    fn check_request(&self, origin: u8, dest: u8, weight: f64) -> Result<(), SubmitError> {
        for floor in [origin, dest] {
            if floor < 1 || floor > self.n_floors {
                return Err(SubmitError::FloorOutOfRange {
                    floor,
                    n_floors: self.n_floors,
                });
            }
        }
        if origin == dest {
            return Err(SubmitError::SameFloor(origin));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(SubmitError::InvalidWeight(weight));
        }
        Ok(())
    }

    /// Targets the best elevator for `request` at its origin floor.
    ///
    /// Only the target is added; the request itself is not reserved, so a later
    /// pass may target the same origin on a different car.
    fn assign(&mut self, request: &Request) -> Option<ElevatorId> {
        let winner = best_elevator(&self.elevators, request)?;
        let elevator = &mut self.elevators[winner];
        elevator.add_target(request.origin);
        debug!(
            "Request {} ({}) targeted elevator {} at floor {}",
            request.id,
            request,
            winner,
            elevator.floor()
        );
        Some(winner)
    }

    /// Reassigns every pending request and drops the ones an elevator was
    /// found for, even though they have not boarded.
    fn sweep(&mut self) {
        for request in self.pending.requests() {
            if let Some(elevator) = self.assign(&request) {
                self.pending.remove(request.id);
                warn!(
                    "Sweep at tick {} removed request {} ({}) after targeting elevator {}",
                    self.tick, request.id, request, elevator
                );
            }
        }
    }
}

/***************************************/
/*              Scoring                */
/***************************************/

/// Cost of sending `elevator` to pick up `request`, lower is better.
/// `None` when the elevator cannot take the request at all.
pub fn score(elevator: &Elevator, request: &Request) -> Option<i64> {
    if elevator.is_full() || request.weight + elevator.total_weight() > elevator.max_weight() {
        return None;
    }

    let floor = elevator.floor();
    let origin = request.origin;
    let mut score = 10 * i64::from(floor.abs_diff(origin));

    if floor == origin
        && matches!(
            elevator.behaviour(),
            Behaviour::Idle | Behaviour::DoorOpen | Behaviour::DoorClose
        )
    {
        score -= 1000;
    }

    match elevator.behaviour() {
        Behaviour::Moving => {
            let on_the_way = match (elevator.direction(), request.direction()) {
                (Direction::Up, Direction::Up) => floor <= origin,
                (Direction::Down, Direction::Down) => floor >= origin,
                _ => false,
            };
            if on_the_way {
                score -= 200;
            } else {
                score += 50;
            }
        }
        Behaviour::Idle => score -= 50,
        _ => {}
    }

    Some(score)
}

/// Lowest-scoring eligible elevator; the first one wins ties.
pub fn best_elevator(elevators: &[Elevator], request: &Request) -> Option<ElevatorId> {
    let mut best: Option<(ElevatorId, i64)> = None;
    for (index, elevator) in elevators.iter().enumerate() {
        if let Some(candidate) = score(elevator, request) {
            match best {
                Some((_, best_score)) if best_score <= candidate => {}
                _ => best = Some((index, candidate)),
            }
        }
    }
    best.map(|(index, _)| index)
}
