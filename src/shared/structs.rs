/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type RequestId = u64;
pub type ElevatorId = usize;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "doorOpen")]
    DoorOpen,
    #[serde(rename = "doorClose")]
    DoorClose,
}

/// Travel direction. `Stop` is the unlocked state: the cab has no committed
/// direction and accepts passengers going either way.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    /// Direction of travel from `from` to `to`, `Stop` when they are equal.
    pub fn between(from: u8, to: u8) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Stop
        }
    }
}

/**
 * A passenger's ride from `origin` to `dest`.
 *
 * Built by the dispatcher after validation, so `origin != dest` and both floors
 * lie inside the building.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    pub id: RequestId,
    pub origin: u8,
    pub dest: u8,
    pub weight: f64,
}

impl Request {
    pub fn direction(&self) -> Direction {
        if self.dest > self.origin {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.dest)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorStatus {
    pub id: ElevatorId,
    pub floor: u8,
    pub behaviour: Behaviour,
    pub direction: Direction,
    #[serde(rename = "peopleCount")]
    pub people_count: usize,
    #[serde(rename = "totalWeight")]
    pub total_weight: f64,
    pub targets: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SystemStatus {
    pub tick: u64,
    pub elevators: Vec<ElevatorStatus>,
    #[serde(rename = "pendingCount")]
    pub pending_count: usize,
    #[serde(rename = "pendingSummary")]
    pub pending_summary: Vec<String>,
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}:", self.tick)?;
        for e in &self.elevators {
            write!(
                f,
                " [#{} floor {} {:?}/{:?} {}p {:.1}kg targets {:?}]",
                e.id, e.floor, e.behaviour, e.direction, e.people_count, e.total_weight, e.targets
            )?;
        }
        write!(f, " pending {} {:?}", self.pending_count, self.pending_summary)
    }
}
