//! Tick-driven simulation of a bank of elevators: request dispatching,
//! per-car state machines and a clock that drives them.

/* Modules */
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod elevator;
pub mod error;
pub mod shared;

pub use clock::{Clock, ClockHandle};
pub use config::{load_config, Config};
pub use dispatcher::{Dispatcher, PendingQueue};
pub use elevator::Elevator;
pub use error::{ConfigError, SubmitError};
pub use shared::{Behaviour, Direction, ElevatorStatus, Request, SystemStatus};
