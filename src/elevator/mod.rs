pub mod fsm;

pub use fsm::Elevator;
pub use fsm::StepReport;
pub use fsm::DOOR_DWELL_TICKS;
