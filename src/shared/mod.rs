pub mod macros;
pub mod structs;

pub use structs::Behaviour;
pub use structs::Direction;
pub use structs::ElevatorId;
pub use structs::ElevatorStatus;
pub use structs::Request;
pub use structs::RequestId;
pub use structs::SystemStatus;
