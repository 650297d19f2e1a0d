pub mod dispatcher;
pub mod pending;

pub use dispatcher::Dispatcher;
pub use pending::PendingQueue;
pub use pending::PendingRequest;
