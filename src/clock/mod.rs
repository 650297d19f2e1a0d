pub mod clock;
mod clock_tests;

pub use clock::Clock;
pub use clock::ClockHandle;
