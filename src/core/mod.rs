pub mod clock;
pub mod input;
pub mod services;

pub use clock::{Clock, FixedClock, SystemClock};
