//! Abstraction seams between the core and its environment.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
