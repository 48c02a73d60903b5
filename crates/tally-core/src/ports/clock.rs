//! Clock port: the wall clock behind a trait.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Provides the current time.
///
/// Store operations take `now` as a plain argument; this trait is the seam
/// the application layer uses to obtain it, so timing behavior stays
/// testable without real waiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Production clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually advanced clock for tests and deterministic harnesses.
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Local>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += chrono::TimeDelta::from_std(delta).expect("delta out of range");
    }

    /// Jump the clock to an absolute time (may move backward).
    pub fn set(&self, to: DateTime<Local>) {
        *self.now.lock().expect("clock lock poisoned") = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_by_the_given_delta() {
        let start: DateTime<Local> = "2024-03-01T09:00:00+00:00".parse().unwrap();
        let clock = ManualClock::starting_at(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(90));
        assert_eq!(clock.now(), start + chrono::TimeDelta::seconds(90));
    }
}
