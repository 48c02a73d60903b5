//! Task: one tracked activity and its accumulated time.

use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A named unit of tracked work.
///
/// Design:
/// - This is the single source of truth for one task's timing state.
/// - All state transitions happen through methods; the store never pokes
///   fields directly.
/// - Invariant: `is_running == true` exactly when `session_start` is set.
///
/// `session_start` is an absolute timestamp (not a duration), so a task
/// persisted while running keeps accruing time transparently across a
/// restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub name: String,

    /// Total time across completed sessions. On the wire this is an
    /// integer `accumulated_seconds`.
    #[serde(rename = "accumulated_seconds", with = "duration_secs")]
    pub accumulated: Duration,

    pub is_running: bool,

    /// When the current running session began (set iff `is_running`).
    pub session_start: Option<DateTime<Local>>,

    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(name: String, now: DateTime<Local>) -> Self {
        Self {
            name,
            accumulated: Duration::ZERO,
            is_running: false,
            session_start: None,
            created_at: now,
        }
    }

    /// Begin a running session. No-op if already running (a second start
    /// must not overwrite `session_start` and perturb accounting).
    pub fn start(&mut self, now: DateTime<Local>) {
        if !self.is_running {
            self.session_start = Some(now);
            self.is_running = true;
        }
    }

    /// End the running session, folding its delta into `accumulated`.
    /// No-op if not running.
    pub fn stop(&mut self, now: DateTime<Local>) {
        if self.is_running {
            if let Some(start) = self.session_start.take() {
                self.accumulated += session_delta(start, now);
            }
            self.is_running = false;
        }
    }

    /// Zero the accumulated time. A running session is not stopped: its
    /// clock restarts from `now` and keeps running.
    pub fn reset(&mut self, now: DateTime<Local>) {
        self.accumulated = Duration::ZERO;
        if self.is_running {
            self.session_start = Some(now);
        }
    }

    /// Total elapsed time as of `now`: `accumulated`, plus the in-progress
    /// session delta while running. Never less than `accumulated`.
    pub fn elapsed(&self, now: DateTime<Local>) -> Duration {
        let mut total = self.accumulated;
        if self.is_running
            && let Some(start) = self.session_start
        {
            total += session_delta(start, now);
        }
        total
    }
}

/// Delta between a session start and `now`, clamped to zero if the system
/// clock moved backward.
fn session_delta(start: DateTime<Local>, now: DateTime<Local>) -> Duration {
    (now - start).to_std().unwrap_or(Duration::ZERO)
}

/// Render a duration as zero-padded `HH:MM:SS`. Hours are unbounded (no
/// day rollover).
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Duration <-> integer seconds on the wire.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
