//! Read-only task views for UI polling.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::task::{Task, format_hms};

/// Point-in-time view of one task, with elapsed time already resolved.
/// Serializable so any frontend can ship it over its own IPC unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub name: String,
    pub elapsed_seconds: u64,
    pub formatted_time: String,
    pub is_running: bool,
    pub created_at: String,
}

impl TaskView {
    pub fn of(task: &Task, now: DateTime<Local>) -> Self {
        let elapsed = task.elapsed(now);
        Self {
            name: task.name.clone(),
            elapsed_seconds: elapsed.as_secs(),
            formatted_time: format_hms(elapsed),
            is_running: task.is_running,
            created_at: task.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
