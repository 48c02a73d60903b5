//! In-memory task collection and its mutation logic.

use chrono::{DateTime, Local};

use crate::domain::{Task, TaskView, TrackerError};

/// Ordered collection of tasks, insertion order preserved (it determines
/// display and export order).
///
/// Design:
/// - Single source of truth for all task mutations; nothing outside this
///   type touches a `Task` directly.
/// - No locking here: the application layer serializes access.
/// - Operations take `now` explicitly so timing is deterministic under
///   test.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted tasks (order preserved).
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Is any task currently accruing time?
    pub fn any_running(&self) -> bool {
        self.tasks.iter().any(|t| t.is_running)
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Task, TrackerError> {
        self.tasks
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))
    }

    /// Append a new task. The name is trimmed; an empty trimmed name is
    /// `InvalidName`, an exact (case-sensitive) collision is
    /// `DuplicateName`.
    pub fn add(&mut self, name: &str, now: DateTime<Local>) -> Result<(), TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::InvalidName);
        }
        if self.tasks.iter().any(|t| t.name == name) {
            return Err(TrackerError::DuplicateName(name.to_string()));
        }
        self.tasks.push(Task::new(name.to_string(), now));
        Ok(())
    }

    /// Begin a session. No-op if the task is already running.
    pub fn start(&mut self, name: &str, now: DateTime<Local>) -> Result<(), TrackerError> {
        self.find_mut(name)?.start(now);
        Ok(())
    }

    /// End a session, folding its delta into the accumulated time. No-op
    /// if the task is not running.
    pub fn stop(&mut self, name: &str, now: DateTime<Local>) -> Result<(), TrackerError> {
        self.find_mut(name)?.stop(now);
        Ok(())
    }

    /// Zero the accumulated time; a running session restarts from `now`
    /// and keeps running.
    pub fn reset(&mut self, name: &str, now: DateTime<Local>) -> Result<(), TrackerError> {
        self.find_mut(name)?.reset(now);
        Ok(())
    }

    /// Remove a task permanently and immediately (confirmation is a UI
    /// concern).
    pub fn delete(&mut self, name: &str) -> Result<(), TrackerError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))?;
        self.tasks.remove(pos);
        Ok(())
    }

    /// Read-only views of all tasks, elapsed time resolved at `now`.
    pub fn snapshot(&self, now: DateTime<Local>) -> Vec<TaskView> {
        self.tasks.iter().map(|t| TaskView::of(t, now)).collect()
    }

    /// One export line per task in store order. The lines iterate over a
    /// snapshot taken at call time: a single finite pass, unaffected by
    /// later mutations.
    pub fn export_lines(&self, now: DateTime<Local>) -> impl Iterator<Item = String> {
        self.snapshot(now).into_iter().map(|view| {
            let status = if view.is_running { "running" } else { "stopped" };
            format!(
                "{}  {}  {}  created {}",
                view.name, view.formatted_time, status, view.created_at
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeDelta;

    use super::*;

    fn t0() -> DateTime<Local> {
        "2024-03-01T09:00:00+00:00"
            .parse::<DateTime<Local>>()
            .unwrap()
    }

    #[test]
    fn add_trims_and_rejects_empty_names() {
        let mut store = TaskStore::new();
        assert!(matches!(
            store.add("   ", t0()),
            Err(TrackerError::InvalidName)
        ));
        store.add("  Write report  ", t0()).unwrap();
        assert_eq!(store.tasks()[0].name, "Write report");
    }

    #[test]
    fn duplicate_add_fails_and_leaves_store_unchanged() {
        let mut store = TaskStore::new();
        store.add("Task A", t0()).unwrap();
        let err = store.add("Task A", t0()).unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateName(ref n) if n == "Task A"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let mut store = TaskStore::new();
        store.add("Task A", t0()).unwrap();
        store.add("task a", t0()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(matches!(
            store.start("TASK A", t0()),
            Err(TrackerError::NotFound(_))
        ));
    }

    #[test]
    fn elapsed_after_stops_is_the_sum_of_sessions() {
        let mut store = TaskStore::new();
        store.add("Task A", t0()).unwrap();

        store.start("Task A", t0()).unwrap();
        store.stop("Task A", t0() + TimeDelta::seconds(3)).unwrap();

        store.start("Task A", t0() + TimeDelta::seconds(10)).unwrap();
        store.stop("Task A", t0() + TimeDelta::seconds(14)).unwrap();

        assert_eq!(store.tasks()[0].accumulated, Duration::from_secs(7));
    }

    #[test]
    fn stopping_a_stopped_task_is_a_no_op() {
        let mut store = TaskStore::new();
        store.add("Task A", t0()).unwrap();
        store.stop("Task A", t0() + TimeDelta::seconds(5)).unwrap();
        assert_eq!(store.tasks()[0].accumulated, Duration::ZERO);
    }

    #[test]
    fn delete_missing_task_leaves_store_unchanged() {
        let mut store = TaskStore::new();
        store.add("Task A", t0()).unwrap();
        assert!(matches!(
            store.delete("Task B"),
            Err(TrackerError::NotFound(ref n)) if n == "Task B"
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_preserves_insertion_order_and_resolves_elapsed() {
        let mut store = TaskStore::new();
        store.add("B", t0()).unwrap();
        store.add("A", t0()).unwrap();
        store.start("A", t0()).unwrap();

        let views = store.snapshot(t0() + TimeDelta::seconds(61));
        assert_eq!(views[0].name, "B");
        assert_eq!(views[1].name, "A");
        assert_eq!(views[1].elapsed_seconds, 61);
        assert_eq!(views[1].formatted_time, "00:01:01");
        assert!(views[1].is_running);
    }

    #[test]
    fn export_lines_are_one_per_task_in_store_order() {
        let mut store = TaskStore::new();
        store.add("Task A", t0()).unwrap();
        store.add("Task B", t0()).unwrap();
        store.start("Task B", t0()).unwrap();

        let lines: Vec<String> = store.export_lines(t0() + TimeDelta::seconds(90)).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Task A  00:00:00  stopped  created "));
        assert!(lines[1].starts_with("Task B  00:01:30  running  created "));
    }

    #[test]
    fn full_task_lifecycle() {
        let mut store = TaskStore::new();
        store.add("Write report", t0()).unwrap();

        store.start("Write report", t0()).unwrap();
        store
            .stop("Write report", t0() + TimeDelta::seconds(2))
            .unwrap();
        let task = &store.tasks()[0];
        assert_eq!(task.accumulated, Duration::from_secs(2));
        assert!(!task.is_running);

        store
            .reset("Write report", t0() + TimeDelta::seconds(2))
            .unwrap();
        assert_eq!(store.tasks()[0].accumulated, Duration::ZERO);

        store.delete("Write report").unwrap();
        assert!(store.is_empty());
    }
}
