//! Periodic best-effort save while any task is running.
//!
//! Bounds data loss on crash: a running session only reaches disk when
//! something saves, and no mutation happens while the user just lets the
//! stopwatch run.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::state::AppState;

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Handle for the autosave task.
/// - `request_shutdown()` stops the loop after the current tick.
/// - `shutdown_and_join()` waits for it to finish.
pub struct AutosaveHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl AutosaveHandle {
    pub fn spawn(state: Arc<AppState>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick fires immediately; skip it so the
            // loop only saves after a full period has passed.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        tick(&state);
                    }
                }
            }
        });

        Self { shutdown_tx, join }
    }

    /// Request shutdown. Does not interrupt a save already in progress.
    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}

fn tick(state: &AppState) {
    match state.any_running() {
        Ok(true) => {
            if let Err(e) = state.save_now() {
                tracing::warn!(error = %e, "autosave failed; will retry next tick");
            }
        }
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "autosave skipped"),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{DateTime, Local};
    use tempfile::TempDir;

    use crate::persist::DATA_FILE_NAME;
    use crate::ports::ManualClock;

    use super::*;

    fn state_in(dir: &TempDir) -> Arc<AppState> {
        let t0: DateTime<Local> = "2024-03-01T09:00:00+00:00".parse().unwrap();
        let clock = Arc::new(ManualClock::starting_at(t0));
        Arc::new(AppState::load(dir.path().join(DATA_FILE_NAME), clock).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn saves_periodically_while_a_task_runs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let state = state_in(&dir);

        state.add_task("A").unwrap();
        state.start_task("A").unwrap();
        // Remove the mutation-triggered save so only the loop can
        // recreate the file.
        fs::remove_file(&path).unwrap();

        let autosave = AutosaveHandle::spawn(Arc::clone(&state), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(50)).await;
        autosave.shutdown_and_join().await;

        assert!(path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_store_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let state = state_in(&dir);

        state.add_task("A").unwrap();
        fs::remove_file(&path).unwrap();

        let autosave = AutosaveHandle::spawn(Arc::clone(&state), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(50)).await;
        autosave.shutdown_and_join().await;

        // Nothing was running, so nothing saved.
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn shutdown_completes_promptly() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        let autosave = AutosaveHandle::spawn(state, Duration::from_secs(3600));
        autosave.shutdown_and_join().await;
    }
}
