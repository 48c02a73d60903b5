//! Process-wide, lock-guarded owner of the task store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};

use crate::domain::{TaskView, TrackerError};
use crate::persist;
use crate::ports::Clock;
use crate::store::TaskStore;

/// Single-writer holder of the [`TaskStore`], shared between the UI
/// command handlers and the autosave loop.
///
/// Every mutation locks, applies the store operation, clones the store
/// out while still holding the lock, releases, and persists from the
/// clone. Disk latency never blocks the UI-visible transition, and no
/// lock is held across I/O.
///
/// A failed save does not roll back the in-memory mutation: the state in
/// memory stays authoritative and the next mutation or autosave tick
/// retries the write.
pub struct AppState {
    store: Mutex<TaskStore>,
    data_path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Load persisted tasks from `data_path`.
    ///
    /// A corrupt file is backed up beside itself and the store starts
    /// empty; the data stays on disk for forensic recovery.
    pub fn load(data_path: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, TrackerError> {
        let store = match persist::load(&data_path) {
            Ok(store) => store,
            Err(TrackerError::CorruptData(reason)) => {
                let backup = persist::backup_corrupt(&data_path)?;
                tracing::warn!(
                    %reason,
                    backup = %backup.display(),
                    "data file unreadable; preserved it and starting empty"
                );
                TaskStore::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            store: Mutex::new(store),
            data_path,
            clock,
        })
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// A poisoned lock means a prior panic mid-mutation; surface it
    /// instead of silently working with possibly half-applied state.
    fn lock(&self) -> Result<MutexGuard<'_, TaskStore>, TrackerError> {
        self.store.lock().map_err(|_| TrackerError::StateUnavailable)
    }

    fn mutate(
        &self,
        op: impl FnOnce(&mut TaskStore, DateTime<Local>) -> Result<(), TrackerError>,
    ) -> Result<(), TrackerError> {
        let now = self.clock.now();
        let copy = {
            let mut store = self.lock()?;
            op(&mut store, now)?;
            store.clone()
        };
        if let Err(e) = persist::save(&self.data_path, &copy) {
            tracing::warn!(error = %e, "save failed; in-memory state stays authoritative");
        }
        Ok(())
    }

    pub fn add_task(&self, name: &str) -> Result<(), TrackerError> {
        self.mutate(|store, now| store.add(name, now))
    }

    pub fn start_task(&self, name: &str) -> Result<(), TrackerError> {
        self.mutate(|store, now| store.start(name, now))
    }

    pub fn stop_task(&self, name: &str) -> Result<(), TrackerError> {
        self.mutate(|store, now| store.stop(name, now))
    }

    pub fn reset_task(&self, name: &str) -> Result<(), TrackerError> {
        self.mutate(|store, now| store.reset(name, now))
    }

    pub fn delete_task(&self, name: &str) -> Result<(), TrackerError> {
        self.mutate(|store, _now| store.delete(name))
    }

    /// Point-in-time snapshot for UI polling.
    pub fn get_tasks(&self) -> Result<Vec<TaskView>, TrackerError> {
        let now = self.clock.now();
        Ok(self.lock()?.snapshot(now))
    }

    /// Is any task currently accruing time? (Drives the autosave loop.)
    pub fn any_running(&self) -> Result<bool, TrackerError> {
        Ok(self.lock()?.any_running())
    }

    /// Write the plain-text export to `path`.
    pub fn export_tasks(&self, path: &Path) -> Result<(), TrackerError> {
        let now = self.clock.now();
        let copy = self.lock()?.clone();
        persist::export_to_txt(path, &copy, now)
    }

    /// Persist the current state, surfacing any write failure. Used by
    /// the autosave loop and the frontends' exit-time flush.
    pub fn save_now(&self) -> Result<(), TrackerError> {
        let copy = self.lock()?.clone();
        persist::save(&self.data_path, &copy)
    }
}
