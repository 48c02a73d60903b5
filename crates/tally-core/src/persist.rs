//! Persistence gateway: one JSON data file, whole-store writes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{Task, TrackerError};
use crate::store::TaskStore;

pub const DATA_FILE_NAME: &str = "time_tracker_data.json";

/// Current data file schema. Files without a `version` field read as 1.
const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct DataFile {
    #[serde(default = "version_one")]
    version: u32,
    tasks: Vec<Task>,
}

fn version_one() -> u32 {
    1
}

/// Data file location: platform per-user config directory, falling back
/// to the current directory.
pub fn default_data_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_FILE_NAME)
}

/// Load the store from `path`.
///
/// An absent file is a first run and yields an empty store. Unparseable
/// content, a schema version from the future, or a task violating the
/// running/session invariant is `CorruptData`; the caller decides whether
/// to back the file up and start empty.
pub fn load(path: &Path) -> Result<TaskStore, TrackerError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no data file, starting empty");
        return Ok(TaskStore::new());
    }

    let raw = fs::read_to_string(path)?;
    let file: DataFile =
        serde_json::from_str(&raw).map_err(|e| TrackerError::CorruptData(e.to_string()))?;

    if file.version > SCHEMA_VERSION {
        return Err(TrackerError::CorruptData(format!(
            "unsupported schema version {}",
            file.version
        )));
    }
    for task in &file.tasks {
        if task.is_running != task.session_start.is_some() {
            return Err(TrackerError::CorruptData(format!(
                "task '{}' has inconsistent running state",
                task.name
            )));
        }
    }

    tracing::info!(path = %path.display(), count = file.tasks.len(), "loaded tasks");
    Ok(TaskStore::from_tasks(file.tasks))
}

/// Serialize the whole store to `path`, replacing prior contents.
///
/// The JSON goes to a temp file in the target's directory first and is
/// renamed over the target, so a concurrent reader on the same machine
/// never observes a partial write.
pub fn save(path: &Path, store: &TaskStore) -> Result<(), TrackerError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = DataFile {
        version: SCHEMA_VERSION,
        tasks: store.tasks().to_vec(),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| TrackerError::CorruptData(e.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Preserve an unreadable data file under a timestamped `.bak` sibling so
/// it stays available for forensic recovery. Returns the backup path.
pub fn backup_corrupt(path: &Path) -> Result<PathBuf, TrackerError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DATA_FILE_NAME);
    let backup = path.with_file_name(format!("{name}.bak-{}", Local::now().timestamp()));
    fs::rename(path, &backup)?;
    Ok(backup)
}

/// Write the plain-text export: a short header, then one line per task in
/// store order.
pub fn export_to_txt(
    path: &Path,
    store: &TaskStore,
    now: DateTime<Local>,
) -> Result<(), TrackerError> {
    let mut out = String::from("Time Tracker Export\n");
    out.push_str(&format!(
        "Generated on: {}\n\n",
        now.format("%Y-%m-%d %H:%M:%S")
    ));
    for line in store.export_lines(now) {
        out.push_str(&line);
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}
