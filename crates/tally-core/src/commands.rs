//! UI command surface.
//!
//! One function per command a frontend can issue, 1:1 with [`AppState`]
//! operations. Errors come back as user-readable strings so any UI can
//! show them in a transient notification without knowing the error enum.

use std::path::Path;

use crate::app::AppState;
use crate::domain::TaskView;

pub fn get_tasks(state: &AppState) -> Result<Vec<TaskView>, String> {
    state.get_tasks().map_err(|e| e.to_string())
}

pub fn add_task(state: &AppState, name: &str) -> Result<(), String> {
    state.add_task(name).map_err(|e| e.to_string())
}

pub fn start_task(state: &AppState, name: &str) -> Result<(), String> {
    state.start_task(name).map_err(|e| e.to_string())
}

pub fn stop_task(state: &AppState, name: &str) -> Result<(), String> {
    state.stop_task(name).map_err(|e| e.to_string())
}

pub fn reset_task(state: &AppState, name: &str) -> Result<(), String> {
    state.reset_task(name).map_err(|e| e.to_string())
}

pub fn delete_task(state: &AppState, name: &str) -> Result<(), String> {
    state.delete_task(name).map_err(|e| e.to_string())
}

pub fn export_tasks(state: &AppState, path: &str) -> Result<(), String> {
    state.export_tasks(Path::new(path)).map_err(|e| e.to_string())
}
