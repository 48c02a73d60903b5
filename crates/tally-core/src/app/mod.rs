//! Application layer: lock-guarded state and the autosave loop.

mod autosave;
mod state;

pub use autosave::{AutosaveHandle, DEFAULT_AUTOSAVE_INTERVAL};
pub use state::AppState;
