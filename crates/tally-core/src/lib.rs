//! tally-core
//!
//! UI-agnostic core of the Tally time tracker.
//!
//! # Module layout
//! - **domain**: the task model, read-only views, and the error enum
//! - **store**: the ordered in-memory task collection and all mutation logic
//! - **persist**: JSON-file gateway (atomic saves, corrupt-file backup, text export)
//! - **ports**: abstraction seams (the wall clock)
//! - **app**: lock-guarded application state and the periodic autosave loop
//! - **commands**: the string-error surface frontends consume
//!
//! Frontends (a CLI in this workspace; a GUI is just another consumer)
//! hold an `Arc<AppState>`, issue commands, and poll snapshots. They never
//! touch the store directly.

pub mod app;
pub mod commands;
pub mod domain;
pub mod persist;
pub mod ports;
pub mod store;

pub use app::{AppState, AutosaveHandle, DEFAULT_AUTOSAVE_INTERVAL};
pub use domain::{Task, TaskView, TrackerError};
pub use ports::{Clock, ManualClock, SystemClock};
pub use store::TaskStore;
