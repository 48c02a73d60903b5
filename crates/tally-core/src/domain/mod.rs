//! Domain model (task, views, errors).

pub mod errors;
pub mod snapshot;
pub mod task;

pub use errors::TrackerError;
pub use snapshot::TaskView;
pub use task::{Task, format_hms};
