use thiserror::Error;

/// Every failure a command can surface. All variants are recoverable at
/// the UI boundary: frontends render the message and keep running.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("task name cannot be empty")]
    InvalidName,

    #[error("task '{0}' already exists")]
    DuplicateName(String),

    #[error("task '{0}' not found")]
    NotFound(String),

    #[error("data file is corrupt: {0}")]
    CorruptData(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to acquire state lock; remove the data file and restart")]
    StateUnavailable,
}
