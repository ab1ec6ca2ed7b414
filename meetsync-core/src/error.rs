//! Error types for meetsync.

use thiserror::Error;

/// Errors that can occur in meetsync operations.
#[derive(Error, Debug)]
pub enum MeetSyncError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MeetSyncError {
    pub fn is_validation(&self) -> bool {
        matches!(self, MeetSyncError::Validation(_))
    }
}

/// Result type alias for meetsync operations.
pub type MeetSyncResult<T> = Result<T, MeetSyncError>;
