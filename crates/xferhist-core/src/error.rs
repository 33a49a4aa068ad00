use thiserror::Error;

/// Core error types for action record handling
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid action record: {message}")]
    InvalidRecord { message: String },
}

impl CoreError {
    /// Create a new InvalidRecord error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
