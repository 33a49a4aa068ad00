//! Error types for the search backend and chain RPC collaborators.
//!
//! None of these are retried; a failing collaborator aborts the request.

use std::fmt;

use xferhist_core::CoreError;

/// Errors that can occur while talking to a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to reach the backend at all.
    #[error("Connection error: {message}")]
    ConnectionError {
        /// Description of the connection error.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    BackendError {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The backend answered, but the payload is not what we expect.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Description of what was wrong with the payload.
        message: String,
    },

    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `ConnectionError` error.
    #[must_use]
    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
        }
    }

    /// Creates a new `BackendError` error.
    #[must_use]
    pub fn backend_error(status: u16, message: impl Into<String>) -> Self {
        Self::BackendError {
            status,
            message: message.into(),
        }
    }

    /// Creates a new `MalformedResponse` error.
    #[must_use]
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConnectionError { .. } => ErrorCategory::Infrastructure,
            Self::BackendError { .. } => ErrorCategory::Upstream,
            Self::MalformedResponse { .. } => ErrorCategory::Upstream,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<CoreError> for StorageError {
    fn from(err: CoreError) -> Self {
        Self::malformed_response(err.to_string())
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Infrastructure/connection error.
    Infrastructure,
    /// The collaborator answered with an error or garbage.
    Upstream,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Upstream => write!(f, "upstream"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::connection_error("refused");
        assert_eq!(err.to_string(), "Connection error: refused");

        let err = StorageError::backend_error(503, "unavailable");
        assert_eq!(err.to_string(), "Backend error (503): unavailable");
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            StorageError::connection_error("x").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(
            StorageError::backend_error(500, "x").category(),
            ErrorCategory::Upstream
        );
        assert_eq!(
            StorageError::malformed_response("x").category(),
            ErrorCategory::Upstream
        );
        assert_eq!(StorageError::internal("x").category().to_string(), "internal");
    }

    #[test]
    fn core_errors_become_malformed_responses() {
        let err: StorageError = CoreError::invalid_record("missing act").into();
        assert!(matches!(err, StorageError::MalformedResponse { .. }));
    }
}
