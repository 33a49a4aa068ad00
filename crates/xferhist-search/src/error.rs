use thiserror::Error;

/// Validation failures raised while compiling a request.
///
/// All of them fail fast, before the search backend is contacted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid skip parameter")]
    InvalidSkip,
    #[error("invalid limit parameter")]
    InvalidLimit,
    #[error("invalid sort direction")]
    InvalidSortDirection,
    #[error("failed to parse track param")]
    InvalidTrack,
    #[error("invalid boolean for {name}")]
    InvalidFlag { name: String },
}

impl QueryError {
    pub fn invalid_flag(name: impl Into<String>) -> Self {
        Self::InvalidFlag { name: name.into() }
    }

    /// Name of the offending query parameter.
    pub fn parameter(&self) -> &str {
        match self {
            Self::InvalidSkip => "skip",
            Self::InvalidLimit => "limit",
            Self::InvalidSortDirection => "sort",
            Self::InvalidTrack => "track",
            Self::InvalidFlag { name } => name,
        }
    }
}
