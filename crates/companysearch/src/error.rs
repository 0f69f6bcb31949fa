//! Error types for companysearch

use thiserror::Error;

/// Result type alias for companysearch operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Error types for query construction
#[derive(Debug, Error)]
pub enum SearchError {
    /// Validation error (pagination, identifiers, selected fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SearchError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
