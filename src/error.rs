//! Error types for the Mobilia library.
//!
//! All fallible operations in the crate return [`Result`], which wraps
//! [`MobiliaError`]. Note that per the engine's contract most query-path
//! operations are infallible: a malformed query or an empty catalog is a
//! valid (empty) result, not an error. Errors are reserved for misuse of
//! the API and for collaborator failures (e.g. a preference store that
//! cannot be read), and even those are absorbed at the call site where
//! graceful degradation is required.

use anyhow;
use thiserror::Error;

/// The main error type for Mobilia operations.
#[derive(Error, Debug)]
pub enum MobiliaError {
    /// Index-related errors (building, publishing).
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, folding).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (parsing, invalid options).
    #[error("Query error: {0}")]
    Query(String),

    /// Preference-store errors. These never abort a search; the scorer
    /// treats them as "no boost available".
    #[error("Preference error: {0}")]
    Preference(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with MobiliaError.
pub type Result<T> = std::result::Result<T, MobiliaError>;

impl MobiliaError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        MobiliaError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MobiliaError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        MobiliaError::Query(msg.into())
    }

    /// Create a new preference-store error.
    pub fn preference<S: Into<String>>(msg: S) -> Self {
        MobiliaError::Preference(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MobiliaError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = MobiliaError::index("posting merge failed");
        assert_eq!(error.to_string(), "Index error: posting merge failed");

        let error = MobiliaError::query("limit must be positive");
        assert_eq!(error.to_string(), "Query error: limit must be positive");

        let error = MobiliaError::preference("store offline");
        assert_eq!(error.to_string(), "Preference error: store offline");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<u64>("not a number").unwrap_err();
        let error = MobiliaError::from(json_error);

        match error {
            MobiliaError::Json(_) => {}
            _ => panic!("Expected JSON error variant"),
        }
    }
}
