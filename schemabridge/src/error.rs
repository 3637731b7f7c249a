//! Error types for the host side of the boundary.

use thiserror::Error;

/// Errors surfaced by schema compilation and validation queries.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Schema text is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    SchemaJson(String),

    /// Schema text parsed but was rejected by the engine's meta-schema check.
    #[error("schema rejected by engine: {0}")]
    SchemaRejected(String),

    /// Instance text is not valid JSON.
    #[error("instance is not valid JSON: {0}")]
    InstanceJson(String),

    /// Text cannot cross the boundary because it contains a NUL byte.
    #[error("{0} text contains an interior NUL byte")]
    InteriorNul(&'static str),

    /// Serialization of a typed value to JSON text failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The engine broke the boundary contract. Not retryable; indicates a
    /// programming error in the wrapper or the engine, not a data problem.
    #[error("boundary contract violation: {0}")]
    Boundary(String),
}

/// Result type for boundary operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;
