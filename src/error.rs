//! Error types for sat-anneal.

use thiserror::Error;

/// Errors reported at the boundary of the offending operation.
///
/// Nothing is silently corrected: a malformed instance or parameter is a
/// caller error, not a transient condition.
#[derive(Error, Debug)]
pub enum SatError {
    /// Malformed problem construction (literal out of range, zero literal,
    /// clauses without variables).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// Assignment length differs from the problem's variable count.
    #[error("dimension mismatch: expected {expected} variables, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Engine or orchestration parameter out of its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed DIMACS input.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SatError>;
