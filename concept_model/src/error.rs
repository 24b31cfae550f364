//! Validation errors raised at the model boundary.

use thiserror::Error;

/// Reasons an insert is rejected before it can touch a store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Concept id was empty or whitespace.
    #[error("concept id must not be empty")]
    EmptyId,

    /// Relation label was empty or whitespace.
    #[error("relation label must not be empty")]
    EmptyRelation,

    /// Weight was negative, NaN or infinite.
    #[error("invalid connection weight {0}: must be finite and non-negative")]
    InvalidWeight(f64),

    /// Concept payload was `null`.
    #[error("concept '{0}' has null data")]
    NullData(String),

    /// A connection was filed under a concept other than its source.
    #[error("connection source '{found}' does not match owning concept '{expected}'")]
    SourceMismatch { expected: String, found: String },

    /// An untyped record had the wrong shape.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl ValidationError {
    /// Create a malformed record error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord(message.into())
    }

    /// Create a source mismatch error.
    pub fn source_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::SourceMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
