//! Error types for substrate_core.

use concept_model::ValidationError;
use thiserror::Error;

/// Result type alias using substrate_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by store operations and configuration loading.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected at the boundary; the store was not modified.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A path query produced no path.
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Configuration values are out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for the expected schema.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Why a path query returned no path.
///
/// None of these are fatal: a missing concept or an unreachable target is
/// the normal state of a substrate that is still being filled in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// One of the endpoints has never been stored.
    #[error("concept '{0}' is not in the store")]
    UnknownConcept(String),

    /// Both endpoints exist but no directed path connects them.
    #[error("no path from '{from}' to '{to}'")]
    NoPath { from: String, to: String },

    /// The search hit its exploration bound before reaching the target.
    #[error("search stopped after expanding {explored} concepts (limit {limit})")]
    ResourceExceeded { limit: usize, explored: usize },
}

impl PathError {
    /// Create a no-path error.
    pub fn no_path(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::NoPath {
            from: from.into(),
            to: to.into(),
        }
    }

    /// True when the query definitively found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownConcept(_) | Self::NoPath { .. })
    }

    /// True when the search was cut short by a bound rather than exhausted.
    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self, Self::ResourceExceeded { .. })
    }
}
