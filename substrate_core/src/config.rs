//! Substrate configuration, loaded from TOML.
//!
//! ```toml
//! [search]
//! max_hops = 6
//! max_explored = 50000
//!
//! [relevance]
//! decay_rate = 0.5
//! max_depth = 3
//! ```
//!
//! Every field is optional; missing fields take their defaults. TOML has no
//! null, so `max_explored = 0` is how a file asks for an unbounded search.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::SearchLimits;
use crate::relevance::{RelevanceConfig, MAX_RELEVANCE_DEPTH};

/// Default exploration bound for path queries.
pub const DEFAULT_MAX_EXPLORED: usize = 100_000;

/// Top-level configuration for a concept store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SubstrateConfig {
    pub search: SearchConfig,
    pub relevance: RelevanceConfig,
}

/// Default bounds applied to path queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Longest path (in edges) a query will return. Unbounded when absent.
    pub max_hops: Option<usize>,

    /// Maximum number of concepts a single query may expand. `Some(0)` and
    /// `None` both mean unbounded.
    pub max_explored: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hops: None,
            max_explored: Some(DEFAULT_MAX_EXPLORED),
        }
    }
}

impl SearchConfig {
    /// Convert to the limits passed to the search.
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_hops: self.max_hops,
            max_explored: self.max_explored.filter(|&limit| limit > 0),
        }
    }
}

impl SubstrateConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded substrate configuration");
        Ok(config)
    }

    /// Check that all values are in range.
    pub fn validate(&self) -> Result<()> {
        let relevance = &self.relevance;
        if !(relevance.initial_energy.is_finite() && relevance.initial_energy > 0.0) {
            return Err(Error::config("relevance.initial_energy must be positive"));
        }
        if !(relevance.decay_rate > 0.0 && relevance.decay_rate <= 1.0) {
            return Err(Error::config("relevance.decay_rate must be in (0, 1]"));
        }
        if !(relevance.energy_threshold.is_finite() && relevance.energy_threshold > 0.0) {
            return Err(Error::config("relevance.energy_threshold must be positive"));
        }
        if relevance.max_depth > MAX_RELEVANCE_DEPTH {
            return Err(Error::config(format!(
                "relevance.max_depth must be at most {}",
                MAX_RELEVANCE_DEPTH
            )));
        }
        if relevance.max_results == 0 {
            return Err(Error::config("relevance.max_results must be at least 1"));
        }
        Ok(())
    }
}
