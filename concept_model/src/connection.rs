//! Connection definitions - directed edges between concepts.

use serde::{Deserialize, Serialize};

use crate::{ConceptId, Relation, ValidationError};

/// Traversal cost of a connection.
///
/// Lower is cheaper. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Cost used when a connection does not specify one.
    pub const UNIT: Weight = Weight(1.0);

    /// Create a weight, rejecting negative or non-finite values.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidWeight(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::UNIT
    }
}

impl TryFrom<f64> for Weight {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed, typed, weighted relationship between two concepts.
///
/// Connections are owned by their source concept and have no identity of
/// their own. The target may name a concept that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: ConceptId,
    pub target: ConceptId,
    pub relation: Relation,
    #[serde(default)]
    pub weight: Weight,
}

impl Connection {
    /// Create a connection with the default unit weight.
    pub fn new(source: ConceptId, target: ConceptId, relation: Relation) -> Self {
        Self {
            source,
            target,
            relation,
            weight: Weight::default(),
        }
    }

    /// Parse a connection from raw strings.
    pub fn parse(source: &str, target: &str, relation: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(
            ConceptId::new(source)?,
            ConceptId::new(target)?,
            Relation::new(relation)?,
        ))
    }

    /// Set the traversal cost.
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Check whether this connection points at `target`.
    pub fn points_to(&self, target: &str) -> bool {
        self.target.as_str() == target
    }

    /// Check whether this connection is a self-loop.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -[{} ({})]-> {}",
            self.source, self.relation, self.weight, self.target
        )
    }
}
