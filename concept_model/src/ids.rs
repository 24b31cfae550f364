//! Identifier types - concept keys and relation labels.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

use crate::ValidationError;

/// Unique identifier for a concept.
///
/// Ids are opaque to the substrate: any non-blank string is accepted and
/// compared byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConceptId(String);

impl ConceptId {
    /// Create a concept id, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConceptId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ConceptId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConceptId> for String {
    fn from(id: ConceptId) -> Self {
        id.0
    }
}

impl Borrow<str> for ConceptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ConceptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConceptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label describing the semantic nature of a connection (e.g. `depends_on`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Relation(String);

impl Relation {
    /// Create a relation label, rejecting blank input.
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ValidationError::EmptyRelation);
        }
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Relation {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Relation {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.0
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_id_creation() {
        let id = ConceptId::new("AI_Ethics").unwrap();
        assert_eq!(id.as_str(), "AI_Ethics");
        assert_eq!(id.to_string(), "AI_Ethics");
    }

    #[test]
    fn test_blank_ids_rejected() {
        assert_eq!(ConceptId::new(""), Err(ValidationError::EmptyId));
        assert_eq!(ConceptId::new("   "), Err(ValidationError::EmptyId));
        assert_eq!(Relation::new("\t"), Err(ValidationError::EmptyRelation));
    }

    #[test]
    fn test_concept_id_hash_lookup_by_str() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(ConceptId::new("UNE").unwrap(), 1);

        assert_eq!(map.get("UNE"), Some(&1));
        assert_eq!(map.get("DRS"), None);
    }

    #[test]
    fn test_serde_rejects_blank_id() {
        let ok: ConceptId = serde_json::from_str("\"DRS\"").unwrap();
        assert_eq!(ok.as_str(), "DRS");

        let err = serde_json::from_str::<ConceptId>("\"\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_relation_display() {
        let relation = Relation::new("depends_on").unwrap();
        assert_eq!(format!("{}", relation), "depends_on");
    }
}
