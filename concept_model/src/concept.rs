//! Concept definitions - the nodes of the substrate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ConceptId, Connection, Relation, ValidationError, Weight};

/// A uniquely identified unit of knowledge.
///
/// `data` is carried as an opaque structured value; nothing in the substrate
/// inspects it. `connections` lists the outgoing edges in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,

    /// Free-form attributes describing the concept.
    pub data: Value,

    /// Outgoing edges, each with `source == id`.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Concept {
    /// Create a concept with no outgoing connections.
    pub fn new(id: ConceptId, data: Value) -> Result<Self, ValidationError> {
        if data.is_null() {
            return Err(ValidationError::NullData(id.to_string()));
        }
        Ok(Self {
            id,
            data,
            connections: Vec::new(),
        })
    }

    /// Add an outgoing connection with the default weight.
    pub fn with_connection(self, target: ConceptId, relation: Relation) -> Self {
        self.with_weighted_connection(target, relation, Weight::default())
    }

    /// Add an outgoing connection with an explicit weight.
    pub fn with_weighted_connection(
        mut self,
        target: ConceptId,
        relation: Relation,
        weight: Weight,
    ) -> Self {
        let conn = Connection::new(self.id.clone(), target, relation).with_weight(weight);
        self.connections.push(conn);
        self
    }

    /// Replace the connection list, checking every edge belongs to this concept.
    pub fn with_connections(
        mut self,
        connections: impl IntoIterator<Item = Connection>,
    ) -> Result<Self, ValidationError> {
        self.connections = connections.into_iter().collect();
        self.validate()?;
        Ok(self)
    }

    /// Check the invariants a store relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data.is_null() {
            return Err(ValidationError::NullData(self.id.to_string()));
        }
        if let Some(stray) = self.connections.iter().find(|c| c.source != self.id) {
            return Err(ValidationError::source_mismatch(
                self.id.as_str(),
                stray.source.as_str(),
            ));
        }
        Ok(())
    }

    /// Iterate over connections pointing at `target`, in insertion order.
    pub fn connections_to<'a, 'b>(
        &'a self,
        target: &'b str,
    ) -> impl Iterator<Item = &'a Connection> + 'b
    where
        'a: 'b,
    {
        self.connections.iter().filter(move |c| c.points_to(target))
    }

    /// Check if the concept has any outgoing connections.
    pub fn is_leaf(&self) -> bool {
        self.connections.is_empty()
    }
}

/// Untyped concept as received from a collaborator.
///
/// ```json
/// {"id": "UNE", "data": {"description": "The mind"},
///  "connections": [{"target": "DRS", "relation": "depends_on", "weight": 0.5}]}
/// ```
///
/// Connections are kept as raw JSON so that shape problems (a numeric
/// relation, a string weight) surface as [`ValidationError`]s rather than
/// opaque deserialization failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub id: String,

    #[serde(default)]
    pub data: Value,

    #[serde(default)]
    pub connections: Vec<Value>,
}

impl ConceptRecord {
    /// Read a record out of an arbitrary JSON value.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::malformed(e.to_string()))
    }

    /// Validate the record and convert it into a [`Concept`].
    pub fn into_concept(self) -> Result<Concept, ValidationError> {
        let id = ConceptId::new(self.id)?;
        let connections = self
            .connections
            .iter()
            .map(|raw| parse_connection(&id, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Concept::new(id, self.data)?.with_connections(connections)
    }
}

impl TryFrom<ConceptRecord> for Concept {
    type Error = ValidationError;

    fn try_from(record: ConceptRecord) -> Result<Self, Self::Error> {
        record.into_concept()
    }
}

fn parse_connection(owner: &ConceptId, raw: &Value) -> Result<Connection, ValidationError> {
    let fields = raw
        .as_object()
        .ok_or_else(|| ValidationError::malformed(format!("connection of '{owner}' is not an object")))?;

    let target = match fields.get("target") {
        Some(Value::String(s)) => ConceptId::new(s.as_str())?,
        Some(_) => return Err(ValidationError::malformed("connection target must be a string")),
        None => return Err(ValidationError::malformed("connection is missing 'target'")),
    };

    let relation = match fields.get("relation") {
        Some(Value::String(s)) => Relation::new(s.as_str())?,
        Some(_) => return Err(ValidationError::malformed("connection relation must be a string")),
        None => return Err(ValidationError::malformed("connection is missing 'relation'")),
    };

    let weight = match fields.get("weight") {
        None | Some(Value::Null) => Weight::default(),
        Some(Value::Number(n)) => {
            let value = n
                .as_f64()
                .ok_or_else(|| ValidationError::malformed("connection weight is not representable"))?;
            Weight::new(value)?
        }
        Some(_) => return Err(ValidationError::malformed("connection weight must be a number")),
    };

    // An explicit source is allowed but must agree with the owner.
    if let Some(source) = fields.get("source") {
        match source {
            Value::String(s) if s == owner.as_str() => {}
            Value::String(s) => return Err(ValidationError::source_mismatch(owner.as_str(), s.as_str())),
            _ => return Err(ValidationError::malformed("connection source must be a string")),
        }
    }

    Ok(Connection::new(owner.clone(), target, relation).with_weight(weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn id(s: &str) -> ConceptId {
        ConceptId::new(s).unwrap()
    }

    fn rel(s: &str) -> Relation {
        Relation::new(s).unwrap()
    }

    #[test]
    fn test_concept_builder() {
        let concept = Concept::new(id("UNE"), json!({"description": "The mind"}))
            .unwrap()
            .with_connection(id("DRS"), rel("depends_on"))
            .with_weighted_connection(id("Charter"), rel("governed_by"), Weight::new(2.0).unwrap());

        assert_eq!(concept.connections.len(), 2);
        assert!(concept.connections.iter().all(|c| c.source == concept.id));
        assert_eq!(concept.connections[1].weight.value(), 2.0);
        assert!(concept.validate().is_ok());
    }

    #[test]
    fn test_null_data_rejected() {
        let err = Concept::new(id("X"), Value::Null).unwrap_err();
        assert_eq!(err, ValidationError::NullData("X".to_string()));
    }

    #[test]
    fn test_empty_object_data_is_valid() {
        let concept = Concept::new(id("CONCEPT_A"), json!({})).unwrap();
        assert!(concept.is_leaf());
    }

    #[test]
    fn test_foreign_source_rejected() {
        let stray = Connection::parse("B", "C", "causes").unwrap();
        let err = Concept::new(id("A"), json!({}))
            .unwrap()
            .with_connections(vec![stray])
            .unwrap_err();

        assert_eq!(err, ValidationError::source_mismatch("A", "B"));
    }

    #[test]
    fn test_connections_to() {
        let concept = Concept::new(id("A"), json!({}))
            .unwrap()
            .with_connection(id("B"), rel("r1"))
            .with_connection(id("C"), rel("r2"))
            .with_connection(id("B"), rel("r3"));

        let labels: Vec<_> = concept.connections_to("B").map(|c| c.relation.as_str()).collect();
        assert_eq!(labels, vec!["r1", "r3"]);
    }

    #[test]
    fn test_connections_to_outlive_target() {
        let concept = Concept::new(id("A"), json!({}))
            .unwrap()
            .with_connection(id("B"), rel("r1"));

        let found: Vec<&Connection> = {
            let target = String::from("B");
            concept.connections_to(&target).collect()
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, id("B"));
    }

    #[test]
    fn test_record_into_concept() {
        let record = ConceptRecord::from_value(json!({
            "id": "UNE",
            "data": {"description": "The mind"},
            "connections": [
                {"target": "DRS", "relation": "depends_on"},
                {"target": "Charter", "relation": "governed_by", "weight": 0.5, "source": "UNE"}
            ]
        }))
        .unwrap();

        let concept = record.into_concept().unwrap();
        assert_eq!(concept.id.as_str(), "UNE");
        assert_eq!(concept.data["description"], "The mind");
        assert_eq!(concept.connections.len(), 2);
        assert_eq!(concept.connections[0].weight, Weight::UNIT);
        assert_eq!(concept.connections[1].weight.value(), 0.5);
    }

    #[test]
    fn test_record_rejects_bad_shapes() {
        let cases = vec![
            json!({"id": "A", "data": {}, "connections": [{"target": "B", "relation": 7}]}),
            json!({"id": "A", "data": {}, "connections": [{"target": "B", "relation": "r", "weight": "heavy"}]}),
            json!({"id": "A", "data": {}, "connections": [{"relation": "r"}]}),
            json!({"id": "A", "data": {}, "connections": ["B"]}),
        ];

        for case in cases {
            let result = ConceptRecord::from_value(case.clone()).and_then(ConceptRecord::into_concept);
            assert!(
                matches!(result, Err(ValidationError::MalformedRecord(_))),
                "expected malformed record for {}",
                case
            );
        }
    }

    #[test]
    fn test_record_rejects_negative_weight() {
        let record = ConceptRecord::from_value(json!({
            "id": "A",
            "data": {},
            "connections": [{"target": "B", "relation": "r", "weight": -0.5}]
        }))
        .unwrap();

        assert_eq!(record.into_concept(), Err(ValidationError::InvalidWeight(-0.5)));
    }

    #[test]
    fn test_record_rejects_missing_id_and_data() {
        let missing_id = ConceptRecord::from_value(json!({"data": {}}));
        assert!(matches!(missing_id, Err(ValidationError::MalformedRecord(_))));

        let missing_data = ConceptRecord::from_value(json!({"id": "A"}))
            .unwrap()
            .into_concept();
        assert_eq!(missing_data, Err(ValidationError::NullData("A".to_string())));

        let blank_id = ConceptRecord::from_value(json!({"id": " ", "data": {}}))
            .unwrap()
            .into_concept();
        assert_eq!(blank_id, Err(ValidationError::EmptyId));
    }

    #[test]
    fn test_record_source_mismatch() {
        let record = ConceptRecord::from_value(json!({
            "id": "A",
            "data": {},
            "connections": [{"source": "Z", "target": "B", "relation": "r"}]
        }))
        .unwrap();

        assert_eq!(
            record.into_concept(),
            Err(ValidationError::source_mismatch("A", "Z"))
        );
    }
}
