//! # Concept Model
//!
//! Plain data types for the concept substrate: identifiers, relation labels,
//! edge weights, concepts and their outgoing connections. This crate holds no
//! graph logic; it is the single place where input is validated before it can
//! reach a store.
//!
//! ## Core Types
//!
//! - **ConceptId** / **Relation**: non-empty opaque string keys
//! - **Weight**: finite, non-negative traversal cost (defaults to `1.0`)
//! - **Connection**: a directed, typed, weighted edge owned by its source
//! - **Concept**: an id, an uninterpreted payload, and its outgoing edges
//! - **ConceptRecord**: the untyped form collaborators hand over as JSON

pub mod concept;
pub mod connection;
pub mod error;
pub mod ids;

pub use concept::*;
pub use connection::*;
pub use error::*;
pub use ids::*;
