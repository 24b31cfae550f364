//! # Substrate Core
//!
//! The in-memory concept substrate: a directed graph of concepts joined by
//! weighted, typed connections, answering "how are these two ideas
//! connected?" and "what else is relevant here?".
//!
//! ## Core Components
//!
//! - **graph**: `ConceptGraph` storage and weighted multi-hop path search
//! - **store**: `ConceptStore`, the shared multi-reader / single-writer handle
//! - **relevance**: Ranks related concepts using spreading activation
//! - **config**: TOML-backed search bounds and relevance settings
//!
//! ## Example
//!
//! ```rust
//! use concept_model::Connection;
//! use serde_json::json;
//! use substrate_core::ConceptStore;
//!
//! let store = ConceptStore::new();
//! let edge = Connection::parse("UNE", "DRS", "depends_on").unwrap();
//! store.upsert("UNE", json!({"description": "The mind"}), vec![edge]).unwrap();
//! store.upsert("DRS", json!({"description": "The memory"}), vec![]).unwrap();
//!
//! let path = store.find_path("UNE", "DRS").unwrap();
//! assert_eq!(path.to_sequence(), vec!["UNE", "depends_on", "DRS"]);
//! assert!(store.find_path("DRS", "UNE").unwrap_err().is_not_found());
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod relevance;
pub mod store;

pub use config::*;
pub use error::{Error, PathError, Result};
pub use graph::*;
pub use relevance::*;
pub use store::*;
