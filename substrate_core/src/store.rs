//! Shared concept store - the handle collaborators hold.
//!
//! Wraps a [`ConceptGraph`] in `Arc<RwLock<_>>`: any number of readers may
//! query at once, and each upsert takes the write lock only for the
//! duration of the insert. Cloning the store clones the handle, not the data.

use concept_model::{Concept, ConceptId, ConceptRecord, Connection};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use crate::config::SubstrateConfig;
use crate::error::{PathError, Result};
use crate::graph::{ConceptGraph, ConceptPath, SearchLimits};
use crate::relevance::RelevanceRanker;

/// Thread-safe handle to a concept graph.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    graph: Arc<RwLock<ConceptGraph>>,
    limits: SearchLimits,
    ranker: RelevanceRanker,
}

impl ConceptStore {
    /// Create an empty store with unbounded search and default relevance settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store using the given configuration.
    pub fn with_config(config: &SubstrateConfig) -> Self {
        Self {
            graph: Arc::default(),
            limits: config.search.limits(),
            ranker: RelevanceRanker::new(config.relevance.clone()),
        }
    }

    /// Limits applied by [`find_path`](Self::find_path).
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Store a concept, replacing any existing one with the same id.
    ///
    /// `connections` overwrites the previous list entirely. Every connection
    /// must have `source == id`. Returns the replaced concept, if any.
    pub fn upsert(
        &self,
        id: &str,
        data: Value,
        connections: Vec<Connection>,
    ) -> Result<Option<Concept>> {
        let concept = Concept::new(ConceptId::new(id)?, data)?.with_connections(connections)?;
        self.upsert_concept(concept)
    }

    /// Store an already-built concept.
    pub fn upsert_concept(&self, concept: Concept) -> Result<Option<Concept>> {
        concept.validate()?;
        Ok(self.graph.write().upsert(concept)?)
    }

    /// Validate and store an untyped record.
    pub fn upsert_record(&self, record: ConceptRecord) -> Result<Option<Concept>> {
        self.upsert_concept(record.into_concept()?)
    }

    /// Get a copy of a stored concept.
    pub fn get(&self, id: &str) -> Option<Concept> {
        self.graph.read().get(id).cloned()
    }

    /// Check if a concept exists.
    pub fn contains(&self, id: &str) -> bool {
        self.graph.read().contains(id)
    }

    /// Get the total number of concepts.
    pub fn len(&self) -> usize {
        self.graph.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.read().is_empty()
    }

    /// Remove a concept and its outgoing connections.
    pub fn remove(&self, id: &str) -> Option<Concept> {
        self.graph.write().remove(id)
    }

    /// Connections from other concepts that point at `id`.
    pub fn incoming(&self, id: &str) -> Vec<Connection> {
        self.graph.read().incoming(id).into_iter().cloned().collect()
    }

    /// Concepts within `max_hops` of `id`, nearest first.
    pub fn reachable_within(&self, id: &str, max_hops: usize) -> Vec<(ConceptId, usize)> {
        self.graph.read().reachable_within(id, max_hops)
    }

    /// Find a path using the store's configured limits.
    pub fn find_path(&self, from: &str, to: &str) -> std::result::Result<ConceptPath, PathError> {
        self.find_path_with(from, to, &self.limits)
    }

    /// Find a path using caller-supplied limits.
    pub fn find_path_with(
        &self,
        from: &str,
        to: &str,
        limits: &SearchLimits,
    ) -> std::result::Result<ConceptPath, PathError> {
        self.graph.read().find_path_with(from, to, limits)
    }

    /// Concepts most relevant to the seeds, hottest first.
    pub fn rank_relevant(&self, seeds: &[&str]) -> Vec<(ConceptId, f32)> {
        self.ranker.rank(&*self.graph.read(), seeds)
    }

    /// Run a closure against the graph under a single read lock.
    ///
    /// Use this when several queries must see the same snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&ConceptGraph) -> R) -> R {
        f(&*self.graph.read())
    }

    /// Copy the current graph out of the store.
    pub fn snapshot(&self) -> ConceptGraph {
        self.graph.read().clone()
    }
}
