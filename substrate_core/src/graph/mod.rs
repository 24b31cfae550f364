//! Concept Graph - the core data structure of the substrate.
//!
//! The graph consists of:
//! - **Concepts**: Nodes keyed by [`ConceptId`], carrying an opaque payload
//! - **Connections**: Directed, weighted edges owned by their source concept
//! - **Incoming index**: Target -> sources, for reverse lookups
//!
//! Edges may point at concepts that have not been stored yet. Such edges are
//! kept but ignored by traversal until the target appears.

mod path;
mod proptest;

pub use path::*;

use concept_model::{Concept, ConceptId, Connection, ValidationError};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing::debug;

use crate::error::PathError;

/// The main concept graph structure.
///
/// Not synchronized; share it through [`ConceptStore`](crate::ConceptStore).
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    /// All concepts stored by ID, each owning its outgoing connections.
    concepts: HashMap<ConceptId, Concept>,

    /// Index: target -> concepts holding at least one edge to it.
    incoming: HashMap<ConceptId, BTreeSet<ConceptId>>,
}

impl ConceptGraph {
    /// Create a new empty concept graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a concept, replacing any existing concept with the same id.
    ///
    /// Replacement is total: the previous data and connection list are
    /// dropped, not merged. Returns the displaced concept.
    pub fn upsert(&mut self, concept: Concept) -> Result<Option<Concept>, ValidationError> {
        concept.validate()?;

        let previous = self.concepts.remove(&concept.id);
        if let Some(old) = &previous {
            self.unindex(old);
            debug!(
                concept = %old.id,
                dropped_connections = old.connections.len(),
                new_connections = concept.connections.len(),
                "replacing existing concept"
            );
        } else {
            debug!(
                concept = %concept.id,
                connections = concept.connections.len(),
                "storing new concept"
            );
        }

        self.index(&concept);
        self.concepts.insert(concept.id.clone(), concept);
        Ok(previous)
    }

    /// Remove a concept and its outgoing connections.
    ///
    /// Edges held by other concepts that point at it are left in place and
    /// become dangling until the id is stored again.
    pub fn remove(&mut self, id: &str) -> Option<Concept> {
        let concept = self.concepts.remove(id)?;
        self.unindex(&concept);
        debug!(concept = %concept.id, "removed concept");
        Some(concept)
    }

    /// Get a concept by ID.
    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.concepts.get(id)
    }

    /// Check if a concept exists in the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.concepts.contains_key(id)
    }

    /// Get the total number of concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Get all stored concept ids.
    pub fn concept_ids(&self) -> impl Iterator<Item = &ConceptId> {
        self.concepts.keys()
    }

    /// Get all stored concepts.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Get the outgoing connections of a concept, in insertion order.
    pub fn connections(&self, id: &str) -> &[Connection] {
        self.concepts
            .get(id)
            .map(|c| c.connections.as_slice())
            .unwrap_or(&[])
    }

    /// Get every stored connection that targets `id`, grouped by source id.
    pub fn incoming(&self, id: &str) -> Vec<&Connection> {
        self.incoming
            .get(id)
            .map(|sources| {
                sources
                    .iter()
                    .filter_map(|source| self.concepts.get(source))
                    .flat_map(|concept| concept.connections_to(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concepts reachable from `id` in at most `max_hops` edges, nearest first.
    ///
    /// Breadth-first; each concept is reported once with its hop distance.
    /// The start concept and absent targets are excluded.
    pub fn reachable_within(&self, id: &str, max_hops: usize) -> Vec<(ConceptId, usize)> {
        let Some(start) = self.concepts.get(id) else {
            return Vec::new();
        };

        let mut seen: HashSet<&str> = HashSet::from([start.id.as_str()]);
        let mut queue: VecDeque<(&Concept, usize)> = VecDeque::from([(start, 0)]);
        let mut reached = Vec::new();

        while let Some((concept, hops)) = queue.pop_front() {
            if hops >= max_hops {
                continue;
            }
            for conn in &concept.connections {
                let Some(next) = self.concepts.get(conn.target.as_str()) else {
                    continue;
                };
                if seen.insert(next.id.as_str()) {
                    reached.push((next.id.clone(), hops + 1));
                    queue.push_back((next, hops + 1));
                }
            }
        }

        reached
    }

    /// Find a path between two concepts with no search bounds.
    pub fn find_path(&self, from: &str, to: &str) -> Result<ConceptPath, PathError> {
        self.find_path_with(from, to, &SearchLimits::unbounded())
    }

    /// Find a path between two concepts.
    ///
    /// A direct edge wins outright (cheapest first, then earliest inserted).
    /// Otherwise the lowest total weight path is returned, preferring fewer
    /// hops and then earlier discovery when costs tie.
    pub fn find_path_with(
        &self,
        from: &str,
        to: &str,
        limits: &SearchLimits,
    ) -> Result<ConceptPath, PathError> {
        let outcome = path::search(self, from, to, limits);
        match &outcome {
            Ok(found) => debug!(from, to, hops = found.hops(), cost = found.total_weight(), "path found"),
            Err(reason) => debug!(from, to, %reason, "no path"),
        }
        outcome
    }

    fn index(&mut self, concept: &Concept) {
        for conn in &concept.connections {
            self.incoming
                .entry(conn.target.clone())
                .or_default()
                .insert(concept.id.clone());
        }
    }

    fn unindex(&mut self, concept: &Concept) {
        for conn in &concept.connections {
            if let Some(sources) = self.incoming.get_mut(conn.target.as_str()) {
                sources.remove(concept.id.as_str());
                if sources.is_empty() {
                    self.incoming.remove(conn.target.as_str());
                }
            }
        }
    }
}
