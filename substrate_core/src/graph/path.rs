//! Path search over the concept graph.

use concept_model::{Concept, ConceptId, Connection, Relation, Weight};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::warn;

use super::ConceptGraph;
use crate::error::PathError;

/// Bounds applied to a single path query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Longest path, in edges, the query may return.
    pub max_hops: Option<usize>,

    /// Maximum number of concepts the query may expand.
    pub max_explored: Option<usize>,
}

impl SearchLimits {
    /// No bounds; the search is limited only by the reachable graph.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Set the maximum path length.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    /// Set the maximum number of expanded concepts.
    pub fn with_max_explored(mut self, max_explored: usize) -> Self {
        self.max_explored = Some(max_explored);
        self
    }
}

/// One edge taken along a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub relation: Relation,
    pub concept: ConceptId,
    pub weight: Weight,
}

impl From<&Connection> for PathStep {
    fn from(conn: &Connection) -> Self {
        Self {
            relation: conn.relation.clone(),
            concept: conn.target.clone(),
            weight: conn.weight,
        }
    }
}

/// An ordered path from one concept to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptPath {
    start: ConceptId,
    steps: Vec<PathStep>,
}

impl ConceptPath {
    /// The single-node path from a concept to itself.
    pub fn trivial(start: ConceptId) -> Self {
        Self {
            start,
            steps: Vec::new(),
        }
    }

    pub fn start(&self) -> &ConceptId {
        &self.start
    }

    /// The last concept on the path.
    pub fn end(&self) -> &ConceptId {
        self.steps.last().map(|s| &s.concept).unwrap_or(&self.start)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.steps.len()
    }

    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of edge weights along the path.
    pub fn total_weight(&self) -> f64 {
        self.steps.iter().map(|s| s.weight.value()).sum()
    }

    /// Concepts visited, start to end.
    pub fn concepts(&self) -> Vec<&ConceptId> {
        std::iter::once(&self.start)
            .chain(self.steps.iter().map(|s| &s.concept))
            .collect()
    }

    /// Flatten to the alternating `[id, relation, id, ...]` sequence.
    pub fn to_sequence(&self) -> Vec<String> {
        let mut sequence = Vec::with_capacity(1 + self.steps.len() * 2);
        sequence.push(self.start.to_string());
        for step in &self.steps {
            sequence.push(step.relation.to_string());
            sequence.push(step.concept.to_string());
        }
        sequence
    }
}

impl std::fmt::Display for ConceptPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)?;
        for step in &self.steps {
            write!(f, " -[{}]-> {}", step.relation, step.concept)?;
        }
        Ok(())
    }
}

/// A discovered way of reaching a concept, kept in an arena for backtracking.
struct Frame<'g> {
    concept: &'g Concept,
    parent: Option<(usize, &'g Connection)>,
}

/// Heap entry. Ordered so the heap pops the cheapest, then shortest, then
/// earliest-discovered entry first.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    hops: usize,
    slot: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.hops.cmp(&self.hops))
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

pub(super) fn search(
    graph: &ConceptGraph,
    from: &str,
    to: &str,
    limits: &SearchLimits,
) -> Result<ConceptPath, PathError> {
    let start = graph
        .get(from)
        .ok_or_else(|| PathError::UnknownConcept(from.to_string()))?;
    if !graph.contains(to) {
        return Err(PathError::UnknownConcept(to.to_string()));
    }

    if from == to {
        return Ok(ConceptPath::trivial(start.id.clone()));
    }
    if limits.max_hops == Some(0) {
        return Err(PathError::no_path(from, to));
    }

    if let Some(edge) = cheapest_direct(start, to) {
        return Ok(ConceptPath {
            start: start.id.clone(),
            steps: vec![PathStep::from(edge)],
        });
    }

    uniform_cost(graph, start, to, limits)
}

fn cheapest_direct<'g>(concept: &'g Concept, target: &str) -> Option<&'g Connection> {
    concept
        .connections_to(target)
        .fold(None::<&'g Connection>, |best, conn| match best {
            Some(b) if b.weight <= conn.weight => Some(b),
            _ => Some(conn),
        })
}

/// Dijkstra over (concept, hops) states.
///
/// Without a hop bound each concept is settled once. With a hop bound a
/// concept may be settled again when reached in strictly fewer hops, since a
/// cheaper but longer route can run out of hops before reaching the target.
fn uniform_cost<'g>(
    graph: &'g ConceptGraph,
    start: &'g Concept,
    to: &str,
    limits: &SearchLimits,
) -> Result<ConceptPath, PathError> {
    let mut arena: Vec<Frame<'g>> = vec![Frame {
        concept: start,
        parent: None,
    }];
    let mut frontier = BinaryHeap::from([Frontier {
        cost: 0.0,
        hops: 0,
        slot: 0,
    }]);
    let mut settled: HashMap<&'g str, usize> = HashMap::new();
    let mut explored = 0usize;

    let dominated = |settled: &HashMap<&'g str, usize>, id: &str, hops: usize| {
        settled
            .get(id)
            .is_some_and(|&best| limits.max_hops.is_none() || best <= hops)
    };

    while let Some(Frontier { cost, hops, slot }) = frontier.pop() {
        let concept = arena[slot].concept;
        if dominated(&settled, concept.id.as_str(), hops) {
            continue;
        }
        settled.insert(concept.id.as_str(), hops);

        if concept.id.as_str() == to {
            return Ok(backtrack(&arena, slot));
        }

        if let Some(limit) = limits.max_explored {
            if explored >= limit {
                warn!(
                    from = %start.id,
                    to,
                    limit,
                    "path search exceeded exploration bound"
                );
                return Err(PathError::ResourceExceeded { limit, explored });
            }
        }
        explored += 1;

        if limits.max_hops.is_some_and(|max| hops >= max) {
            continue;
        }

        for conn in &concept.connections {
            let Some(next) = graph.get(conn.target.as_str()) else {
                continue;
            };
            if dominated(&settled, next.id.as_str(), hops + 1) {
                continue;
            }
            arena.push(Frame {
                concept: next,
                parent: Some((slot, conn)),
            });
            frontier.push(Frontier {
                cost: cost + conn.weight.value(),
                hops: hops + 1,
                slot: arena.len() - 1,
            });
        }
    }

    Err(PathError::no_path(start.id.as_str(), to))
}

fn backtrack(arena: &[Frame<'_>], mut slot: usize) -> ConceptPath {
    let mut steps = Vec::new();
    while let Some((parent, conn)) = arena[slot].parent {
        steps.push(PathStep::from(conn));
        slot = parent;
    }
    steps.reverse();

    ConceptPath {
        start: arena[slot].concept.id.clone(),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn step(relation: &str, concept: &str, weight: f64) -> PathStep {
        PathStep {
            relation: Relation::new(relation).unwrap(),
            concept: ConceptId::new(concept).unwrap(),
            weight: Weight::new(weight).unwrap(),
        }
    }

    fn sample_path() -> ConceptPath {
        ConceptPath {
            start: ConceptId::new("A").unwrap(),
            steps: vec![step("causes", "B", 1.5), step("enables", "C", 2.0)],
        }
    }

    #[test]
    fn test_path_accessors() {
        let path = sample_path();

        assert_eq!(path.start().as_str(), "A");
        assert_eq!(path.end().as_str(), "C");
        assert_eq!(path.hops(), 2);
        assert!(!path.is_trivial());
        assert!((path.total_weight() - 3.5).abs() < 1e-9);

        let visited: Vec<_> = path.concepts().iter().map(|c| c.as_str()).collect();
        assert_eq!(visited, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_path_sequence_and_display() {
        let path = sample_path();

        assert_eq!(path.to_sequence(), vec!["A", "causes", "B", "enables", "C"]);
        assert_eq!(path.to_string(), "A -[causes]-> B -[enables]-> C");
    }

    #[test]
    fn test_trivial_path() {
        let path = ConceptPath::trivial(ConceptId::new("A").unwrap());

        assert_eq!(path.end().as_str(), "A");
        assert_eq!(path.hops(), 0);
        assert_eq!(path.total_weight(), 0.0);
        assert_eq!(path.to_sequence(), vec!["A"]);
    }

    #[test]
    fn test_frontier_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(Frontier { cost: 2.0, hops: 1, slot: 0 });
        heap.push(Frontier { cost: 1.0, hops: 3, slot: 1 });
        heap.push(Frontier { cost: 1.0, hops: 2, slot: 3 });
        heap.push(Frontier { cost: 1.0, hops: 2, slot: 2 });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|f| f.slot).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_limits_builder() {
        let limits = SearchLimits::unbounded()
            .with_max_hops(3)
            .with_max_explored(100);

        assert_eq!(limits.max_hops, Some(3));
        assert_eq!(limits.max_explored, Some(100));
        assert_eq!(SearchLimits::unbounded(), SearchLimits::default());
    }
}
