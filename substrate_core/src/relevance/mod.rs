//! Relevance ranking - finds the concepts most related to a set of seeds.
//!
//! The spreading activation algorithm works as follows:
//! 1. **Seed**: Give each known seed concept the initial energy
//! 2. **Spreading**: Each wave pushes energy along outgoing connections,
//!    scaled by the decay rate and the connection's affinity
//! 3. **Filtering**: Keep concepts whose accumulated energy clears the threshold
//! 4. **Selection**: Return the hottest non-seed concepts
//!
//! Affinity is `1 / (1 + weight)`: cheap connections carry more energy.

mod activation;

pub use activation::*;

use concept_model::{ConceptId, Weight};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::graph::ConceptGraph;

/// Deepest spread a validated configuration may request.
pub const MAX_RELEVANCE_DEPTH: u32 = 32;

/// Configuration for the spreading activation algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    /// Initial energy given to seed concepts.
    pub initial_energy: f32,

    /// Fraction of energy kept at each hop (0.0-1.0].
    pub decay_rate: f32,

    /// Maximum number of hops energy travels, capped at [`MAX_RELEVANCE_DEPTH`].
    pub max_depth: u32,

    /// Minimum energy for a concept to spread or be reported.
    pub energy_threshold: f32,

    /// Maximum number of concepts to return.
    pub max_results: usize,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            initial_energy: 1.0,
            decay_rate: 0.5,
            max_depth: 2,
            energy_threshold: 0.05,
            max_results: 20,
        }
    }
}

/// Ranks concepts by relevance to a set of seeds.
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    config: RelevanceConfig,
}

impl RelevanceRanker {
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RelevanceConfig {
        &self.config
    }

    /// Run spreading activation from the seeds.
    ///
    /// Unknown seeds are ignored. Energy never flows into concepts that are
    /// not stored.
    pub fn spread(&self, graph: &ConceptGraph, seeds: &[&str]) -> ActivationState {
        let mut state = ActivationState::new();
        let mut wave: HashMap<&ConceptId, f32> = HashMap::new();

        for seed in seeds {
            if let Some(concept) = graph.get(seed) {
                state.add_energy(concept.id.clone(), self.config.initial_energy);
                *wave.entry(&concept.id).or_default() += self.config.initial_energy;
            }
        }

        for _depth in 0..self.config.max_depth.min(MAX_RELEVANCE_DEPTH) {
            let mut next: HashMap<&ConceptId, f32> = HashMap::new();

            for (id, energy) in &wave {
                if *energy < self.config.energy_threshold {
                    continue;
                }
                for conn in graph.connections(id.as_str()) {
                    if !graph.contains(conn.target.as_str()) {
                        continue;
                    }
                    let spread = energy * affinity(conn.weight) * self.config.decay_rate;
                    *next.entry(&conn.target).or_default() += spread;
                }
            }

            if next.is_empty() {
                break;
            }
            for (id, energy) in &next {
                state.add_energy((*id).clone(), *energy);
            }
            wave = next;
        }

        state
    }

    /// Concepts most relevant to the seeds, hottest first.
    ///
    /// Seeds themselves are excluded from the result.
    pub fn rank(&self, graph: &ConceptGraph, seeds: &[&str]) -> Vec<(ConceptId, f32)> {
        let state = self.spread(graph, seeds);
        let seeds: HashSet<&str> = seeds.iter().copied().collect();

        state
            .hot_concepts(self.config.energy_threshold)
            .into_iter()
            .filter(|(id, _)| !seeds.contains(id.as_str()))
            .take(self.config.max_results)
            .map(|(id, energy)| (id.clone(), energy))
            .collect()
    }
}

fn affinity(weight: Weight) -> f32 {
    (1.0 / (1.0 + weight.value())) as f32
}
