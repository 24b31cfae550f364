//! Activation state for the spreading activation algorithm.

use concept_model::ConceptId;
use std::collections::HashMap;

/// Tracks activation energy for concepts during spreading.
#[derive(Debug, Clone, Default)]
pub struct ActivationState {
    energies: HashMap<ConceptId, f32>,
}

impl ActivationState {
    /// Create a new empty activation state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add energy to a concept (accumulates with existing energy).
    pub fn add_energy(&mut self, id: ConceptId, energy: f32) {
        *self.energies.entry(id).or_insert(0.0) += energy;
    }

    /// Get the energy of a concept.
    pub fn get_energy(&self, id: &str) -> f32 {
        self.energies.get(id).copied().unwrap_or(0.0)
    }

    /// Check if a concept has any energy.
    pub fn is_active(&self, id: &str) -> bool {
        self.get_energy(id) > 0.0
    }

    /// Concepts at or above the threshold, hottest first, ties by id.
    pub fn hot_concepts(&self, threshold: f32) -> Vec<(&ConceptId, f32)> {
        let mut hot: Vec<_> = self
            .energies
            .iter()
            .filter(|(_, energy)| **energy >= threshold)
            .map(|(id, energy)| (id, *energy))
            .collect();

        hot.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        hot
    }

    /// Get the total energy in the system.
    pub fn total_energy(&self) -> f32 {
        self.energies.values().sum()
    }

    /// Get the number of active concepts.
    pub fn active_count(&self) -> usize {
        self.energies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ConceptId {
        ConceptId::new(s).unwrap()
    }

    #[test]
    fn test_energy_accumulation() {
        let mut state = ActivationState::new();

        state.add_energy(id("Test"), 0.3);
        state.add_energy(id("Test"), 0.4);

        assert!((state.get_energy("Test") - 0.7).abs() < 0.001);
        assert!(state.is_active("Test"));
        assert!(!state.is_active("Other"));
    }

    #[test]
    fn test_hot_concepts() {
        let mut state = ActivationState::new();

        state.add_energy(id("High"), 0.9);
        state.add_energy(id("Medium"), 0.5);
        state.add_energy(id("Tied"), 0.5);
        state.add_energy(id("Low"), 0.1);

        let hot: Vec<_> = state
            .hot_concepts(0.4)
            .into_iter()
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(hot, vec!["High", "Medium", "Tied"]);
    }

    #[test]
    fn test_totals() {
        let mut state = ActivationState::new();

        state.add_energy(id("A"), 0.3);
        state.add_energy(id("B"), 0.4);
        state.add_energy(id("C"), 0.3);

        assert!((state.total_energy() - 1.0).abs() < 0.001);
        assert_eq!(state.active_count(), 3);
    }
}
