use super::{RecipeId, RecipeRecord};
use std::collections::HashMap;

/// BuildOrder value object: recipe identities in a dependency-respecting sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOrder {
    sequence: Vec<RecipeId>,
}

impl BuildOrder {
    pub fn new(sequence: Vec<RecipeId>) -> Self {
        Self { sequence }
    }

    pub fn sequence(&self) -> &[RecipeId] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Zero-based position of `id` in the order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sequence.iter().position(|s| s.as_str() == id)
    }

    /// Returns the records rearranged into this order.
    ///
    /// Records whose identity is not part of the order are left out.
    pub fn arrange(&self, records: &[RecipeRecord]) -> Vec<RecipeRecord> {
        let by_id: HashMap<&str, &RecipeRecord> =
            records.iter().map(|r| (r.name(), r)).collect();

        self.sequence
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).map(|r| (*r).clone()))
            .collect()
    }
}
