use super::{DependencyGraph, RecipeId, RecipeRecord};
use std::collections::BTreeSet;

/// CullOutcome aggregate: what is left to build after consulting a channel
#[derive(Debug, Clone)]
pub struct CullOutcome {
    retained_records: Vec<RecipeRecord>,
    removed: BTreeSet<RecipeId>,
    retained: BTreeSet<RecipeId>,
    reduced_graph: DependencyGraph,
}

impl CullOutcome {
    pub fn new(
        retained_records: Vec<RecipeRecord>,
        removed: BTreeSet<RecipeId>,
        reduced_graph: DependencyGraph,
    ) -> Self {
        let retained = retained_records
            .iter()
            .map(|r| r.identity().clone())
            .collect();
        Self {
            retained_records,
            removed,
            retained,
            reduced_graph,
        }
    }

    /// Remaining records, still in build order
    pub fn retained_records(&self) -> &[RecipeRecord] {
        &self.retained_records
    }

    /// Identities of the remaining records, in build order
    pub fn order(&self) -> Vec<RecipeId> {
        self.retained_records
            .iter()
            .map(|r| r.identity().clone())
            .collect()
    }

    pub fn removed(&self) -> &BTreeSet<RecipeId> {
        &self.removed
    }

    pub fn retained(&self) -> &BTreeSet<RecipeId> {
        &self.retained
    }

    /// Graph induced by the retained records alone
    pub fn reduced_graph(&self) -> &DependencyGraph {
        &self.reduced_graph
    }

    pub fn is_removed(&self, id: &str) -> bool {
        self.removed.contains(id)
    }
}
