use super::RecipeId;
use std::collections::{BTreeMap, BTreeSet};

/// DependencyGraph aggregate over the peer recipes of a collection
///
/// An edge `a -> b` means recipe `a` needs recipe `b` at build time, so `b`
/// must be built first. Only recipes present in the collection appear as
/// nodes or edge endpoints. Instances are immutable; reducing the recipe set
/// yields a new graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    dependencies: BTreeMap<RecipeId, BTreeSet<RecipeId>>,
    dependents: BTreeMap<RecipeId, BTreeSet<RecipeId>>,
}

impl DependencyGraph {
    /// Builds the graph from a forward adjacency map.
    ///
    /// Every edge target must itself be a key of `dependencies`; the caller
    /// (the graph builder) guarantees this.
    pub(crate) fn new(dependencies: BTreeMap<RecipeId, BTreeSet<RecipeId>>) -> Self {
        let mut dependents: BTreeMap<RecipeId, BTreeSet<RecipeId>> = dependencies
            .keys()
            .map(|id| (id.clone(), BTreeSet::new()))
            .collect();

        for (recipe, deps) in &dependencies {
            for dep in deps {
                if let Some(set) = dependents.get_mut(dep) {
                    set.insert(recipe.clone());
                }
            }
        }

        Self {
            dependencies,
            dependents,
        }
    }

    /// All node identities in lexicographic order
    pub fn nodes(&self) -> impl Iterator<Item = &RecipeId> {
        self.dependencies.keys()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.dependencies.contains_key(id)
    }

    /// Recipes that `id` depends on
    pub fn dependencies(&self, id: &str) -> Option<&BTreeSet<RecipeId>> {
        self.dependencies.get(id)
    }

    /// Recipes that depend on `id`
    pub fn dependents(&self, id: &str) -> Option<&BTreeSet<RecipeId>> {
        self.dependents.get(id)
    }

    /// Iterates every edge as `(dependent, dependency)`
    pub fn edges(&self) -> impl Iterator<Item = (&RecipeId, &RecipeId)> {
        self.dependencies
            .iter()
            .flat_map(|(recipe, deps)| deps.iter().map(move |dep| (recipe, dep)))
    }

    pub fn node_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Returns true when `sequence` places every dependency before its dependents
    /// and names each node of the graph exactly once.
    pub fn is_valid_order(&self, sequence: &[RecipeId]) -> bool {
        if sequence.len() != self.node_count() {
            return false;
        }

        let positions: BTreeMap<&RecipeId, usize> = sequence
            .iter()
            .enumerate()
            .map(|(idx, id)| (id, idx))
            .collect();

        if positions.len() != sequence.len() {
            return false;
        }

        self.edges().all(|(recipe, dep)| {
            match (positions.get(recipe), positions.get(dep)) {
                (Some(r), Some(d)) => d < r,
                _ => false,
            }
        })
    }
}
