use super::RecipeId;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while building or ordering the recipe dependency graph
///
/// Every variant carries the complete set of offending identities so a single
/// run reports everything that needs fixing in the recipe collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// Two or more recipes share an identity
    #[error("Duplicate recipe identity: {}\n\n💡 Hint: Each recipe in the collection must have a unique package name", join_ids(.ids))]
    DuplicateIdentity { ids: BTreeSet<RecipeId> },

    /// A recipe lists itself among its build dependencies
    #[error("Recipe depends on itself: {}\n\n💡 Hint: Remove the package's own name from its build requirements", join_ids(.ids))]
    SelfDependency { ids: BTreeSet<RecipeId> },

    /// No build order exists for the listed recipes
    #[error("Circular dependency among recipes: {}\n\n💡 Hint: These recipes are part of, or blocked behind, a dependency cycle that must be resolved manually", join_ids(.ids))]
    CyclicDependency { ids: BTreeSet<RecipeId> },
}

impl PlanningError {
    /// The identities named by this error, in sorted order
    pub fn ids(&self) -> &BTreeSet<RecipeId> {
        match self {
            PlanningError::DuplicateIdentity { ids }
            | PlanningError::SelfDependency { ids }
            | PlanningError::CyclicDependency { ids } => ids,
        }
    }
}

fn join_ids(ids: &BTreeSet<RecipeId>) -> String {
    ids.iter()
        .map(RecipeId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
