use crate::build_planning::domain::{DependencyGraph, PlanningError, RecipeId, RecipeRecord};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// DependencyGraphBuilder service for turning recipe records into a peer graph
///
/// This service contains pure business logic with no I/O dependencies.
/// Dependencies on packages outside the collection are not peers and do not
/// become edges.
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    /// Builds the dependency graph for a recipe collection
    ///
    /// # Errors
    /// - `DuplicateIdentity` naming every identity that occurs more than once
    /// - `SelfDependency` naming every recipe that lists itself
    pub fn build(records: &[RecipeRecord]) -> Result<DependencyGraph, PlanningError> {
        Self::check_unique_identities(records)?;
        Self::check_self_dependencies(records)?;

        let present: BTreeSet<&RecipeId> = records.iter().map(RecipeRecord::identity).collect();
        let mut dependencies: BTreeMap<RecipeId, BTreeSet<RecipeId>> = BTreeMap::new();

        for record in records {
            let mut peers = BTreeSet::new();
            for dep in record.peer_dependencies() {
                if present.contains(dep) {
                    peers.insert(dep.clone());
                } else {
                    debug!(
                        recipe = %record.identity(),
                        dependency = %dep,
                        "ignoring dependency outside the recipe collection"
                    );
                }
            }
            dependencies.insert(record.identity().clone(), peers);
        }

        let graph = DependencyGraph::new(dependencies);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built peer dependency graph"
        );
        Ok(graph)
    }

    fn check_unique_identities(records: &[RecipeRecord]) -> Result<(), PlanningError> {
        let mut seen = BTreeSet::new();
        let duplicates: BTreeSet<RecipeId> = records
            .iter()
            .filter(|r| !seen.insert(r.identity()))
            .map(|r| r.identity().clone())
            .collect();

        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(PlanningError::DuplicateIdentity { ids: duplicates })
        }
    }

    fn check_self_dependencies(records: &[RecipeRecord]) -> Result<(), PlanningError> {
        let offenders: BTreeSet<RecipeId> = records
            .iter()
            .filter(|r| r.depends_on(r.identity()))
            .map(|r| r.identity().clone())
            .collect();

        if offenders.is_empty() {
            Ok(())
        } else {
            Err(PlanningError::SelfDependency { ids: offenders })
        }
    }
}
