use crate::build_planning::domain::{BuildOrder, DependencyGraph, PlanningError, RecipeId};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use tracing::debug;

/// TopologicalSorter service for ordering recipes dependencies-first
///
/// Uses Kahn's algorithm. Among recipes whose dependencies are all
/// satisfied, the lexicographically smallest identity is emitted next, so the
/// result depends only on the graph and never on input iteration order.
pub struct TopologicalSorter;

impl TopologicalSorter {
    /// Orders every node of `graph` so each dependency precedes its dependents
    ///
    /// # Errors
    /// Returns `CyclicDependency` with every identity that could not be
    /// ordered: members of a cycle and everything blocked behind one.
    pub fn sort(graph: &DependencyGraph) -> Result<BuildOrder, PlanningError> {
        // In-degree = number of unresolved peer dependencies
        let mut in_degree: BTreeMap<&RecipeId, usize> = graph
            .nodes()
            .map(|id| (id, graph.dependencies(id.as_str()).map_or(0, BTreeSet::len)))
            .collect();

        let mut ready: BinaryHeap<Reverse<&RecipeId>> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(id, _)| Reverse(*id))
            .collect();

        let mut sequence = Vec::with_capacity(graph.node_count());

        while let Some(Reverse(id)) = ready.pop() {
            sequence.push(id.clone());

            let Some(dependents) = graph.dependents(id.as_str()) else {
                continue;
            };
            for dependent in dependents {
                let Some(degree) = in_degree.get_mut(dependent) else {
                    continue;
                };
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if sequence.len() < graph.node_count() {
            let emitted: BTreeSet<&RecipeId> = sequence.iter().collect();
            let unresolved: BTreeSet<RecipeId> = graph
                .nodes()
                .filter(|id| !emitted.contains(id))
                .cloned()
                .collect();
            debug!(
                unresolved = unresolved.len(),
                "dependency cycle left recipes unordered"
            );
            return Err(PlanningError::CyclicDependency { ids: unresolved });
        }

        Ok(BuildOrder::new(sequence))
    }
}
