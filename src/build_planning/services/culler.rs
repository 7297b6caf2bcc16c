use super::DependencyGraphBuilder;
use crate::build_planning::domain::{ChannelIndex, CullOutcome, PlanningError, RecipeRecord};
use std::collections::BTreeSet;
use tracing::debug;

/// Culler service for dropping recipes whose artifacts a channel already holds
///
/// Culling is a single filtering pass over records that are already in build
/// order. Deleting nodes from a topological order leaves a topological order
/// of the remaining graph, so no re-sort happens.
pub struct Culler;

impl Culler {
    /// True when the artifacts of `record` are a subset of `index`.
    ///
    /// Partial overlap keeps the recipe: it still owes the missing artifacts.
    /// A recipe declaring no artifacts owes nothing and is removable.
    pub fn is_removable(record: &RecipeRecord, index: &ChannelIndex) -> bool {
        index.contains_all(record.artifact_names())
    }

    /// Filters `ordered` against `index`, keeping the relative order
    ///
    /// The reduced graph in the outcome is built fresh from the retained
    /// records; edges to removed recipes vanish because those dependencies
    /// are already satisfied by the channel.
    pub fn cull(ordered: &[RecipeRecord], index: &ChannelIndex) -> Result<CullOutcome, PlanningError> {
        let mut removed = BTreeSet::new();
        let mut retained_records = Vec::with_capacity(ordered.len());

        for record in ordered {
            if Self::is_removable(record, index) {
                debug!(recipe = %record.identity(), "all artifacts present in channel, culling");
                removed.insert(record.identity().clone());
            } else {
                retained_records.push(record.clone());
            }
        }

        let reduced_graph = DependencyGraphBuilder::build(&retained_records)?;
        debug!(
            removed = removed.len(),
            retained = retained_records.len(),
            "culled recipes against channel index"
        );

        Ok(CullOutcome::new(retained_records, removed, reduced_graph))
    }
}
