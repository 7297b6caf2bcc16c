use crate::build_planning::domain::{
    ChannelIndex, CullOutcome, DependencyGraph, PlanMetadata, RecipeRecord,
};
use crate::ports::outbound::ChannelLocation;

/// The channel index a run compared against, with where it came from
#[derive(Debug, Clone)]
pub struct ChannelSnapshot {
    pub location: ChannelLocation,
    pub platform: String,
    pub index: ChannelIndex,
}

/// PlanResponse - Internal response DTO from the plan-build use case
#[derive(Debug, Clone)]
pub struct PlanResponse {
    pub metadata: PlanMetadata,
    /// Every selected recipe, in build order
    pub ordered_records: Vec<RecipeRecord>,
    /// Peer graph of every selected recipe
    pub graph: DependencyGraph,
    pub channel: Option<ChannelSnapshot>,
    /// Present when culling was requested
    pub cull: Option<CullOutcome>,
    pub skipped: Vec<String>,
    pub missing: Vec<String>,
}

impl PlanResponse {
    /// Records the plan emits: the culled sequence when culling ran
    pub fn emitted_records(&self) -> &[RecipeRecord] {
        match &self.cull {
            Some(outcome) => outcome.retained_records(),
            None => &self.ordered_records,
        }
    }

    /// Graph the emitted records are ordered against
    pub fn emitted_graph(&self) -> &DependencyGraph {
        match &self.cull {
            Some(outcome) => outcome.reduced_graph(),
            None => &self.graph,
        }
    }
}
