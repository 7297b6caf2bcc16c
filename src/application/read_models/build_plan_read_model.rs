//! Build plan read model for query operations
//!
//! Aggregates everything the formatters need in one denormalized struct.

use super::recipe_view::RecipeView;

/// Main read model for a build plan
#[derive(Debug, Clone)]
pub struct BuildPlanReadModel {
    pub metadata: PlanMetadataView,
    pub channel: Option<ChannelView>,
    /// Emitted recipe names in build order
    pub order: Vec<String>,
    /// One view per emitted recipe, same order as `order`
    pub recipes: Vec<RecipeView>,
    /// Present when culling ran
    pub cull: Option<CullView>,
    pub skipped: Vec<String>,
    pub missing: Vec<String>,
}

impl BuildPlanReadModel {
    /// Number of recipes whose peers do not all come first
    pub fn out_of_order_count(&self) -> usize {
        self.recipes.iter().filter(|r| !r.position_ok).count()
    }
}

/// View representation of plan metadata
#[derive(Debug, Clone)]
pub struct PlanMetadataView {
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub plan_id: String,
}

/// View of the consulted channel
#[derive(Debug, Clone)]
pub struct ChannelView {
    pub location: String,
    pub platform: String,
    pub artifact_count: usize,
}

/// Culling result as sorted name lists
#[derive(Debug, Clone)]
pub struct CullView {
    pub removed: Vec<String>,
    pub retained: Vec<String>,
}
