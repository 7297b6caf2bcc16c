pub mod build_order;
pub mod channel_index;
pub mod cull_outcome;
pub mod dependency_graph;
pub mod plan_metadata;
pub mod planning_error;
pub mod recipe;

pub use build_order::BuildOrder;
pub use channel_index::ChannelIndex;
pub use cull_outcome::CullOutcome;
pub use dependency_graph::DependencyGraph;
pub use plan_metadata::{PlanMetadata, PLAN_ID_SCHEME};
pub use planning_error::PlanningError;
pub use recipe::{RecipeId, RecipeRecord};
