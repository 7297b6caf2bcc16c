//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of domain data for queries.

mod build_plan_read_model;
mod build_plan_read_model_builder;
mod recipe_view;

pub use build_plan_read_model::{BuildPlanReadModel, ChannelView, CullView, PlanMetadataView};
pub use build_plan_read_model_builder::BuildPlanReadModelBuilder;
pub use recipe_view::{ArtifactView, RecipeView};
