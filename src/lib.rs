//! rambo - Recipe Analyzer and Multi-package Build Optimizer
//!
//! This library orders a collection of conda recipes so that every recipe is
//! built after the recipes it depends on, and optionally culls the recipes
//! whose artifacts a channel already holds. It follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`build_planning`): recipe graph, ordering and culling
//! - **Application Layer** (`application`): the planning use case, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use rambo::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn plan() -> Result<()> {
//! // Create adapters
//! let recipe_source = RecipeDirectoryReader::new();
//! let channel_repository = ChannelIndexClient::new()?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = PlanBuildUseCase::new(recipe_source, channel_repository, progress_reporter);
//!
//! // Execute
//! let request = PlanRequest::new(PathBuf::from("recipes"), "linux-64");
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let model = BuildPlanReadModelBuilder::build(&response);
//! let output = TextFormatter::new().format(&model)?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod build_planning;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, RecipeDirectoryReader, StdoutPresenter, YamlManifestReader,
    };
    pub use crate::adapters::outbound::formatters::{
        DetailsFormatter, JsonFormatter, TextFormatter,
    };
    pub use crate::adapters::outbound::network::ChannelIndexClient;
    pub use crate::application::dto::{OutputFormat, PlanRequest, PlanResponse};
    pub use crate::application::read_models::{BuildPlanReadModel, BuildPlanReadModelBuilder};
    pub use crate::application::use_cases::PlanBuildUseCase;
    pub use crate::build_planning::domain::{
        BuildOrder, ChannelIndex, CullOutcome, DependencyGraph, PlanningError, RecipeId,
        RecipeRecord,
    };
    pub use crate::build_planning::services::{
        Culler, DependencyGraphBuilder, RecipeFilter, TopologicalSorter,
    };
    pub use crate::ports::outbound::{
        ChannelIndexRepository, ChannelLocation, ManifestReader, OutputPresenter, PlanFormatter,
        ProgressReporter, RecipeEntry, RecipeLoadResult, RecipeSource,
    };
    pub use crate::shared::Result;
}
