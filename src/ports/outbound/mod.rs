/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod channel_index_repository;
pub mod formatter;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod recipe_source;

pub use channel_index_repository::{
    host_platform, validate_platform, ChannelIndexRepository, ChannelLocation,
};
pub use formatter::PlanFormatter;
pub use manifest_reader::{Manifest, ManifestReader};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use recipe_source::{RecipeEntry, RecipeLoadResult, RecipeSource};
