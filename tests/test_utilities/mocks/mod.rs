/// Mock implementations for testing
mod mock_channel_repository;
mod mock_progress_reporter;
mod mock_recipe_source;

pub use mock_channel_repository::MockChannelRepository;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_recipe_source::MockRecipeSource;
