use crate::application::read_models::BuildPlanReadModel;
use crate::shared::Result;

/// PlanFormatter port for rendering a build plan
///
/// Implementations turn the read model into text, a details table, or JSON.
pub trait PlanFormatter {
    /// Formats the plan
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &BuildPlanReadModel) -> Result<String>;
}
