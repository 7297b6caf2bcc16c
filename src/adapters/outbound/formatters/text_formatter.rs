use crate::application::read_models::BuildPlanReadModel;
use crate::ports::outbound::PlanFormatter;
use crate::shared::Result;

/// TextFormatter adapter emitting one recipe name per line in build order
///
/// The output is meant to be piped straight into a build driver.
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanFormatter for TextFormatter {
    fn format(&self, model: &BuildPlanReadModel) -> Result<String> {
        let mut output = String::new();
        for name in &model.order {
            output.push_str(name);
            output.push('\n');
        }
        Ok(output)
    }
}
