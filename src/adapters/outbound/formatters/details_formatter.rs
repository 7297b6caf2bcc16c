use crate::application::read_models::{BuildPlanReadModel, RecipeView};
use crate::ports::outbound::PlanFormatter;
use crate::shared::Result;
use std::fmt::Write;

const NAME_WIDTH: usize = 28;
const ARTIFACT_WIDTH: usize = 50;
const NOT_IN_CHANNEL: &str = "Not in channel archive";

/// DetailsFormatter adapter rendering the ordering table
///
/// One row per recipe with its dependency counts, its position, where its
/// peers sit, and whether they all come first. When a channel was
/// consulted, a second section lists every artifact and marks the ones the
/// channel lacks.
pub struct DetailsFormatter;

impl DetailsFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render_header(output: &mut String) -> std::fmt::Result {
        writeln!(
            output,
            "{:>w$}  {:>5}  {:>5}  {:>5}  {:<16} {}",
            "name",
            "deps",
            "peers",
            "pos",
            "peer positions",
            "ok",
            w = NAME_WIDTH
        )?;
        writeln!(output, "{}", "-".repeat(NAME_WIDTH + 46))
    }

    fn render_row(output: &mut String, recipe: &RecipeView) -> std::fmt::Result {
        let positions = format!("{:?}", recipe.peer_positions);
        writeln!(
            output,
            "{:>w$}  {:>5}  {:>5}  {:>5}  {:<16} {}",
            recipe.name,
            recipe.declared_dependency_count,
            recipe.peer_dependencies.len(),
            recipe.position,
            positions,
            if recipe.position_ok { "yes" } else { "NO" },
            w = NAME_WIDTH
        )
    }

    fn render_channel_status(output: &mut String, model: &BuildPlanReadModel) -> std::fmt::Result {
        let Some(channel) = &model.channel else {
            return Ok(());
        };

        writeln!(output)?;
        writeln!(output, "Channel: {} ({})", channel.location, channel.platform)?;
        for artifact in model.recipes.iter().flat_map(|r| &r.artifacts) {
            let status = match artifact.in_channel {
                Some(false) => NOT_IN_CHANNEL,
                _ => "",
            };
            let line = format!("{:>w$}   {}", artifact.name, status, w = ARTIFACT_WIDTH);
            writeln!(output, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn render(model: &BuildPlanReadModel) -> std::result::Result<String, std::fmt::Error> {
        let mut output = String::new();

        Self::render_header(&mut output)?;
        for recipe in &model.recipes {
            Self::render_row(&mut output, recipe)?;
        }
        writeln!(
            output,
            "Num not in order = {}/{}",
            model.out_of_order_count(),
            model.recipes.len()
        )?;

        if let Some(cull) = &model.cull {
            writeln!(output)?;
            writeln!(
                output,
                "Culled {} recipe(s) already in the channel: {}",
                cull.removed.len(),
                cull.removed.join(", ")
            )?;
        }

        Self::render_channel_status(&mut output, model)?;
        Ok(output)
    }
}

impl Default for DetailsFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanFormatter for DetailsFormatter {
    fn format(&self, model: &BuildPlanReadModel) -> Result<String> {
        Self::render(model).map_err(|e| anyhow::anyhow!("Failed to render details: {}", e))
    }
}
