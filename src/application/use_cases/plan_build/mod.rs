use crate::application::dto::{ChannelSnapshot, PlanRequest, PlanResponse};
use crate::build_planning::domain::{CullOutcome, DependencyGraph, RecipeRecord};
use crate::build_planning::services::{
    Culler, DependencyGraphBuilder, PlanGenerator, RecipeFilter, TopologicalSorter,
};
use crate::ports::outbound::{
    ChannelIndexRepository, ProgressReporter, RecipeLoadResult, RecipeSource,
};
use crate::shared::error::RamboError;
use crate::shared::Result;
use tracing::debug;

/// PlanBuildUseCase - Core use case for planning a multi-recipe build
///
/// Orchestrates loading, selection, ordering and culling using generic
/// dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `RS` - RecipeSource implementation
/// * `CR` - ChannelIndexRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct PlanBuildUseCase<RS, CR, PR> {
    recipe_source: RS,
    channel_repository: CR,
    progress_reporter: PR,
}

impl<RS, CR, PR> PlanBuildUseCase<RS, CR, PR>
where
    RS: RecipeSource,
    CR: ChannelIndexRepository,
    PR: ProgressReporter,
{
    /// Creates a new PlanBuildUseCase with injected dependencies
    pub fn new(recipe_source: RS, channel_repository: CR, progress_reporter: PR) -> Self {
        Self {
            recipe_source,
            channel_repository,
            progress_reporter,
        }
    }

    /// Executes the planning run
    ///
    /// # Errors
    /// - `RamboError::MissingChannel` when culling without a channel
    /// - `PlanningError` when the selected recipes cannot be ordered
    /// - adapter errors from loading recipes or fetching the channel index
    pub async fn execute(&self, request: PlanRequest) -> Result<PlanResponse> {
        if request.cull && request.channel.is_none() {
            return Err(RamboError::MissingChannel.into());
        }

        // Step 1: Load recipes
        let loaded = self.load_and_report_recipes(&request)?;
        let RecipeLoadResult {
            records,
            skipped,
            missing,
        } = loaded;

        // Step 2: Apply manifest selection and exclusion filters
        let selected = self.apply_selection(records, &request)?;

        // Step 3: Build the peer graph and order it
        let (graph, ordered_records) = self.order_recipes(&selected)?;

        // Step 4: Consult the channel if needed
        let channel = self.fetch_channel_if_needed(&request).await?;

        // Step 5: Cull against the channel if requested
        let cull = match (&channel, request.cull) {
            (Some(snapshot), true) => Some(self.cull_and_report(&ordered_records, snapshot)?),
            _ => None,
        };

        Ok(PlanResponse {
            metadata: PlanGenerator::generate_default_metadata(),
            ordered_records,
            graph,
            channel,
            cull,
            skipped,
            missing,
        })
    }

    /// Loads every recipe directory, driving a progress bar
    fn load_and_report_recipes(&self, request: &PlanRequest) -> Result<RecipeLoadResult> {
        self.progress_reporter.report(&format!(
            "📖 Loading recipes from: {}",
            request.recipes_dir.display()
        ));

        let dirs = self.recipe_source.recipe_dirs(&request.recipes_dir)?;
        let total = dirs.len();
        let mut result = RecipeLoadResult::default();

        for (i, dir) in dirs.iter().enumerate() {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.progress_reporter
                .report_progress(i + 1, total, Some(name.as_str()));
            result.push(self.recipe_source.load_recipe(dir)?);
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Loaded {} recipe(s)",
            result.records.len()
        ));

        for name in &result.skipped {
            self.progress_reporter.report(&format!(
                "⏭️  Skipping '{}': build.skip is set for this platform",
                name
            ));
        }
        for dir in &result.missing {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Recipe directory '{}' has no meta.yaml or recipe.toml",
                dir
            ));
        }

        Ok(result)
    }

    /// Applies the manifest include-list and exclusion patterns
    ///
    /// # Errors
    /// Returns an error if a pattern is invalid or every recipe was filtered out
    fn apply_selection(
        &self,
        records: Vec<RecipeRecord>,
        request: &PlanRequest,
    ) -> Result<Vec<RecipeRecord>> {
        let filter = RecipeFilter::new(request.include.clone(), request.exclude_patterns.clone())?;
        if filter.is_passthrough() {
            return Ok(records);
        }

        let unmatched_includes = filter.unmatched_includes(records.iter().map(RecipeRecord::name));
        let original_count = records.len();
        let selected = filter.filter_records(records);

        let dropped = original_count - selected.len();
        if dropped > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Left out {} recipe(s) based on manifest and filters",
                dropped
            ));
        }

        for name in unmatched_includes {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Manifest lists '{}' but no such recipe was found.",
                name
            ));
        }
        for pattern in filter.unmatched_patterns() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any recipes.",
                pattern
            ));
        }

        if selected.is_empty() && original_count > 0 {
            anyhow::bail!(
                "All {} recipe(s) were left out by the manifest and exclusion filters. \
                 The plan would be empty. Please adjust your selection.",
                original_count
            );
        }

        Ok(selected)
    }

    fn order_recipes(
        &self,
        records: &[RecipeRecord],
    ) -> Result<(DependencyGraph, Vec<RecipeRecord>)> {
        let graph = DependencyGraphBuilder::build(records)?;
        let order = TopologicalSorter::sort(&graph)?;
        debug!(recipes = order.len(), edges = graph.edge_count(), "ordered recipes");

        self.progress_reporter.report(&format!(
            "🔗 Ordered {} recipe(s) over {} peer dependency edge(s)",
            order.len(),
            graph.edge_count()
        ));

        let ordered = order.arrange(records);
        Ok((graph, ordered))
    }

    async fn fetch_channel_if_needed(&self, request: &PlanRequest) -> Result<Option<ChannelSnapshot>> {
        if !request.needs_channel_index() {
            return Ok(None);
        }
        let Some(location) = &request.channel else {
            return Err(RamboError::MissingChannel.into());
        };

        self.progress_reporter.report(&format!(
            "🌐 Fetching channel index: {} ({})",
            location, request.platform
        ));

        let index = self
            .channel_repository
            .fetch_index(location, &request.platform)
            .await?;

        self.progress_reporter.report(&format!(
            "✅ Channel holds {} artifact(s)",
            index.len()
        ));

        Ok(Some(ChannelSnapshot {
            location: location.clone(),
            platform: request.platform.clone(),
            index,
        }))
    }

    fn cull_and_report(
        &self,
        ordered_records: &[RecipeRecord],
        channel: &ChannelSnapshot,
    ) -> Result<CullOutcome> {
        let outcome = Culler::cull(ordered_records, &channel.index)?;

        self.progress_reporter.report(&format!(
            "✂️  Culled {} recipe(s) already in the channel, {} left to build",
            outcome.removed().len(),
            outcome.retained().len()
        ));

        Ok(outcome)
    }
}
