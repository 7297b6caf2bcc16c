//! Builder for constructing BuildPlanReadModel from a plan response

use super::build_plan_read_model::{BuildPlanReadModel, ChannelView, CullView, PlanMetadataView};
use super::recipe_view::{ArtifactView, RecipeView};
use crate::application::dto::PlanResponse;
use crate::build_planning::domain::{ChannelIndex, DependencyGraph, PlanMetadata, RecipeRecord};
use std::collections::BTreeMap;

/// Builder for constructing BuildPlanReadModel from domain objects
pub struct BuildPlanReadModelBuilder;

impl BuildPlanReadModelBuilder {
    /// Builds the read model for the records the plan emits
    ///
    /// With culling, that is the retained sequence checked against the
    /// reduced graph; otherwise the full order against the full graph.
    pub fn build(response: &PlanResponse) -> BuildPlanReadModel {
        let records = response.emitted_records();
        let index = response.channel.as_ref().map(|c| &c.index);

        BuildPlanReadModel {
            metadata: Self::build_metadata(&response.metadata),
            channel: response.channel.as_ref().map(|c| ChannelView {
                location: c.location.to_string(),
                platform: c.platform.clone(),
                artifact_count: c.index.len(),
            }),
            order: records.iter().map(|r| r.name().to_string()).collect(),
            recipes: Self::build_recipes(records, response.emitted_graph(), index),
            cull: response.cull.as_ref().map(|outcome| CullView {
                removed: outcome.removed().iter().map(ToString::to_string).collect(),
                retained: outcome.retained().iter().map(ToString::to_string).collect(),
            }),
            skipped: response.skipped.clone(),
            missing: response.missing.clone(),
        }
    }

    fn build_metadata(metadata: &PlanMetadata) -> PlanMetadataView {
        PlanMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            plan_id: metadata.plan_id().to_string(),
        }
    }

    fn build_recipes(
        records: &[RecipeRecord],
        graph: &DependencyGraph,
        index: Option<&ChannelIndex>,
    ) -> Vec<RecipeView> {
        let positions: BTreeMap<&str, usize> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name(), i))
            .collect();

        records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let peer_dependencies: Vec<String> = graph
                    .dependencies(record.name())
                    .map(|deps| deps.iter().map(ToString::to_string).collect())
                    .unwrap_or_default();
                let peer_positions: Vec<usize> = peer_dependencies
                    .iter()
                    .filter_map(|peer| positions.get(peer.as_str()).copied())
                    .collect();
                let position_ok = peer_positions.iter().all(|&p| p < position);

                let artifacts = record
                    .artifact_names()
                    .iter()
                    .map(|name| ArtifactView {
                        name: name.clone(),
                        in_channel: index.map(|idx| idx.contains(name)),
                    })
                    .collect();

                RecipeView {
                    name: record.name().to_string(),
                    position,
                    declared_dependency_count: record.declared_dependency_count(),
                    peer_dependencies,
                    peer_positions,
                    position_ok,
                    artifacts,
                }
            })
            .collect()
    }
}
