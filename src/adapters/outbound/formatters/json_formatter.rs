use crate::application::read_models::{BuildPlanReadModel, RecipeView};
use crate::ports::outbound::PlanFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanReport<'a> {
    metadata: Metadata<'a>,
    channel: Option<Channel<'a>>,
    order: &'a [String],
    recipes: Vec<Recipe<'a>>,
    culled: Option<Culled<'a>>,
    #[serde(skip_serializing_if = "is_empty_list")]
    skipped: &'a [String],
    #[serde(skip_serializing_if = "is_empty_list")]
    missing: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    timestamp: &'a str,
    tool: Tool<'a>,
    plan_id: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Channel<'a> {
    location: &'a str,
    platform: &'a str,
    artifact_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Recipe<'a> {
    name: &'a str,
    position: usize,
    declared_dependencies: usize,
    peer_dependencies: &'a [String],
    artifacts: Vec<Artifact<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Artifact<'a> {
    name: &'a str,
    /// null when no channel was consulted
    in_channel: Option<bool>,
}

#[derive(Debug, Serialize)]
struct Culled<'a> {
    removed: &'a [String],
    retained: &'a [String],
}

fn is_empty_list(list: &&[String]) -> bool {
    list.is_empty()
}

/// JsonFormatter adapter for the machine-readable plan report
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn recipe(view: &RecipeView) -> Recipe<'_> {
        Recipe {
            name: &view.name,
            position: view.position,
            declared_dependencies: view.declared_dependency_count,
            peer_dependencies: &view.peer_dependencies,
            artifacts: view
                .artifacts
                .iter()
                .map(|a| Artifact {
                    name: &a.name,
                    in_channel: a.in_channel,
                })
                .collect(),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanFormatter for JsonFormatter {
    fn format(&self, model: &BuildPlanReadModel) -> Result<String> {
        let report = PlanReport {
            metadata: Metadata {
                timestamp: &model.metadata.timestamp,
                tool: Tool {
                    name: &model.metadata.tool_name,
                    version: &model.metadata.tool_version,
                },
                plan_id: &model.metadata.plan_id,
            },
            channel: model.channel.as_ref().map(|c| Channel {
                location: &c.location,
                platform: &c.platform,
                artifact_count: c.artifact_count,
            }),
            order: &model.order,
            recipes: model.recipes.iter().map(Self::recipe).collect(),
            culled: model.cull.as_ref().map(|c| Culled {
                removed: &c.removed,
                retained: &c.retained,
            }),
            skipped: &model.skipped,
            missing: &model.missing,
        };

        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{ArtifactView, ChannelView, CullView, PlanMetadataView};
    use serde_json::Value;

    fn model() -> BuildPlanReadModel {
        BuildPlanReadModel {
            metadata: PlanMetadataView {
                timestamp: "2024-01-15T10:30:00Z".to_string(),
                tool_name: "rambo".to_string(),
                tool_version: "0.1.0".to_string(),
                plan_id: "urn:uuid:12345678-1234-1234-1234-123456789012".to_string(),
            },
            channel: None,
            order: vec!["core".to_string(), "lib".to_string()],
            recipes: vec![
                RecipeView {
                    name: "core".to_string(),
                    position: 0,
                    declared_dependency_count: 1,
                    peer_dependencies: vec![],
                    peer_positions: vec![],
                    position_ok: true,
                    artifacts: vec![ArtifactView {
                        name: "core-1.0-0.tar.bz2".to_string(),
                        in_channel: None,
                    }],
                },
                RecipeView {
                    name: "lib".to_string(),
                    position: 1,
                    declared_dependency_count: 2,
                    peer_dependencies: vec!["core".to_string()],
                    peer_positions: vec![0],
                    position_ok: true,
                    artifacts: vec![ArtifactView {
                        name: "lib-1.0-0.tar.bz2".to_string(),
                        in_channel: None,
                    }],
                },
            ],
            cull: None,
            skipped: vec![],
            missing: vec![],
        }
    }

    fn render(model: &BuildPlanReadModel) -> Value {
        serde_json::from_str(&JsonFormatter::new().format(model).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_report() {
        let json = render(&model());

        assert_eq!(json["metadata"]["tool"]["name"], "rambo");
        assert_eq!(
            json["metadata"]["planId"],
            "urn:uuid:12345678-1234-1234-1234-123456789012"
        );
        assert_eq!(json["order"], serde_json::json!(["core", "lib"]));
        assert_eq!(json["recipes"][1]["peerDependencies"], serde_json::json!(["core"]));
        assert_eq!(json["recipes"][1]["declaredDependencies"], 2);
        assert!(json["recipes"][0]["artifacts"][0]["inChannel"].is_null());
        assert!(json["channel"].is_null());
        assert!(json["culled"].is_null());
        assert!(json.get("skipped").is_none());
    }

    #[test]
    fn test_culled_report_with_channel() {
        let mut plan = model();
        plan.channel = Some(ChannelView {
            location: "https://conda.example.org/main".to_string(),
            platform: "linux-64".to_string(),
            artifact_count: 12,
        });
        plan.cull = Some(CullView {
            removed: vec!["core".to_string()],
            retained: vec!["lib".to_string()],
        });
        plan.recipes[1].artifacts[0].in_channel = Some(false);
        plan.skipped = vec!["winonly".to_string()];

        let json = render(&plan);

        assert_eq!(json["channel"]["platform"], "linux-64");
        assert_eq!(json["channel"]["artifactCount"], 12);
        assert_eq!(json["culled"]["removed"], serde_json::json!(["core"]));
        assert_eq!(json["recipes"][1]["artifacts"][0]["inChannel"], false);
        assert_eq!(json["skipped"], serde_json::json!(["winonly"]));
    }
}
