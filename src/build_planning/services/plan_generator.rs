use crate::build_planning::domain::PlanMetadata;
use chrono::Utc;
use uuid::Uuid;

/// PlanGenerator service for stamping a planning run
pub struct PlanGenerator;

impl PlanGenerator {
    /// Stamps a run with the current time and a fresh v4 plan id
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> PlanMetadata {
        PlanMetadata::new(Utc::now(), tool_name, tool_version, Uuid::new_v4())
    }

    /// Generates plan metadata using this build's package name and version
    pub fn generate_default_metadata() -> PlanMetadata {
        Self::generate_metadata(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}
