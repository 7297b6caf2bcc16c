use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// URN scheme of plan ids in the JSON report
pub const PLAN_ID_SCHEME: &str = "urn:uuid:";

/// Stamp of one planning run
///
/// The JSON report carries these fields so two plans of the same recipes
/// directory can be told apart. The timestamp is RFC 3339 in UTC and the plan
/// id is a `urn:uuid:` URN around a random v4 UUID.
#[derive(Debug, Clone)]
pub struct PlanMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    plan_id: String,
}

impl PlanMetadata {
    pub fn new(started_at: DateTime<Utc>, tool_name: &str, tool_version: &str, run_id: Uuid) -> Self {
        Self {
            timestamp: started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            tool_name: tool_name.to_string(),
            tool_version: tool_version.to_string(),
            plan_id: format!("{}{}", PLAN_ID_SCHEME, run_id.hyphenated()),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn plan_id(&self) -> &str {
        &self.plan_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn run_id() -> Uuid {
        Uuid::parse_str("5f0c8a3e-2b1d-4c7a-9e6f-0a1b2c3d4e5f").unwrap()
    }

    #[test]
    fn test_plan_id_is_uuid_urn() {
        let started_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let metadata = PlanMetadata::new(started_at, "rambo", "0.1.0", run_id());

        assert_eq!(metadata.plan_id(), "urn:uuid:5f0c8a3e-2b1d-4c7a-9e6f-0a1b2c3d4e5f");
        let uuid_part = metadata.plan_id().strip_prefix(PLAN_ID_SCHEME).unwrap();
        assert_eq!(Uuid::parse_str(uuid_part).unwrap(), run_id());
    }

    #[test]
    fn test_timestamp_is_utc_rfc3339() {
        let started_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let metadata = PlanMetadata::new(started_at, "rambo", "0.1.0", run_id());

        assert_eq!(metadata.timestamp(), "2024-01-15T10:30:00Z");
        let parsed = DateTime::parse_from_rfc3339(metadata.timestamp()).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), started_at);
        assert_eq!(metadata.tool_name(), "rambo");
        assert_eq!(metadata.tool_version(), "0.1.0");
    }
}
