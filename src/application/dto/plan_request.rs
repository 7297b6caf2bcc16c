use crate::ports::outbound::ChannelLocation;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// PlanRequest - Internal request DTO for the plan-build use case
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Directory holding one subdirectory per recipe
    pub recipes_dir: PathBuf,
    /// When set, only these recipe names take part (manifest packages)
    pub include: Option<BTreeSet<String>>,
    /// Patterns for excluding recipes from the plan
    pub exclude_patterns: Vec<String>,
    /// Channel to compare artifacts against
    pub channel: Option<ChannelLocation>,
    /// Channel platform subdirectory, e.g. "linux-64"
    pub platform: String,
    /// Drop recipes whose artifacts the channel already holds
    pub cull: bool,
    /// Fetch the channel index for reporting even when not culling
    pub report_channel_status: bool,
}

impl PlanRequest {
    pub fn new(recipes_dir: PathBuf, platform: impl Into<String>) -> Self {
        Self {
            recipes_dir,
            include: None,
            exclude_patterns: Vec::new(),
            channel: None,
            platform: platform.into(),
            cull: false,
            report_channel_status: false,
        }
    }

    pub fn with_include(mut self, include: Option<BTreeSet<String>>) -> Self {
        self.include = include;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_channel(mut self, channel: Option<ChannelLocation>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_cull(mut self, cull: bool) -> Self {
        self.cull = cull;
        self
    }

    pub fn with_channel_status(mut self, report: bool) -> Self {
        self.report_channel_status = report;
        self
    }

    /// True when the run needs the channel index
    pub fn needs_channel_index(&self) -> bool {
        self.cull || (self.report_channel_status && self.channel.is_some())
    }
}
