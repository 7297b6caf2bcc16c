use async_trait::async_trait;
use rambo::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ChannelIndexRepository returning a fixed artifact list
#[derive(Default, Clone)]
pub struct MockChannelRepository {
    artifacts: Vec<String>,
    fetches: Arc<AtomicUsize>,
}

impl MockChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifacts(mut self, artifacts: &[&str]) -> Self {
        self.artifacts = artifacts.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Number of times the index was fetched
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelIndexRepository for MockChannelRepository {
    async fn fetch_index(&self, _location: &ChannelLocation, _platform: &str) -> Result<ChannelIndex> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.artifacts.iter().cloned().collect())
    }
}
