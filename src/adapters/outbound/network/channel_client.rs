use crate::build_planning::domain::ChannelIndex;
use crate::ports::outbound::{validate_platform, ChannelIndexRepository, ChannelLocation};
use crate::shared::error::RamboError;
use crate::shared::security::{read_regular_file, MAX_INDEX_FILE_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const INDEX_FILE: &str = "repodata.json";

/// The parts of a channel's repodata.json that name artifacts
///
/// Package metadata values are skipped without being materialized.
#[derive(Debug, Deserialize)]
struct RepodataDocument {
    #[serde(default)]
    packages: BTreeMap<String, IgnoredAny>,
    #[serde(default, rename = "packages.conda")]
    packages_conda: BTreeMap<String, IgnoredAny>,
}

/// Parses repodata JSON into the set of artifact filenames it lists
pub(crate) fn parse_repodata(content: &str) -> Result<ChannelIndex> {
    let document: RepodataDocument = serde_json::from_str(content)?;
    Ok(document
        .packages
        .into_keys()
        .chain(document.packages_conda.into_keys())
        .collect())
}

/// HttpChannelClient adapter for fetching a remote channel index
///
/// # Async Support
/// Uses the async reqwest client; retries transient failures with a short,
/// growing delay.
pub struct HttpChannelClient {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpChannelClient {
    /// Creates a new client with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("rambo/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 3,
        })
    }

    /// URL of the index for `platform` below the channel base URL
    pub fn index_url(base_url: &str, platform: &str) -> Result<String> {
        validate_platform(platform)?;
        Ok(format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(platform),
            INDEX_FILE
        ))
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = anyhow::anyhow!("no attempt made to fetch {}", url);

        for attempt in 1..=self.max_retries {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    debug!(url, attempt, error = %e, "channel index fetch failed");
                    last_error = e;
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error)
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("channel returned status code {}", response.status());
        }

        Ok(response.text().await?)
    }

    async fn fetch(&self, base_url: &str, platform: &str) -> Result<ChannelIndex> {
        let url = Self::index_url(base_url, platform)?;
        let fetch_error = |details: String| RamboError::ChannelFetchError {
            location: url.clone(),
            details,
        };

        let body = self
            .fetch_with_retry(&url)
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        let index = parse_repodata(&body).map_err(|e| fetch_error(e.to_string()))?;

        debug!(url = %url, artifacts = index.len(), "fetched remote channel index");
        Ok(index)
    }
}

/// LocalChannelReader adapter for reading a channel directory on disk
///
/// The directory is laid out like a served channel:
/// `<channel>/<platform>/repodata.json`.
pub struct LocalChannelReader;

impl LocalChannelReader {
    pub fn new() -> Self {
        Self
    }

    fn read(&self, channel_dir: &Path, platform: &str) -> Result<ChannelIndex> {
        validate_platform(platform)?;
        let path = channel_dir.join(platform).join(INDEX_FILE);
        let fetch_error = |details: String| RamboError::ChannelFetchError {
            location: path.display().to_string(),
            details,
        };

        let content = read_regular_file(&path, "channel index", MAX_INDEX_FILE_SIZE)
            .map_err(|e| fetch_error(e.to_string()))?;
        let index = parse_repodata(&content).map_err(|e| fetch_error(e.to_string()))?;

        debug!(path = %path.display(), artifacts = index.len(), "read local channel index");
        Ok(index)
    }
}

impl Default for LocalChannelReader {
    fn default() -> Self {
        Self::new()
    }
}

/// ChannelIndexClient adapter dispatching on the channel location kind
///
/// Remote locations go to `HttpChannelClient`, local ones to
/// `LocalChannelReader`.
pub struct ChannelIndexClient {
    http: HttpChannelClient,
    local: LocalChannelReader,
}

impl ChannelIndexClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpChannelClient::new()?,
            local: LocalChannelReader::new(),
        })
    }
}

#[async_trait]
impl ChannelIndexRepository for ChannelIndexClient {
    async fn fetch_index(&self, location: &ChannelLocation, platform: &str) -> Result<ChannelIndex> {
        match location {
            ChannelLocation::Remote(url) => self.http.fetch(url, platform).await,
            ChannelLocation::Local(dir) => self.local.read(dir, platform),
        }
    }
}
