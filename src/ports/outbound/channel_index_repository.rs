use crate::build_planning::domain::ChannelIndex;
use crate::shared::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

/// Where a package channel lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelLocation {
    /// http or https base URL, without trailing slash
    Remote(String),
    /// Channel directory on the local filesystem
    Local(PathBuf),
}

impl ChannelLocation {
    /// Parses a channel argument
    ///
    /// `http://` and `https://` URLs are remote, `file://` URLs and bare
    /// paths are local. Any other scheme is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            anyhow::bail!("Channel location cannot be empty");
        }

        if let Some(path) = raw.strip_prefix("file://") {
            if path.is_empty() {
                anyhow::bail!("Channel location '{}' has no path", raw);
            }
            return Ok(ChannelLocation::Local(PathBuf::from(path)));
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(ChannelLocation::Remote(raw.trim_end_matches('/').to_string()));
        }

        if let Some((scheme, _)) = raw.split_once("://") {
            anyhow::bail!(
                "Unsupported channel scheme '{}' in '{}'. Use http, https, file, or a directory path.",
                scheme,
                raw
            );
        }

        Ok(ChannelLocation::Local(PathBuf::from(raw)))
    }
}

/// Validates a channel platform subdirectory name such as "linux-64"
///
/// The platform becomes a path segment, so separators and dots are refused.
pub fn validate_platform(platform: &str) -> Result<()> {
    if platform.is_empty() {
        anyhow::bail!("Platform cannot be empty");
    }
    if let Some(ch) = platform
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        anyhow::bail!(
            "Platform '{}' contains invalid character '{}'. Expected a name such as linux-64 or noarch.",
            platform,
            ch
        );
    }
    Ok(())
}

/// Channel platform name of the machine running this binary
pub fn host_platform() -> &'static str {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("linux", "x86_64") => "linux-64",
        ("linux", "x86") => "linux-32",
        ("linux", "aarch64") => "linux-aarch64",
        ("linux", "powerpc64") => "linux-ppc64le",
        ("linux", "s390x") => "linux-s390x",
        ("macos", "x86_64") => "osx-64",
        ("macos", "aarch64") => "osx-arm64",
        ("windows", "x86_64") => "win-64",
        ("windows", "x86") => "win-32",
        ("windows", "aarch64") => "win-arm64",
        _ => "noarch",
    }
}

impl fmt::Display for ChannelLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelLocation::Remote(url) => write!(f, "{}", url),
            ChannelLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// ChannelIndexRepository port for fetching the artifact names a channel holds
///
/// # Async Support
/// Remote channels are fetched over the network, so the port is async.
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait ChannelIndexRepository: Send + Sync {
    /// Fetches the index of `platform` (e.g. "linux-64") from `location`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The index cannot be retrieved (network, missing file)
    /// - The index is not valid repodata JSON
    async fn fetch_index(&self, location: &ChannelLocation, platform: &str) -> Result<ChannelIndex>;
}
