use crate::ports::outbound::{Manifest, ManifestReader};
use crate::shared::error::RamboError;
use crate::shared::security::{read_regular_file, MAX_RECIPE_FILE_SIZE};
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// YamlManifestReader adapter for reading YAML build manifests
///
/// ```yaml
/// channel_URL: https://conda.example.org/main
/// packages:
///   - core
///   - lib
/// ```
pub struct YamlManifestReader;

impl YamlManifestReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlManifestReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    packages: Option<Vec<String>>,
    #[serde(default, rename = "channel_URL", alias = "channel_url")]
    channel_url: Option<String>,
}

impl ManifestReader for YamlManifestReader {
    fn read_manifest(&self, path: &Path) -> Result<Manifest> {
        let manifest_error = |details: String| RamboError::ManifestError {
            path: path.to_path_buf(),
            details,
        };

        let content = read_regular_file(path, "manifest", MAX_RECIPE_FILE_SIZE)
            .map_err(|e| manifest_error(e.to_string()))?;

        let document: ManifestDocument =
            serde_yaml_ng::from_str(&content).map_err(|e| manifest_error(e.to_string()))?;

        let packages: BTreeSet<String> = document
            .packages
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if packages.is_empty() {
            return Err(manifest_error("'packages' lists no recipes".to_string()).into());
        }

        let channel_url = document
            .channel_url
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Manifest {
            packages,
            channel_url,
        })
    }
}
