//! Configuration file support for rambo.
//!
//! Provides YAML-based configuration through `rambo.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::application::dto::OutputFormat;
use crate::ports::outbound::validate_platform;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "rambo.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub channel: Option<String>,
    pub platform: Option<String>,
    pub culled: Option<bool>,
    pub exclude_recipes: Option<Vec<String>>,
    pub manifest: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The configured output format, if any
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(OutputFormat::from_str)
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
///
/// A relative `manifest` path is resolved against the directory holding the
/// config file.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    if let (Some(manifest), Some(base)) = (config.manifest.as_ref(), path.parent()) {
        if manifest.is_relative() {
            config.manifest = Some(base.join(manifest));
        }
    }

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Err(e) = config.output_format() {
        bail!(
            "Invalid config: {}\n\n💡 Hint: 'format' must be one of text, details, json.",
            e
        );
    }

    if let Some(ref platform) = config.platform {
        if let Err(e) = validate_platform(platform) {
            bail!(
                "Invalid config: {}\n\n💡 Hint: 'platform' names a channel subdirectory such as \"linux-64\".",
                e
            );
        }
    }

    if let Some(ref channel) = config.channel {
        if channel.trim().is_empty() {
            bail!("Invalid config: 'channel' must not be empty.");
        }
    }

    if let Some(ref patterns) = config.exclude_recipes {
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                bail!(
                    "Invalid config: exclude_recipes[{}] must not be empty.\n\n\
                     💡 Hint: Each entry is a recipe name or a wildcard pattern (e.g., \"py*\").",
                    i
                );
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
