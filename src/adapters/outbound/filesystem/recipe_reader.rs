use crate::build_planning::domain::RecipeRecord;
use crate::ports::outbound::{RecipeEntry, RecipeSource};
use crate::shared::error::RamboError;
use crate::shared::security::{read_regular_file, validate_directory, MAX_RECIPE_FILE_SIZE};
use crate::shared::Result;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory names that never hold a recipe
const IGNORED_DIRS: [&str; 2] = [".git", "template"];

const YAML_RECIPE_FILE: &str = "meta.yaml";
const TOML_RECIPE_FILE: &str = "recipe.toml";
const ARTIFACT_EXTENSION: &str = "tar.bz2";

/// RecipeDirectoryReader adapter for reading a directory of recipe subdirectories
///
/// Each immediate subdirectory holding a `meta.yaml` or a `recipe.toml` is
/// one recipe. Both formats share the same schema.
pub struct RecipeDirectoryReader;

impl RecipeDirectoryReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecipeDirectoryReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecipeFormat {
    Yaml,
    Toml,
}

impl RecipeDirectoryReader {
    fn validate_recipes_dir(&self, recipes_dir: &Path) -> Result<()> {
        if !recipes_dir.exists() {
            return Err(RamboError::RecipesDirNotFound {
                path: recipes_dir.to_path_buf(),
            }
            .into());
        }

        validate_directory(recipes_dir, "recipes directory").map_err(|e| {
            RamboError::InvalidRecipesPath {
                path: recipes_dir.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Candidate recipe directories, sorted by name
    fn candidate_dirs(&self, recipes_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(recipes_dir).map_err(|e| RamboError::FileReadError {
            path: recipes_dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RamboError::FileReadError {
                path: recipes_dir.to_path_buf(),
                details: e.to_string(),
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if name.starts_with('.') || IGNORED_DIRS.contains(&name.as_str()) {
                continue;
            }

            // DirEntry::file_type does not follow symlinks
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                debug!(entry = %name, "not a recipe directory, ignoring");
                continue;
            }

            candidates.push((name, entry.path()));
        }

        candidates.sort();
        Ok(candidates)
    }

    fn locate_recipe_file(&self, dir: &Path) -> Option<(PathBuf, RecipeFormat)> {
        let yaml = dir.join(YAML_RECIPE_FILE);
        if yaml.exists() {
            return Some((yaml, RecipeFormat::Yaml));
        }
        let toml = dir.join(TOML_RECIPE_FILE);
        if toml.exists() {
            return Some((toml, RecipeFormat::Toml));
        }
        None
    }

    fn parse_recipe(&self, path: &Path, format: RecipeFormat) -> Result<RecipeDocument> {
        let parse_error = |details: String| RamboError::RecipeParseError {
            path: path.to_path_buf(),
            details,
        };

        let content = read_regular_file(path, "recipe file", MAX_RECIPE_FILE_SIZE)
            .map_err(|e| parse_error(e.to_string()))?;

        let document = match format {
            RecipeFormat::Yaml => {
                serde_yaml_ng::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            RecipeFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };
        Ok(document)
    }
}

impl RecipeSource for RecipeDirectoryReader {
    fn recipe_dirs(&self, recipes_dir: &Path) -> Result<Vec<PathBuf>> {
        self.validate_recipes_dir(recipes_dir)?;
        let dirs: Vec<PathBuf> = self
            .candidate_dirs(recipes_dir)?
            .into_iter()
            .map(|(_, path)| path)
            .collect();
        debug!(candidates = dirs.len(), dir = %recipes_dir.display(), "listed recipes directory");
        Ok(dirs)
    }

    fn load_recipe(&self, recipe_dir: &Path) -> Result<RecipeEntry> {
        let Some((recipe_path, format)) = self.locate_recipe_file(recipe_dir) else {
            let dir_name = recipe_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| recipe_dir.display().to_string());
            debug!(directory = %dir_name, "no recipe file found");
            return Ok(RecipeEntry::Missing(dir_name));
        };

        let document = self.parse_recipe(&recipe_path, format)?;
        if document.is_skipped() {
            debug!(recipe = %document.package.name, "build.skip set, leaving out");
            return Ok(RecipeEntry::Skipped(document.package.name));
        }

        let record = document
            .into_record()
            .map_err(|e| RamboError::RecipeParseError {
                path: recipe_path,
                details: e.to_string(),
            })?;
        Ok(RecipeEntry::Loaded(record))
    }
}

/// On-disk recipe schema shared by `meta.yaml` and `recipe.toml`
///
/// Sections that carry no planning information (about, source, test) are
/// accepted and ignored.
#[derive(Debug, Deserialize)]
struct RecipeDocument {
    package: PackageSection,
    #[serde(default)]
    build: Option<BuildSection>,
    #[serde(default)]
    requirements: Option<RequirementsSection>,
    #[serde(default)]
    outputs: Option<Vec<OutputSection>>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
    #[serde(deserialize_with = "scalar_text")]
    version: String,
}

#[derive(Debug, Default, Deserialize)]
struct BuildSection {
    #[serde(default, deserialize_with = "optional_scalar_text")]
    number: Option<String>,
    #[serde(default)]
    string: Option<String>,
    #[serde(default)]
    skip: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RequirementsSection {
    #[serde(default)]
    build: Option<Vec<String>>,
    #[serde(default)]
    host: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct OutputSection {
    name: String,
}

/// Reads a scalar written as a string or a bare number into its text
///
/// The YAML deserializer hands plain scalars to `deserialize_str` verbatim,
/// so `version: 2020.10` stays "2020.10" instead of passing through f64.
/// TOML has no such hook and numbers arrive typed; quote TOML versions that
/// end in zero.
fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(ScalarTextVisitor)
}

fn optional_scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalScalarTextVisitor)
}

struct ScalarTextVisitor;

impl<'de> Visitor<'de> for ScalarTextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
        // f64 Display drops a trailing ".0"; a version of 1.0 must stay "1.0"
        if v.fract() == 0.0 {
            Ok(format!("{:.1}", v))
        } else {
            Ok(v.to_string())
        }
    }
}

struct OptionalScalarTextVisitor;

impl<'de> Visitor<'de> for OptionalScalarTextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an optional string or number")
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        scalar_text(deserializer).map(Some)
    }
}

impl RecipeDocument {
    fn is_skipped(&self) -> bool {
        self.build
            .as_ref()
            .and_then(|b| b.skip)
            .unwrap_or(false)
    }

    /// `build.string` if given, otherwise the build number (default 0)
    fn build_string(&self) -> String {
        let build = self.build.as_ref();
        if let Some(s) = build.and_then(|b| b.string.as_ref()) {
            return s.trim().to_string();
        }
        build
            .and_then(|b| b.number.as_deref())
            .map_or_else(|| "0".to_string(), |n| n.trim().to_string())
    }

    fn requirement_specs(&self) -> impl Iterator<Item = &String> {
        let reqs = self.requirements.as_ref();
        let build = reqs.and_then(|r| r.build.as_deref()).unwrap_or_default();
        let host = reqs.and_then(|r| r.host.as_deref()).unwrap_or_default();
        build.iter().chain(host.iter())
    }

    fn artifact_names(&self) -> Vec<String> {
        let version = &self.package.version;
        let build_string = self.build_string();
        let artifact = |name: &str| {
            format!(
                "{}-{}-{}.{}",
                name.trim(),
                version.trim(),
                build_string,
                ARTIFACT_EXTENSION
            )
        };

        match self.outputs.as_deref() {
            Some(outputs) if !outputs.is_empty() => {
                outputs.iter().map(|o| artifact(&o.name)).collect()
            }
            _ => vec![artifact(&self.package.name)],
        }
    }

    fn into_record(self) -> Result<RecipeRecord> {
        let declared = self.requirement_specs().count();
        let dependencies: Vec<String> = self
            .requirement_specs()
            .filter_map(|spec| dependency_name(spec))
            .map(str::to_string)
            .collect();
        let artifacts = self.artifact_names();

        let record = RecipeRecord::from_parts(self.package.name.trim(), dependencies, artifacts)?;
        Ok(record.with_declared_dependency_count(declared))
    }
}

/// Package name of a requirement spec such as "numpy >=1.11" or "zlib>=1.2"
///
/// The name ends at the first whitespace or version operator. Specs that do
/// not start with a package name yield `None`.
fn dependency_name(spec: &str) -> Option<&str> {
    let token = spec.split_whitespace().next()?;
    let end = token
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_' || c == '.'))
        .unwrap_or(token.len());
    let name = &token[..end];
    (!name.is_empty()).then_some(name)
}
