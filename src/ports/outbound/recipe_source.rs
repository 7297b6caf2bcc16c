use crate::build_planning::domain::RecipeRecord;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Outcome of loading one recipe directory
#[derive(Debug, Clone)]
pub enum RecipeEntry {
    Loaded(RecipeRecord),
    /// The recipe opts out of building (`build.skip`); carries the recipe name
    Skipped(String),
    /// The directory holds no recipe file; carries the directory name
    Missing(String),
}

/// What a recipe source found in a recipes directory
#[derive(Debug, Clone, Default)]
pub struct RecipeLoadResult {
    /// Parsed records, one per recipe directory that produced one
    pub records: Vec<RecipeRecord>,
    /// Names of recipes that declare `build.skip`
    pub skipped: Vec<String>,
    /// Names of directories holding no recipe file
    pub missing: Vec<String>,
}

impl RecipeLoadResult {
    pub fn push(&mut self, entry: RecipeEntry) {
        match entry {
            RecipeEntry::Loaded(record) => self.records.push(record),
            RecipeEntry::Skipped(name) => self.skipped.push(name),
            RecipeEntry::Missing(name) => self.missing.push(name),
        }
    }
}

/// RecipeSource port for turning a recipes directory into recipe records
///
/// Implementations own file format knowledge; the planning core only ever
/// sees `RecipeRecord`s.
pub trait RecipeSource {
    /// Lists the candidate recipe directories below `recipes_dir`
    ///
    /// # Errors
    /// Returns an error if `recipes_dir` is missing, is not a directory,
    /// or cannot be listed
    fn recipe_dirs(&self, recipes_dir: &Path) -> Result<Vec<PathBuf>>;

    /// Loads a single recipe directory
    ///
    /// # Errors
    /// Returns an error if a recipe file exists but cannot be read or parsed
    fn load_recipe(&self, recipe_dir: &Path) -> Result<RecipeEntry>;

    /// Loads every recipe below `recipes_dir`
    fn load_recipes(&self, recipes_dir: &Path) -> Result<RecipeLoadResult> {
        let mut result = RecipeLoadResult::default();
        for dir in self.recipe_dirs(recipes_dir)? {
            result.push(self.load_recipe(&dir)?);
        }
        Ok(result)
    }
}
