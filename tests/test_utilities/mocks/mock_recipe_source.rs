use rambo::prelude::*;
use std::path::{Path, PathBuf};

/// Mock RecipeSource serving in-memory recipe records
///
/// Directories are listed in insertion order so tests can check that the
/// plan does not depend on discovery order.
#[derive(Default)]
pub struct MockRecipeSource {
    entries: Vec<(String, RecipeEntry)>,
}

impl MockRecipeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe whose directory is named after the recipe
    pub fn with_recipe(self, name: &str, deps: &[&str], artifacts: &[&str]) -> Self {
        let record =
            RecipeRecord::from_parts(name, deps.iter().copied(), artifacts.iter().copied())
                .unwrap();
        self.with_entry(name, RecipeEntry::Loaded(record))
    }

    pub fn with_entry(mut self, dir: &str, entry: RecipeEntry) -> Self {
        self.entries.push((dir.to_string(), entry));
        self
    }
}

impl RecipeSource for MockRecipeSource {
    fn recipe_dirs(&self, recipes_dir: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .entries
            .iter()
            .map(|(dir, _)| recipes_dir.join(dir))
            .collect())
    }

    fn load_recipe(&self, recipe_dir: &Path) -> Result<RecipeEntry> {
        let name = recipe_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.entries
            .iter()
            .find(|(dir, _)| *dir == name)
            .map(|(_, entry)| entry.clone())
            .ok_or_else(|| anyhow::anyhow!("unknown recipe directory {}", name))
    }
}
