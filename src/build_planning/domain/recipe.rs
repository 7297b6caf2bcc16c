use crate::shared::Result;
use std::collections::BTreeSet;

/// Maximum length for recipe identities (security limit)
const MAX_RECIPE_ID_LENGTH: usize = 255;

/// NewType wrapper for a recipe identity with validation
///
/// Identities order lexicographically by their string value, which is the
/// tie-break rule used when sorting recipes that are not related by a path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            anyhow::bail!("Recipe identity cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if id.len() > MAX_RECIPE_ID_LENGTH {
            anyhow::bail!(
                "Recipe identity is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_RECIPE_ID_LENGTH
            );
        }

        // Conda package names: alphanumeric plus a small set of separators
        if !id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Recipe identity '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, and dots are allowed.",
                id
            );
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for RecipeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// RecipeRecord value object: the declarative view of one build recipe
///
/// Holds only what build ordering and culling need: the recipe identity,
/// the names of other recipes it needs at build time, and the artifact
/// filenames a build of it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRecord {
    identity: RecipeId,
    peer_dependencies: BTreeSet<RecipeId>,
    artifact_names: BTreeSet<String>,
    declared_dependency_count: usize,
}

impl RecipeRecord {
    pub fn new(
        identity: RecipeId,
        peer_dependencies: BTreeSet<RecipeId>,
        artifact_names: BTreeSet<String>,
    ) -> Self {
        let declared_dependency_count = peer_dependencies.len();
        Self {
            identity,
            peer_dependencies,
            artifact_names,
            declared_dependency_count,
        }
    }

    /// Convenience constructor from plain strings, validating every identity
    pub fn from_parts<I, D, A>(identity: I, peer_dependencies: D, artifact_names: A) -> Result<Self>
    where
        I: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let identity = RecipeId::new(identity)?;
        let peer_dependencies = peer_dependencies
            .into_iter()
            .map(RecipeId::new)
            .collect::<Result<BTreeSet<_>>>()?;
        let artifact_names = artifact_names.into_iter().map(Into::into).collect();

        Ok(Self::new(identity, peer_dependencies, artifact_names))
    }

    /// Records how many build requirements the recipe declared in total,
    /// including ones on packages outside the collection.
    pub fn with_declared_dependency_count(mut self, count: usize) -> Self {
        self.declared_dependency_count = count.max(self.peer_dependencies.len());
        self
    }

    pub fn identity(&self) -> &RecipeId {
        &self.identity
    }

    pub fn name(&self) -> &str {
        self.identity.as_str()
    }

    pub fn peer_dependencies(&self) -> &BTreeSet<RecipeId> {
        &self.peer_dependencies
    }

    pub fn artifact_names(&self) -> &BTreeSet<String> {
        &self.artifact_names
    }

    pub fn declared_dependency_count(&self) -> usize {
        self.declared_dependency_count
    }

    pub fn depends_on(&self, other: &RecipeId) -> bool {
        self.peer_dependencies.contains(other)
    }
}
