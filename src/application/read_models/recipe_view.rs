//! Per-recipe view structs for the read model

/// View representation of one recipe at its place in the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub name: String,
    /// Zero-based index in the emitted order
    pub position: usize,
    /// Every declared build/host dependency, peer or not
    pub declared_dependency_count: usize,
    /// Peers present in the emitted plan, sorted
    pub peer_dependencies: Vec<String>,
    /// Positions of those peers in the emitted order
    pub peer_positions: Vec<usize>,
    /// True when every peer comes earlier
    pub position_ok: bool,
    pub artifacts: Vec<ArtifactView>,
}

/// An artifact the recipe produces and whether the channel already holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactView {
    pub name: String,
    /// `None` when no channel was consulted
    pub in_channel: Option<bool>,
}
