use crate::shared::Result;
use std::collections::BTreeSet;
use std::path::Path;

/// A build manifest: the recipes to plan and, optionally, the channel to cull against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub packages: BTreeSet<String>,
    pub channel_url: Option<String>,
}

/// ManifestReader port for loading a manifest file
pub trait ManifestReader {
    /// Reads and parses the manifest at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid manifest
    fn read_manifest(&self, path: &Path) -> Result<Manifest>;
}
