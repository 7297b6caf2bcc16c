use std::collections::BTreeSet;

/// ChannelIndex value object: artifact filenames already published in a channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelIndex {
    existing_artifact_names: BTreeSet<String>,
}

impl ChannelIndex {
    pub fn new(existing_artifact_names: BTreeSet<String>) -> Self {
        Self {
            existing_artifact_names,
        }
    }

    pub fn contains(&self, artifact_name: &str) -> bool {
        self.existing_artifact_names.contains(artifact_name)
    }

    /// True when every name in `artifact_names` is present.
    ///
    /// Subset semantics: an empty input is always satisfied.
    pub fn contains_all<'a, I>(&self, artifact_names: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        artifact_names.into_iter().all(|name| self.contains(name))
    }

    pub fn existing_artifact_names(&self) -> &BTreeSet<String> {
        &self.existing_artifact_names
    }

    pub fn len(&self) -> usize {
        self.existing_artifact_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.existing_artifact_names.is_empty()
    }
}

impl FromIterator<String> for ChannelIndex {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
