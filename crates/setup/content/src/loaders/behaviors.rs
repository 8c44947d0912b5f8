//! Behavior preset loader.
//!
//! Loads driving-style presets from RON data files.

use std::collections::BTreeMap;
use std::path::Path;

use setup_core::{BehaviorCatalog, BehaviorProfile};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Registry for behavior presets.
///
/// Every profile is validated on load, so lookups never hand out
/// out-of-range coefficients.
#[derive(Debug, Clone, Default)]
pub struct BehaviorRegistry {
    profiles: BTreeMap<String, BehaviorProfile>,
}

impl BehaviorRegistry {
    /// Loads the presets from the embedded `behaviors.ron`.
    pub fn load() -> LoadResult<Self> {
        let behaviors_ron = include_str!("../../data/behaviors.ron");
        Self::from_ron(behaviors_ron)
            .map_err(|e| anyhow::anyhow!("Failed to parse behaviors.ron: {}", e))
    }

    /// Loads presets from a RON file holding a list of profiles.
    pub fn load_file(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let registry = Self::from_ron(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        debug!(path = %path.display(), behaviors = registry.len(), "loaded behavior presets");
        Ok(registry)
    }

    fn from_ron(content: &str) -> LoadResult<Self> {
        let list: Vec<BehaviorProfile> = ron::from_str(content)?;
        let mut registry = Self::default();
        for profile in list {
            registry.insert(profile)?;
        }
        Ok(registry)
    }

    /// Adds a profile, rejecting duplicates and out-of-range coefficients.
    pub fn insert(&mut self, profile: BehaviorProfile) -> LoadResult<()> {
        profile.validate()?;
        if self.profiles.contains_key(&profile.id) {
            anyhow::bail!("duplicate behavior id '{}'", profile.id);
        }
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&BehaviorProfile> {
        self.profiles.get(id)
    }

    /// Returns the number of registered behaviors.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no behaviors are registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl BehaviorCatalog for BehaviorRegistry {
    fn behavior(&self, id: &str) -> Option<BehaviorProfile> {
        self.profiles.get(id).cloned()
    }

    fn ids(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }
}
