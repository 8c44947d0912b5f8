//! Content factory for building pipelines from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use setup_core::{PipelineConfig, SetupPipeline};
use tracing::{debug, info};

use crate::loaders::{
    BehaviorRegistry, Catalog, CatalogLoader, ConfigLoader, LoadResult, TargetsLoader,
    TargetsTable,
};

/// Content factory that loads setup tables from a data directory.
///
/// Files that are absent fall back to the embedded copies, so an empty or
/// partially populated directory is valid.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── categories.toml
/// ├── behaviors.ron
/// └── catalog.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load pipeline configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<PipelineConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::builtin()
        }
    }

    /// Load category targets from `categories.toml`.
    pub fn load_targets(&self) -> LoadResult<TargetsTable> {
        let path = self.data_dir.join("categories.toml");
        if path.exists() {
            TargetsLoader::load(&path)
        } else {
            TargetsTable::builtin()
        }
    }

    /// Load behavior presets from `behaviors.ron`.
    pub fn load_behaviors(&self) -> LoadResult<BehaviorRegistry> {
        let path = self.data_dir.join("behaviors.ron");
        if path.exists() {
            BehaviorRegistry::load_file(&path)
        } else {
            BehaviorRegistry::load()
        }
    }

    /// Load the vehicle/track catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let path = self.data_dir.join("catalog.ron");
        if path.exists() {
            CatalogLoader::load(&path)
        } else {
            Catalog::builtin()
        }
    }

    /// Builds a pipeline over this directory's config, targets and behaviors.
    pub fn pipeline(&self) -> LoadResult<SetupPipeline> {
        let config = self.load_config()?;
        let targets = self.load_targets()?;
        let behaviors = self.load_behaviors()?;
        debug!(
            categories = targets.len(),
            behaviors = behaviors.len(),
            "content tables ready"
        );
        info!(data_dir = %self.data_dir.display(), "loaded setup content");

        Ok(SetupPipeline::new(config)
            .with_targets(Arc::new(targets))
            .with_behaviors(Arc::new(behaviors)))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
