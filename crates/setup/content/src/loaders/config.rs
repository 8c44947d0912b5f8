//! Pipeline configuration loader.

use std::path::Path;

use setup_core::PipelineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for pipeline configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their builtin defaults.
    pub fn load(path: &Path) -> LoadResult<PipelineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses the embedded `config.toml`.
    pub fn builtin() -> LoadResult<PipelineConfig> {
        Self::parse(include_str!("../../data/config.toml"))
    }

    fn parse(content: &str) -> LoadResult<PipelineConfig> {
        let config: PipelineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if !(0.0..=1.0).contains(&config.large_clamp_fraction) {
            anyhow::bail!(
                "large_clamp_fraction must lie in [0, 1], got {}",
                config.large_clamp_fraction
            );
        }
        if config.critical_damping_fraction <= 0.0 {
            anyhow::bail!(
                "critical_damping_fraction must be positive, got {}",
                config.critical_damping_fraction
            );
        }
        Ok(config)
    }
}
