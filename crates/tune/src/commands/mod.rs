//! Command implementations for `tune`
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod behaviors;
mod catalog;
mod generate;

pub use behaviors::Behaviors;
pub use catalog::CatalogList;
pub use generate::Generate;

use std::path::PathBuf;

use setup_content::ContentFactory;

use crate::config::TuneConfig;
use crate::dirs;

/// Content factory over the configured data directory.
pub(crate) fn content(config: &TuneConfig) -> ContentFactory {
    let data_dir: PathBuf = config.data_dir.clone().unwrap_or_else(dirs::data_dir);
    ContentFactory::new(data_dir)
}
