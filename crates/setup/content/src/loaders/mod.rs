//! Content loaders for reading setup data from files.
//!
//! Each loader turns a RON/TOML file into a `setup-core` table or request.
//! Builtin copies of every table are embedded at compile time.

pub mod behaviors;
pub mod catalog;
pub mod config;
pub mod factory;
pub mod request;
pub mod targets;

pub use behaviors::BehaviorRegistry;
pub use catalog::{Catalog, CatalogLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use request::RequestLoader;
pub use targets::{TargetsLoader, TargetsTable};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
