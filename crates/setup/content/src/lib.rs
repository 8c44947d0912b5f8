//! Data-driven setup content and loaders.
//!
//! This crate houses the data files the pipeline can run on instead of its
//! compiled-in tables, and loaders for them:
//! - Category targets (TOML)
//! - Behavior presets (RON)
//! - Pipeline configuration (TOML)
//! - Vehicle and track catalog (RON)
//! - Setup requests (TOML)
//!
//! Every file ships embedded in the crate and can also be read from disk, so
//! a user data directory can override any of them.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BehaviorRegistry, Catalog, CatalogLoader, ConfigLoader, ContentFactory, RequestLoader,
    TargetsLoader, TargetsTable,
};
