//! Vehicle and track catalog loader.

use std::path::Path;

use setup_core::{TrackDescriptor, VehicleDescriptor};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Known vehicles and tracks.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub vehicles: Vec<VehicleDescriptor>,
    #[serde(default)]
    pub tracks: Vec<TrackDescriptor>,
}

impl Catalog {
    /// Loads the embedded sample catalog.
    pub fn builtin() -> LoadResult<Self> {
        ron::from_str(include_str!("../../data/catalog.ron"))
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog.ron: {}", e))
    }

    pub fn vehicle(&self, id: &str) -> Option<&VehicleDescriptor> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn track(&self, id: &str) -> Option<&TrackDescriptor> {
        self.tracks.iter().find(|t| t.id == id)
    }
}

/// Loader for vehicle/track catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    ///
    /// Duplicate vehicle or track ids are rejected.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        let catalog: Catalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        for (i, vehicle) in catalog.vehicles.iter().enumerate() {
            if catalog.vehicles[..i].iter().any(|v| v.id == vehicle.id) {
                anyhow::bail!("duplicate vehicle id '{}'", vehicle.id);
            }
        }
        for (i, track) in catalog.tracks.iter().enumerate() {
            if catalog.tracks[..i].iter().any(|t| t.id == track.id) {
                anyhow::bail!("duplicate track id '{}'", track.id);
            }
        }

        debug!(
            path = %path.display(),
            vehicles = catalog.vehicles.len(),
            tracks = catalog.tracks.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
