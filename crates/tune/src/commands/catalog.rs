//! List catalog command

use anyhow::Result;
use clap::Parser;
use console::style;
use setup_core::classify;

use super::content;
use crate::config::TuneConfig;

/// List catalog vehicles and tracks
#[derive(Parser, Debug)]
pub struct CatalogList {
    /// Only list vehicles
    #[arg(long)]
    pub vehicles: bool,

    /// Only list tracks
    #[arg(long)]
    pub tracks: bool,
}

impl CatalogList {
    pub fn execute(self, config: &TuneConfig) -> Result<()> {
        let catalog = content(config).load_catalog()?;
        let show_vehicles = self.vehicles || !self.tracks;
        let show_tracks = self.tracks || !self.vehicles;

        if show_vehicles {
            println!("{}", style("Vehicles").yellow().bold());
            for vehicle in &catalog.vehicles {
                println!(
                    "  {} {} {}",
                    style(&vehicle.id).cyan(),
                    style(classify(vehicle)).green(),
                    style(&vehicle.name).dim()
                );
            }
        }
        if show_vehicles && show_tracks {
            println!();
        }
        if show_tracks {
            println!("{}", style("Tracks").yellow().bold());
            for track in &catalog.tracks {
                println!(
                    "  {} {} {}",
                    style(&track.id).cyan(),
                    style(track.track_type).green(),
                    style(&track.name).dim()
                );
            }
        }
        Ok(())
    }
}
