//! Generate command
//!
//! Builds a request from a TOML file or from catalog ids, runs it through the
//! pipeline and prints the result as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use serde::Serialize;
use setup_content::RequestLoader;
use setup_core::{
    ChangeRecord, ClampEvent, Conditions, DriverPreferenceProfile, GeneratedSetup, SetupRequest,
    SetupSheet,
};
use tracing::info;

use super::content;
use crate::config::TuneConfig;

/// Generate a setup and print it as JSON
#[derive(Parser, Debug)]
pub struct Generate {
    /// Read the whole request from a TOML file
    #[arg(long, conflicts_with_all = ["vehicle", "track"])]
    pub request: Option<PathBuf>,

    /// Catalog vehicle id
    #[arg(long, requires = "track")]
    pub vehicle: Option<String>,

    /// Catalog track id
    #[arg(long, requires = "vehicle")]
    pub track: Option<String>,

    /// Behavior id (recommended from the sliders when omitted)
    #[arg(short, long)]
    pub behavior: Option<String>,

    #[command(flatten)]
    pub sliders: Sliders,

    /// Ambient temperature (°C)
    #[arg(long)]
    pub ambient: Option<f64>,

    /// Road temperature (°C)
    #[arg(long)]
    pub road: Option<f64>,

    /// Include the per-stage change log
    #[arg(long)]
    pub changes: bool,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Driver-preference sliders, each in `[0, 1]`.
#[derive(Args, Debug, Default)]
pub struct Sliders {
    #[arg(long)]
    pub aero: Option<f64>,
    #[arg(long)]
    pub rotation: Option<f64>,
    #[arg(long)]
    pub slide: Option<f64>,
    #[arg(long)]
    pub aggression: Option<f64>,
    #[arg(long)]
    pub drift: Option<f64>,
    #[arg(long)]
    pub performance: Option<f64>,
    #[arg(long)]
    pub grip: Option<f64>,
}

impl Sliders {
    /// Neutral profile with the given sliders overridden; `None` when no
    /// slider was set.
    pub fn profile(&self) -> Option<DriverPreferenceProfile> {
        let overrides = [
            self.aero,
            self.rotation,
            self.slide,
            self.aggression,
            self.drift,
            self.performance,
            self.grip,
        ];
        if overrides.iter().all(Option::is_none) {
            return None;
        }
        let neutral = DriverPreferenceProfile::neutral();
        Some(DriverPreferenceProfile {
            aero: self.aero.unwrap_or(neutral.aero),
            rotation: self.rotation.unwrap_or(neutral.rotation),
            slide: self.slide.unwrap_or(neutral.slide),
            aggression: self.aggression.unwrap_or(neutral.aggression),
            drift: self.drift.unwrap_or(neutral.drift),
            performance: self.performance.unwrap_or(neutral.performance),
            grip: self.grip.unwrap_or(neutral.grip),
        })
    }
}

/// JSON document printed by `generate`.
#[derive(Serialize)]
struct Output<'a> {
    setup: SetupSheet,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<&'a [ChangeRecord]>,
    clamps: &'a [ClampEvent],
}

impl Generate {
    pub fn execute(self, config: &TuneConfig) -> Result<()> {
        let factory = content(config);
        let pipeline = factory.pipeline()?;
        let request = self.build_request(config, Conditions::from_config(pipeline.config()))?;

        let setup = pipeline
            .generate(&request)
            .with_context(|| format!("Failed to generate setup for {}", request.vehicle.id))?;
        info!(
            vehicle = %request.vehicle.id,
            behavior = %setup.behavior,
            parameters = setup.parameters.len(),
            "setup ready"
        );

        let json = self.render(&setup, self.pretty || config.pretty)?;
        match &self.output {
            Some(path) => std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => println!("{json}"),
        }
        Ok(())
    }

    fn build_request(&self, config: &TuneConfig, defaults: Conditions) -> Result<SetupRequest> {
        let mut request = match (&self.request, &self.vehicle, &self.track) {
            (Some(path), _, _) => RequestLoader::load(path)?,
            (None, Some(vehicle_id), Some(track_id)) => {
                let catalog = content(config).load_catalog()?;
                let vehicle = catalog
                    .vehicle(vehicle_id)
                    .with_context(|| format!("Unknown vehicle '{vehicle_id}'"))?;
                let track = catalog
                    .track(track_id)
                    .with_context(|| format!("Unknown track '{track_id}'"))?;
                SetupRequest::new(vehicle.clone(), track.clone())
            }
            _ => anyhow::bail!("pass either --request or both --vehicle and --track"),
        };

        if let Some(behavior) = &self.behavior {
            request.behavior = Some(behavior.clone());
        }
        if let Some(preferences) = self.sliders.profile() {
            request.preferences = Some(preferences);
        }

        // flags win over the request file, which wins over the environment
        let snapshot = request.conditions.or_else(|| config.conditions(defaults));
        let base = snapshot.unwrap_or(defaults);
        if snapshot.is_some() || self.ambient.is_some() || self.road.is_some() {
            request.conditions = Some(Conditions::new(
                self.ambient.unwrap_or(base.ambient_c),
                self.road.unwrap_or(base.road_c),
            ));
        }
        Ok(request)
    }

    fn render(&self, setup: &GeneratedSetup, pretty: bool) -> Result<String> {
        let output = Output {
            setup: setup.sheet(),
            changes: self.changes.then_some(setup.changes.as_slice()),
            clamps: &setup.clamp_events,
        };
        let json = if pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        json.context("Failed to serialize setup")
    }
}
