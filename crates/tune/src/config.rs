//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use setup_core::Conditions;

/// Settings that apply to every command.
#[derive(Clone, Debug, Default)]
pub struct TuneConfig {
    /// Directory holding user overrides of the content files.
    pub data_dir: Option<PathBuf>,
    /// Directory for the log file; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub ambient_c: Option<f64>,
    pub road_c: Option<f64>,
    pub pretty: bool,
}

impl TuneConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TUNE_DATA_DIR` - Content override directory (default: platform config dir)
    /// - `TUNE_LOG_DIR` - Write a log file here in addition to stderr
    /// - `TUNE_AMBIENT_C` - Ambient temperature when no snapshot is given
    /// - `TUNE_ROAD_C` - Road temperature when no snapshot is given
    /// - `TUNE_PRETTY` - Pretty-print JSON output (default: false)
    pub fn from_env() -> Self {
        let mut config = Self {
            data_dir: env::var("TUNE_DATA_DIR").ok().map(PathBuf::from),
            log_dir: env::var("TUNE_LOG_DIR").ok().map(PathBuf::from),
            ambient_c: read_env::<f64>("TUNE_AMBIENT_C"),
            road_c: read_env::<f64>("TUNE_ROAD_C"),
            pretty: false,
        };

        if let Some(pretty) = read_env::<bool>("TUNE_PRETTY") {
            config.pretty = pretty;
        } else if env::var("TUNE_PRETTY").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.pretty = true;
        }

        config
    }

    /// Temperature snapshot from the environment, filling a missing side
    /// from `fallback`.
    pub fn conditions(&self, fallback: Conditions) -> Option<Conditions> {
        if self.ambient_c.is_none() && self.road_c.is_none() {
            return None;
        }
        Some(Conditions::new(
            self.ambient_c.unwrap_or(fallback.ambient_c),
            self.road_c.unwrap_or(fallback.road_c),
        ))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
