//! Setup request loader.

use std::path::Path;

use setup_core::SetupRequest;

use crate::loaders::{LoadResult, read_file};

/// Loader for setup requests from TOML files.
///
/// ```toml
/// behavior = "attack"
///
/// [vehicle]
/// id = "ks_porsche_911_gt3_r_2016"
/// class_tag = "GT3"
/// drivetrain = "RWD"
/// power_hp = 500.0
/// weight_kg = 1200.0
///
/// [track]
/// id = "spa"
/// track_type = "circuit"
///
/// [preferences]
/// aggression = 0.8
/// ```
pub struct RequestLoader;

impl RequestLoader {
    pub fn load(path: &Path) -> LoadResult<SetupRequest> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SetupRequest> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse request TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setup_core::{Drivetrain, TrackType};

    const REQUEST: &str = r#"
behavior = "attack"

[vehicle]
id = "ks_porsche_911_gt3_r_2016"
class_tag = "GT3"
drivetrain = "RWD"
power_hp = 500.0
weight_kg = 1200.0

[track]
id = "spa"
track_type = "circuit"

[preferences]
aero = 0.4
aggression = 0.8

[conditions]
ambient_c = 18.0
road_c = 22.0
"#;

    #[test]
    fn parses_a_full_request() {
        let request = RequestLoader::parse(REQUEST).unwrap();
        assert_eq!(request.behavior.as_deref(), Some("attack"));
        assert_eq!(request.vehicle.drivetrain, Drivetrain::Rwd);
        assert_eq!(request.vehicle.weight_kg, Some(1200.0));
        assert_eq!(request.track.track_type, TrackType::Circuit);

        let prefs = request.preferences.unwrap();
        assert_eq!(prefs.aggression, 0.8);
        assert_eq!(prefs.aero, 0.4);
        // unspecified sliders stay neutral
        assert_eq!(prefs.rotation, 0.5);
        assert_eq!(request.conditions.unwrap().road_c, 22.0);
    }

    #[test]
    fn optional_sections_may_be_omitted() {
        let request = RequestLoader::parse(
            "[vehicle]\nid = \"ks_mazda_mx5_nd\"\n\n[track]\nid = \"akina\"\ntrack_type = \"touge\"\n",
        )
        .unwrap();
        assert_eq!(request.behavior, None);
        assert_eq!(request.preferences, None);
        assert_eq!(request.behavior_id(), "balanced");
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.toml");
        std::fs::write(&path, REQUEST).unwrap();
        assert_eq!(RequestLoader::load(&path).unwrap(), RequestLoader::parse(REQUEST).unwrap());
    }

    #[test]
    fn sample_request_runs_through_the_pipeline() {
        let request =
            RequestLoader::parse(include_str!("../../data/requests/gt3_spa_attack.toml")).unwrap();
        let setup = setup_core::SetupPipeline::default().generate(&request).unwrap();
        assert_eq!(setup.behavior, "attack");
        assert_eq!(setup.category, setup_core::Category::Gt);
    }

    #[test]
    fn missing_vehicle_is_an_error() {
        let err = RequestLoader::parse("behavior = \"safe\"\n").unwrap_err();
        assert!(err.to_string().contains("request TOML"));
    }
}
