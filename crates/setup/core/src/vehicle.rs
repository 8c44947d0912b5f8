//! Read-only request inputs: vehicle, track and temperature snapshot.
//!
//! Descriptors are supplied by an external catalog and never mutated by the
//! pipeline. Optional enrichments (wheelbase, torque, motion ratios) fall back
//! to category or physical defaults; fields a formula cannot do without are
//! validated where they are consumed.

use crate::config::PipelineConfig;
use crate::error::{SetupError, require_positive};

/// Which wheels drive the car.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Drivetrain {
    #[default]
    Rwd,
    Fwd,
    Awd,
}

/// Front or rear axle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Axle {
    Front,
    Rear,
}

/// Vehicle identity and physical data.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleDescriptor {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drivetrain: Drivetrain,
    pub power_hp: Option<f64>,
    pub weight_kg: Option<f64>,
    pub wheelbase_mm: Option<f64>,
    pub max_torque_nm: Option<f64>,
    pub motion_ratio_front: Option<f64>,
    pub motion_ratio_rear: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_drift: bool,

    /// Spring value found in the vehicle's stock setup.
    ///
    /// Used once to detect whether the simulator stores springs as click
    /// indices or physical rates.
    pub reference_spring: Option<f64>,

    /// Toe value found in the vehicle's stock setup, used once to detect the
    /// alignment decimal scale.
    pub reference_toe: Option<f64>,
}

impl VehicleDescriptor {
    pub fn new(id: impl Into<String>, drivetrain: Drivetrain) -> Self {
        Self {
            id: id.into(),
            drivetrain,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_class_tag(mut self, class_tag: impl Into<String>) -> Self {
        self.class_tag = class_tag.into();
        self
    }

    #[must_use]
    pub fn with_power_hp(mut self, power_hp: f64) -> Self {
        self.power_hp = Some(power_hp);
        self
    }

    #[must_use]
    pub fn with_weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    #[must_use]
    pub fn with_wheelbase_mm(mut self, wheelbase_mm: f64) -> Self {
        self.wheelbase_mm = Some(wheelbase_mm);
        self
    }

    #[must_use]
    pub fn with_max_torque_nm(mut self, torque_nm: f64) -> Self {
        self.max_torque_nm = Some(torque_nm);
        self
    }

    #[must_use]
    pub fn with_motion_ratios(mut self, front: f64, rear: f64) -> Self {
        self.motion_ratio_front = Some(front);
        self.motion_ratio_rear = Some(rear);
        self
    }

    #[must_use]
    pub fn with_drift_flag(mut self, is_drift: bool) -> Self {
        self.is_drift = is_drift;
        self
    }

    #[must_use]
    pub fn with_reference_spring(mut self, value: f64) -> Self {
        self.reference_spring = Some(value);
        self
    }

    #[must_use]
    pub fn with_reference_toe(mut self, value: f64) -> Self {
        self.reference_toe = Some(value);
        self
    }

    /// Power-to-weight in hp/kg, when both figures are known and positive.
    pub fn power_to_weight(&self) -> Option<f64> {
        match (self.power_hp, self.weight_kg) {
            (Some(hp), Some(kg)) if hp > 0.0 && kg > 0.0 => Some(hp / kg),
            _ => None,
        }
    }

    /// Static load on one wheel, assuming an even split over four corners.
    pub fn corner_mass_kg(&self) -> Result<f64, SetupError> {
        let weight = self.weight_kg.ok_or_else(|| SetupError::missing("weight_kg"))?;
        Ok(require_positive("weight_kg", weight)? / 4.0)
    }

    /// Peak torque, estimated from power when the catalog has no figure.
    pub fn effective_torque_nm(&self) -> f64 {
        match (self.max_torque_nm, self.power_hp) {
            (Some(torque), _) if torque > 0.0 => torque,
            (_, Some(hp)) if hp > 0.0 => hp * PipelineConfig::HP_TO_TORQUE,
            _ => PipelineConfig::FALLBACK_TORQUE_NM,
        }
    }

    /// Per-vehicle motion ratio for an axle, if the catalog supplies one.
    pub fn motion_ratio(&self, axle: Axle) -> Option<f64> {
        match axle {
            Axle::Front => self.motion_ratio_front,
            Axle::Rear => self.motion_ratio_rear,
        }
    }

    /// Lower-cased alphanumeric tokens of id, name and class tag.
    pub fn tokens(&self) -> Vec<String> {
        split_tokens([&self.id, &self.name, &self.class_tag])
    }

    /// Tokens of id and name only.
    pub fn name_tokens(&self) -> Vec<String> {
        split_tokens([&self.id, &self.name])
    }
}

fn split_tokens<'a>(fields: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    fields
        .into_iter()
        .flat_map(|field| field.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Surface character of a track.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrackType {
    #[default]
    Circuit,
    Touge,
    Street,
}

const TOUGE_KEYWORDS: &[&str] = &[
    "touge",
    "akina",
    "usui",
    "irohazaka",
    "haruna",
    "myogi",
    "sadamine",
    "happogahara",
    "tsuchisaka",
    "shomaru",
];

const STREET_KEYWORDS: &[&str] = &["street", "city", "urban", "highway", "shutoko", "wangan"];

impl TrackType {
    /// Rough surfaces get a capped fast-damping channel.
    pub const fn is_rough(&self) -> bool {
        matches!(self, Self::Touge | Self::Street)
    }

    /// Infers a type tag from a track id or display name.
    ///
    /// Catalogs for community tracks rarely carry a type; well-known mountain
    /// passes and street layouts are recognizable by name.
    pub fn detect(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if TOUGE_KEYWORDS.iter().any(|k| name.contains(k)) {
            Self::Touge
        } else if STREET_KEYWORDS.iter().any(|k| name.contains(k)) {
            Self::Street
        } else {
            Self::Circuit
        }
    }
}

/// Track identity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackDescriptor {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub track_type: TrackType,
    pub average_speed_kph: Option<f64>,
}

impl TrackDescriptor {
    pub fn new(id: impl Into<String>, track_type: TrackType) -> Self {
        Self {
            id: id.into(),
            track_type,
            ..Self::default()
        }
    }

    /// Builds a descriptor whose type is inferred from its name.
    pub fn from_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let name = name.into();
        let track_type = TrackType::detect(&format!("{id} {name}"));
        Self {
            id,
            name,
            track_type,
            average_speed_kph: None,
        }
    }

    #[must_use]
    pub fn with_average_speed_kph(mut self, speed: f64) -> Self {
        self.average_speed_kph = Some(speed);
        self
    }
}

/// Temperature snapshot taken when the setup is requested.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conditions {
    pub ambient_c: f64,
    pub road_c: f64,
}

impl Conditions {
    pub const fn new(ambient_c: f64, road_c: f64) -> Self {
        Self { ambient_c, road_c }
    }

    /// Conditions used when telemetry is unavailable.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.default_ambient_c, config.default_road_c)
    }
}

impl Default for Conditions {
    fn default() -> Self {
        Self::new(PipelineConfig::DEFAULT_AMBIENT_C, PipelineConfig::DEFAULT_ROAD_C)
    }
}
