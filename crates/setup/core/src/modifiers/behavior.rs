//! Named driving-style presets.
//!
//! A behavior is a coefficient vector in `[-1, 1]`, one coefficient per
//! [`BehaviorAxis`]. The engine turns each non-zero coefficient into a fixed
//! effect scaled by the coefficient, collects every contribution per
//! parameter and applies them once.

use tracing::debug;

use crate::error::{SetupError, require_within};
use crate::params::{ParamKey, ParamKind, Representation, SetupParameterSet};
use crate::report::{ChangeRecord, Stage};

use super::adjust::{Effect, Op, ParameterAdjustments, Target};
use super::profile::DriverPreferenceProfile;

/// Setup dimension a behavior coefficient acts on.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BehaviorAxis {
    Stiffness,
    Damping,
    RideHeight,
    ArbFront,
    ArbRear,
    DiffPower,
    DiffCoast,
    DiffPreload,
    CamberFront,
    CamberRear,
    ToeFront,
    ToeRear,
    BrakeBias,
    BrakePower,
    TyrePressure,
}

const CLICK_STEP: Op = Op::Clicks(2.0);

const STIFFNESS: &[Effect] =
    &[Effect::new(Target::all(ParamKind::Spring), Op::Scale(0.30)).in_clicks(CLICK_STEP)];
const DAMPING: &[Effect] = &[
    Effect::new(Target::all(ParamKind::Bump), Op::Scale(0.25)).in_clicks(CLICK_STEP),
    Effect::new(Target::all(ParamKind::Rebound), Op::Scale(0.25)).in_clicks(CLICK_STEP),
    Effect::new(Target::all(ParamKind::FastBump), Op::Scale(0.25)).in_clicks(CLICK_STEP),
    Effect::new(Target::all(ParamKind::FastRebound), Op::Scale(0.25)).in_clicks(CLICK_STEP),
];
const RIDE_HEIGHT: &[Effect] = &[Effect::new(Target::all(ParamKind::RideHeight), Op::Add(10.0))];
const ARB_FRONT: &[Effect] =
    &[Effect::new(Target::front(ParamKind::Arb), Op::Scale(0.30)).in_clicks(CLICK_STEP)];
const ARB_REAR: &[Effect] =
    &[Effect::new(Target::rear(ParamKind::Arb), Op::Scale(0.30)).in_clicks(CLICK_STEP)];
const DIFF_POWER: &[Effect] = &[Effect::new(Target::Key(ParamKey::DiffPower), Op::Scale(0.40))];
const DIFF_COAST: &[Effect] = &[Effect::new(Target::Key(ParamKey::DiffCoast), Op::Scale(0.40))];
const DIFF_PRELOAD: &[Effect] =
    &[Effect::new(Target::Key(ParamKey::DiffPreload), Op::Scale(0.40))];
// positive coefficients mean more grip, i.e. more negative camber
const CAMBER_FRONT: &[Effect] = &[Effect::new(Target::front(ParamKind::Camber), Op::Add(-1.0))];
const CAMBER_REAR: &[Effect] = &[Effect::new(Target::rear(ParamKind::Camber), Op::Add(-0.8))];
const TOE_FRONT: &[Effect] = &[Effect::new(Target::front(ParamKind::Toe), Op::Add(0.15))];
const TOE_REAR: &[Effect] = &[Effect::new(Target::rear(ParamKind::Toe), Op::Add(0.15))];
const BRAKE_BIAS: &[Effect] = &[Effect::new(Target::Key(ParamKey::BrakeBias), Op::Add(5.0))];
const BRAKE_POWER: &[Effect] =
    &[Effect::new(Target::Key(ParamKey::BrakePower), Op::Scale(0.20))];
const TYRE_PRESSURE: &[Effect] = &[Effect::new(Target::all(ParamKind::Pressure), Op::Add(2.0))];

impl BehaviorAxis {
    /// Effects of this axis at coefficient 1.0.
    ///
    /// Absolute representations get proportional changes; click-based
    /// parameters get small whole-click deltas instead.
    pub const fn effects(&self) -> &'static [Effect] {
        match self {
            Self::Stiffness => STIFFNESS,
            Self::Damping => DAMPING,
            Self::RideHeight => RIDE_HEIGHT,
            Self::ArbFront => ARB_FRONT,
            Self::ArbRear => ARB_REAR,
            Self::DiffPower => DIFF_POWER,
            Self::DiffCoast => DIFF_COAST,
            Self::DiffPreload => DIFF_PRELOAD,
            Self::CamberFront => CAMBER_FRONT,
            Self::CamberRear => CAMBER_REAR,
            Self::ToeFront => TOE_FRONT,
            Self::ToeRear => TOE_REAR,
            Self::BrakeBias => BRAKE_BIAS,
            Self::BrakePower => BRAKE_POWER,
            Self::TyrePressure => TYRE_PRESSURE,
        }
    }
}

/// Coefficient per behavior axis, each in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorCoefficients {
    pub stiffness: f64,
    pub damping: f64,
    pub ride_height: f64,
    pub arb_front: f64,
    pub arb_rear: f64,
    pub diff_power: f64,
    pub diff_coast: f64,
    pub diff_preload: f64,
    pub camber_front: f64,
    pub camber_rear: f64,
    pub toe_front: f64,
    pub toe_rear: f64,
    pub brake_bias: f64,
    pub brake_power: f64,
    pub tyre_pressure: f64,
}

impl BehaviorCoefficients {
    /// All-zero coefficients; applying them changes nothing.
    pub const ZERO: Self = Self {
        stiffness: 0.0,
        damping: 0.0,
        ride_height: 0.0,
        arb_front: 0.0,
        arb_rear: 0.0,
        diff_power: 0.0,
        diff_coast: 0.0,
        diff_preload: 0.0,
        camber_front: 0.0,
        camber_rear: 0.0,
        toe_front: 0.0,
        toe_rear: 0.0,
        brake_bias: 0.0,
        brake_power: 0.0,
        tyre_pressure: 0.0,
    };

    pub const fn get(&self, axis: BehaviorAxis) -> f64 {
        match axis {
            BehaviorAxis::Stiffness => self.stiffness,
            BehaviorAxis::Damping => self.damping,
            BehaviorAxis::RideHeight => self.ride_height,
            BehaviorAxis::ArbFront => self.arb_front,
            BehaviorAxis::ArbRear => self.arb_rear,
            BehaviorAxis::DiffPower => self.diff_power,
            BehaviorAxis::DiffCoast => self.diff_coast,
            BehaviorAxis::DiffPreload => self.diff_preload,
            BehaviorAxis::CamberFront => self.camber_front,
            BehaviorAxis::CamberRear => self.camber_rear,
            BehaviorAxis::ToeFront => self.toe_front,
            BehaviorAxis::ToeRear => self.toe_rear,
            BehaviorAxis::BrakeBias => self.brake_bias,
            BehaviorAxis::BrakePower => self.brake_power,
            BehaviorAxis::TyrePressure => self.tyre_pressure,
        }
    }

    pub fn set(&mut self, axis: BehaviorAxis, value: f64) {
        let slot = match axis {
            BehaviorAxis::Stiffness => &mut self.stiffness,
            BehaviorAxis::Damping => &mut self.damping,
            BehaviorAxis::RideHeight => &mut self.ride_height,
            BehaviorAxis::ArbFront => &mut self.arb_front,
            BehaviorAxis::ArbRear => &mut self.arb_rear,
            BehaviorAxis::DiffPower => &mut self.diff_power,
            BehaviorAxis::DiffCoast => &mut self.diff_coast,
            BehaviorAxis::DiffPreload => &mut self.diff_preload,
            BehaviorAxis::CamberFront => &mut self.camber_front,
            BehaviorAxis::CamberRear => &mut self.camber_rear,
            BehaviorAxis::ToeFront => &mut self.toe_front,
            BehaviorAxis::ToeRear => &mut self.toe_rear,
            BehaviorAxis::BrakeBias => &mut self.brake_bias,
            BehaviorAxis::BrakePower => &mut self.brake_power,
            BehaviorAxis::TyrePressure => &mut self.tyre_pressure,
        };
        *slot = value;
    }

    /// Non-zero coefficients, in axis order.
    pub fn active(&self) -> impl Iterator<Item = (BehaviorAxis, f64)> + '_ {
        use strum::IntoEnumIterator;
        BehaviorAxis::iter()
            .map(|axis| (axis, self.get(axis)))
            .filter(|(_, c)| *c != 0.0)
    }

    /// Linear blend, `t = 0` is `self` and `t = 1` is `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        use strum::IntoEnumIterator;
        let mut out = Self::ZERO;
        for axis in BehaviorAxis::iter() {
            out.set(axis, self.get(axis) * (1.0 - t) + other.get(axis) * t);
        }
        out
    }
}

/// Builtin preset ids.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Preset {
    Safe,
    Balanced,
    Attack,
    Drift,
}

/// A named coefficient vector encoding a driving-style bias.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorProfile {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub coefficients: BehaviorCoefficients,
}

impl BehaviorProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coefficients: BehaviorCoefficients,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            coefficients,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Rejects coefficients outside `[-1, 1]`.
    pub fn validate(&self) -> Result<(), SetupError> {
        use strum::IntoEnumIterator;
        for axis in BehaviorAxis::iter() {
            require_within(
                format!("behavior {}.{axis}", self.id),
                self.coefficients.get(axis),
                -1.0,
                1.0,
            )?;
        }
        Ok(())
    }

    /// Blends two behaviors; `t` is clamped into `[0, 1]`.
    pub fn blend(a: &BehaviorProfile, b: &BehaviorProfile, t: f64) -> BehaviorProfile {
        let t = t.clamp(0.0, 1.0);
        BehaviorProfile::new(
            format!("{}_{}_{:.0}", a.id, b.id, t * 100.0),
            format!("{} / {} blend", a.name, b.name),
            a.coefficients.lerp(&b.coefficients, t),
        )
    }

    pub fn preset(preset: Preset) -> BehaviorProfile {
        let (name, description, coefficients) = match preset {
            Preset::Safe => (
                "Safe",
                "Stable and forgiving; understeer bias, soft diff",
                BehaviorCoefficients {
                    stiffness: -0.3,
                    damping: -0.2,
                    ride_height: 0.1,
                    arb_front: -0.2,
                    arb_rear: -0.3,
                    diff_power: -0.4,
                    diff_coast: -0.3,
                    diff_preload: -0.2,
                    camber_front: -0.2,
                    camber_rear: -0.2,
                    toe_front: 0.1,
                    toe_rear: 0.2,
                    brake_bias: 0.1,
                    brake_power: -0.1,
                    tyre_pressure: -0.1,
                },
            ),
            Preset::Balanced => (
                "Balanced",
                "Category targets unchanged",
                BehaviorCoefficients::ZERO,
            ),
            Preset::Attack => (
                "Attack",
                "Sharp and responsive; stiffer platform, more lock",
                BehaviorCoefficients {
                    stiffness: 0.3,
                    damping: 0.2,
                    ride_height: -0.2,
                    arb_front: 0.2,
                    arb_rear: 0.1,
                    diff_power: 0.3,
                    diff_coast: 0.2,
                    diff_preload: 0.2,
                    camber_front: 0.3,
                    camber_rear: 0.2,
                    toe_front: -0.1,
                    toe_rear: 0.1,
                    brake_bias: 0.0,
                    brake_power: 0.1,
                    tyre_pressure: 0.1,
                },
            ),
            Preset::Drift => (
                "Drift",
                "Oversteer bias; locked diff, soft rear roll stiffness",
                BehaviorCoefficients {
                    stiffness: 0.1,
                    damping: 0.1,
                    ride_height: 0.0,
                    arb_front: 0.3,
                    arb_rear: -0.2,
                    diff_power: 0.6,
                    diff_coast: 0.4,
                    diff_preload: 0.3,
                    camber_front: 0.1,
                    camber_rear: -0.3,
                    toe_front: -0.1,
                    toe_rear: -0.1,
                    brake_bias: -0.2,
                    brake_power: 0.0,
                    tyre_pressure: 0.2,
                },
            ),
        };
        BehaviorProfile::new(preset.as_ref(), name, coefficients).with_description(description)
    }
}

/// Picks a preset that suits a driver's slider profile.
///
/// - drift above 0.6 → drift
/// - aggression above 0.6 with rotation at least neutral → attack
/// - low aggression and understeer-leaning rotation → safe
/// - otherwise balanced
pub fn recommend(preferences: &DriverPreferenceProfile) -> Preset {
    if preferences.drift > 0.6 {
        Preset::Drift
    } else if preferences.aggression > 0.6 && preferences.rotation >= 0.5 {
        Preset::Attack
    } else if preferences.aggression < 0.4 && preferences.rotation < 0.4 {
        Preset::Safe
    } else {
        Preset::Balanced
    }
}

/// Read-only source of behavior profiles.
pub trait BehaviorCatalog: Send + Sync {
    fn behavior(&self, id: &str) -> Option<BehaviorProfile>;

    /// Ids available from this catalog.
    fn ids(&self) -> Vec<String>;
}

/// The four builtin presets.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinBehaviors;

impl BehaviorCatalog for BuiltinBehaviors {
    fn behavior(&self, id: &str) -> Option<BehaviorProfile> {
        id.parse::<Preset>().ok().map(BehaviorProfile::preset)
    }

    fn ids(&self) -> Vec<String> {
        use strum::IntoEnumIterator;
        Preset::iter().map(|p| p.to_string()).collect()
    }
}

/// Applies a behavior profile to a parameter set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BehaviorEngine;

impl BehaviorEngine {
    pub fn new() -> Self {
        Self
    }

    /// Sums every active axis per parameter, then applies once.
    ///
    /// `representation` must be the tag the set was assembled with; it picks
    /// click deltas or proportional changes for springs, dampers and ARBs.
    pub fn apply(
        &self,
        set: &mut SetupParameterSet,
        behavior: &BehaviorProfile,
        representation: Representation,
    ) -> Result<Vec<ChangeRecord>, SetupError> {
        behavior.validate()?;

        let mut adjustments = ParameterAdjustments::new();
        for (axis, coefficient) in behavior.coefficients.active() {
            for effect in axis.effects() {
                adjustments.collect(set, effect, coefficient, representation);
            }
        }

        let changes = adjustments.apply(set, Stage::Behavior);
        debug!(
            behavior = %behavior.id,
            %representation,
            changed = changes.len(),
            "applied behavior"
        );
        Ok(changes)
    }
}
