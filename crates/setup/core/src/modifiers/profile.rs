//! Continuous driver-preference sliders.
//!
//! Each slider maps to a fixed set of parameter deltas. Bidirectional sliders
//! (rotation, slide, grip) are centered so 0.5 is neutral; one-sided sliders
//! (aero, aggression, drift, performance) start at zero. Deltas from all sliders
//! are summed per parameter and applied once on top of the behavior-modified
//! setup. Nothing here bounds a value.

use tracing::debug;

use crate::error::{SetupError, require_within};
use crate::params::{ParamKey, ParamKind, Representation, SetupParameterSet};
use crate::report::{ChangeRecord, Stage};

use super::adjust::{Effect, Op, ParameterAdjustments, Target};

/// Driver-preference slider.
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
pub enum PreferenceAxis {
    /// 0 = low downforce, 1 = high downforce.
    Aero,
    /// 0 = understeer, 1 = oversteer on turn-in.
    Rotation,
    /// 0 = rear grip, 1 = rear slides easily.
    Slide,
    /// 0 = safe, 1 = aggressive platform.
    Aggression,
    /// 0 = grip driving, 1 = drift setup.
    Drift,
    /// 0 = comfort, 1 = performance damping.
    Performance,
    /// 0 = low mechanical grip, 1 = maximum mechanical grip.
    Grip,
}

// wing deltas are levels on the 0-5 wing scale, front at half the rear
const AERO: &[Effect] = &[
    Effect::new(Target::Key(ParamKey::WingRear), Op::Add(2.0)),
    Effect::new(Target::Key(ParamKey::WingFront), Op::Add(1.0)),
    Effect::new(Target::front(ParamKind::RideHeight), Op::Add(-5.0)),
    Effect::new(Target::rear(ParamKind::RideHeight), Op::Add(3.0)),
    Effect::new(Target::rear(ParamKind::Spring), Op::Scale(0.15)),
    Effect::new(Target::Key(ParamKey::ArbRear), Op::Scale(0.10)),
];

const ROTATION: &[Effect] = &[
    Effect::new(Target::rear(ParamKind::Toe), Op::Add(0.4)),
    Effect::new(Target::rear(ParamKind::Arb), Op::Scale(0.30)),
    Effect::new(Target::front(ParamKind::Arb), Op::Scale(-0.15)),
    // less lock on lift-off frees the rear
    Effect::new(Target::Key(ParamKey::DiffCoast), Op::Add(-15.0)),
    Effect::new(Target::Key(ParamKey::BrakeBias), Op::Add(-3.0)),
    Effect::new(Target::rear(ParamKind::Camber), Op::Add(0.5)),
];

const SLIDE: &[Effect] = &[
    Effect::new(Target::rear(ParamKind::Camber), Op::Add(1.5)),
    Effect::new(Target::rear(ParamKind::Toe), Op::Add(0.3)),
    Effect::new(Target::Key(ParamKey::DiffPower), Op::Add(20.0)),
    Effect::new(Target::rear(ParamKind::Pressure), Op::Add(2.0)),
    Effect::new(Target::front(ParamKind::Camber), Op::Add(-0.5)),
];

const AGGRESSION: &[Effect] = &[
    Effect::new(Target::all(ParamKind::Spring), Op::Scale(0.30)),
    Effect::new(Target::all(ParamKind::RideHeight), Op::Add(-10.0)),
    Effect::new(Target::Key(ParamKey::BrakePower), Op::Scale(0.20)),
    Effect::new(Target::all(ParamKind::Bump), Op::Scale(0.30)),
    Effect::new(Target::all(ParamKind::Rebound), Op::Scale(0.30)),
    Effect::new(Target::all(ParamKind::FastBump), Op::Scale(0.30)),
    Effect::new(Target::all(ParamKind::FastRebound), Op::Scale(0.30)),
];

const DRIFT: &[Effect] = &[
    Effect::new(Target::Key(ParamKey::DiffPower), Op::Add(60.0)),
    Effect::new(Target::Key(ParamKey::DiffCoast), Op::Add(50.0)),
    Effect::new(Target::Key(ParamKey::BrakeBias), Op::Scale(-0.15)),
    Effect::new(Target::rear(ParamKind::Camber), Op::Add(2.5)),
    Effect::new(Target::rear(ParamKind::Toe), Op::Add(0.5)),
    Effect::new(Target::rear(ParamKind::Spring), Op::Scale(-0.20)),
];

const PERFORMANCE: &[Effect] = &[
    Effect::new(Target::all(ParamKind::Bump), Op::Scale(0.40)),
    Effect::new(Target::all(ParamKind::Rebound), Op::Scale(0.40)),
    Effect::new(Target::front(ParamKind::RideHeight), Op::Add(-6.0)),
    Effect::new(Target::rear(ParamKind::RideHeight), Op::Add(-4.0)),
    Effect::new(Target::front(ParamKind::Pressure), Op::Add(-1.0)),
    Effect::new(Target::rear(ParamKind::Pressure), Op::Add(-0.5)),
];

const GRIP: &[Effect] = &[
    Effect::new(Target::all(ParamKind::Camber), Op::Add(-0.5)),
    Effect::new(Target::rear(ParamKind::Pressure), Op::Add(-1.0)),
    Effect::new(Target::Key(ParamKey::DiffPower), Op::Add(-10.0)),
];

impl PreferenceAxis {
    /// Centered sliders have their neutral point at 0.5.
    pub const fn is_centered(&self) -> bool {
        matches!(self, Self::Rotation | Self::Slide | Self::Grip)
    }

    /// Effect strength for a slider position: `(s − 0.5) × 2` when centered,
    /// `s` otherwise.
    pub fn strength(&self, slider: f64) -> f64 {
        if self.is_centered() {
            (slider - 0.5) * 2.0
        } else {
            slider
        }
    }

    /// Effects at strength 1.0.
    pub const fn effects(&self) -> &'static [Effect] {
        match self {
            Self::Aero => AERO,
            Self::Rotation => ROTATION,
            Self::Slide => SLIDE,
            Self::Aggression => AGGRESSION,
            Self::Drift => DRIFT,
            Self::Performance => PERFORMANCE,
            Self::Grip => GRIP,
        }
    }
}

/// Driver-preference sliders, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverPreferenceProfile {
    pub aero: f64,
    pub rotation: f64,
    pub slide: f64,
    pub aggression: f64,
    pub drift: f64,
    pub performance: f64,
    pub grip: f64,
}

impl DriverPreferenceProfile {
    /// Sliders that change nothing.
    pub const fn neutral() -> Self {
        Self {
            aero: 0.0,
            rotation: 0.5,
            slide: 0.5,
            aggression: 0.0,
            drift: 0.0,
            performance: 0.0,
            grip: 0.5,
        }
    }

    pub const fn get(&self, axis: PreferenceAxis) -> f64 {
        match axis {
            PreferenceAxis::Aero => self.aero,
            PreferenceAxis::Rotation => self.rotation,
            PreferenceAxis::Slide => self.slide,
            PreferenceAxis::Aggression => self.aggression,
            PreferenceAxis::Drift => self.drift,
            PreferenceAxis::Performance => self.performance,
            PreferenceAxis::Grip => self.grip,
        }
    }

    /// Rejects sliders outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), SetupError> {
        use strum::IntoEnumIterator;
        for axis in PreferenceAxis::iter() {
            require_within(axis.as_ref(), self.get(axis), 0.0, 1.0)?;
        }
        Ok(())
    }
}

impl Default for DriverPreferenceProfile {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Applies driver-preference sliders to a parameter set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileTuner;

impl ProfileTuner {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(
        &self,
        set: &mut SetupParameterSet,
        preferences: &DriverPreferenceProfile,
        representation: Representation,
    ) -> Result<Vec<ChangeRecord>, SetupError> {
        use strum::IntoEnumIterator;
        preferences.validate()?;

        let mut adjustments = ParameterAdjustments::new();
        for axis in PreferenceAxis::iter() {
            let strength = axis.strength(preferences.get(axis));
            for effect in axis.effects() {
                adjustments.collect(set, effect, strength, representation);
            }
        }

        let changes = adjustments.apply(set, Stage::Profile);
        debug!(%representation, changed = changes.len(), "applied preference profile");
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Corner, DecimalScale};

    fn base(representation: Representation) -> SetupParameterSet {
        let mut set = SetupParameterSet::new(representation, DecimalScale::Tenths);
        for corner in Corner::ALL {
            set.insert(ParamKey::Pressure(corner), 26.0);
            set.insert(ParamKey::Camber(corner), -3.0);
            set.insert(ParamKey::Toe(corner), 0.1);
            set.insert(ParamKey::SpringRate(corner), 100_000.0);
            set.insert(ParamKey::RideHeight(corner), 60.0);
            set.insert(ParamKey::DampBump(corner), 2000.0);
            set.insert(ParamKey::DampRebound(corner), 5000.0);
            set.insert(ParamKey::DampFastBump(corner), 4000.0);
            set.insert(ParamKey::DampFastRebound(corner), 10_000.0);
        }
        set.insert(ParamKey::ArbFront, 6.0);
        set.insert(ParamKey::ArbRear, 5.0);
        set.insert(ParamKey::DiffPower, 65.0);
        set.insert(ParamKey::DiffCoast, 50.0);
        set.insert(ParamKey::BrakeBias, 60.0);
        set.insert(ParamKey::BrakePower, 1.0);
        set.insert(ParamKey::WingFront, 1.0);
        set.insert(ParamKey::WingRear, 2.0);
        set
    }

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn neutral_profile_changes_nothing() {
        let mut set = base(Representation::Absolute);
        let before = set.clone();
        let changes = ProfileTuner
            .apply(&mut set, &DriverPreferenceProfile::neutral(), Representation::Absolute)
            .unwrap();
        assert!(changes.is_empty());
        assert_eq!(set, before);
    }

    #[test]
    fn centered_strength() {
        assert_eq!(PreferenceAxis::Rotation.strength(0.5), 0.0);
        assert_eq!(PreferenceAxis::Rotation.strength(1.0), 1.0);
        assert_eq!(PreferenceAxis::Rotation.strength(0.0), -1.0);
        assert_eq!(PreferenceAxis::Aggression.strength(0.25), 0.25);
    }

    #[test]
    fn full_rotation_hits_stated_maxima() {
        let mut set = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            rotation: 1.0,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut set, &prefs, Representation::Absolute)
            .unwrap();

        assert!(close(set.value(ParamKey::Toe(Corner::Rr)), 0.5));
        assert!(close(set.value(ParamKey::Toe(Corner::Lf)), 0.1));
        assert!(close(set.value(ParamKey::ArbRear), 6.5));
        assert!(close(set.value(ParamKey::ArbFront), 5.1));
        assert!(close(set.value(ParamKey::DiffCoast), 35.0));
    }

    #[test]
    fn full_understeer_rotation_mirrors() {
        let mut set = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            rotation: 0.0,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut set, &prefs, Representation::Absolute)
            .unwrap();
        assert!(close(set.value(ParamKey::Toe(Corner::Lr)), -0.3));
        assert!(close(set.value(ParamKey::ArbRear), 3.5));
    }

    #[test]
    fn aggression_maxima() {
        let mut set = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            aggression: 1.0,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut set, &prefs, Representation::Absolute)
            .unwrap();
        assert!(close(set.value(ParamKey::SpringRate(Corner::Lf)), 130_000.0));
        assert!(close(set.value(ParamKey::RideHeight(Corner::Rr)), 50.0));
        assert!(close(set.value(ParamKey::BrakePower), 1.2));
        assert!(close(set.value(ParamKey::DampRebound(Corner::Lf)), 6500.0));
    }

    #[test]
    fn aero_trades_rake_and_rear_support_for_wing() {
        let mut set = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            aero: 1.0,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut set, &prefs, Representation::Absolute)
            .unwrap();
        assert!(close(set.value(ParamKey::WingRear), 4.0));
        assert!(close(set.value(ParamKey::WingFront), 2.0));
        assert!(close(set.value(ParamKey::RideHeight(Corner::Lf)), 55.0));
        assert!(close(set.value(ParamKey::RideHeight(Corner::Rr)), 63.0));
        assert!(close(set.value(ParamKey::SpringRate(Corner::Lr)), 115_000.0));
        assert!(close(set.value(ParamKey::SpringRate(Corner::Rf)), 100_000.0));
        assert!(close(set.value(ParamKey::ArbRear), 5.5));
        assert!(close(set.value(ParamKey::ArbFront), 6.0));

        let mut half = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            aero: 0.5,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut half, &prefs, Representation::Absolute)
            .unwrap();
        assert!(close(half.value(ParamKey::WingRear), 3.0));
        assert!(close(half.value(ParamKey::RideHeight(Corner::Rf)), 57.5));
    }

    #[test]
    fn drift_pushes_diff_past_full_lock_before_clamping() {
        let mut set = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            drift: 1.0,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut set, &prefs, Representation::Absolute)
            .unwrap();
        // 65 + 60; the converter bounds it to 100
        assert!(close(set.value(ParamKey::DiffPower), 125.0));
        assert!(close(set.value(ParamKey::DiffCoast), 100.0));
        assert!(close(set.value(ParamKey::BrakeBias), 51.0));
        assert!(close(set.value(ParamKey::SpringRate(Corner::Lr)), 80_000.0));
        assert!(close(set.value(ParamKey::SpringRate(Corner::Lf)), 100_000.0));
    }

    #[test]
    fn axes_sum_on_shared_parameters() {
        let mut set = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            rotation: 1.0,
            slide: 1.0,
            drift: 1.0,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut set, &prefs, Representation::Absolute)
            .unwrap();
        // 0.1 + 0.4 + 0.3 + 0.5
        assert!(close(set.value(ParamKey::Toe(Corner::Lr)), 1.3));
        // −3 + 0.5 + 1.5 + 2.5
        assert!(close(set.value(ParamKey::Camber(Corner::Rr)), 1.5));
    }

    #[test]
    fn click_parameters_get_click_offsets() {
        let mut set = base(Representation::Clicks);
        let prefs = DriverPreferenceProfile {
            aggression: 1.0,
            ..DriverPreferenceProfile::neutral()
        };
        ProfileTuner
            .apply(&mut set, &prefs, Representation::Clicks)
            .unwrap();
        let spring = set.get(ParamKey::SpringRate(Corner::Lf)).unwrap();
        assert_eq!(spring.value, 100_000.0);
        assert!((spring.click_offset - 1.5).abs() < 1e-12);
        assert!(close(set.value(ParamKey::BrakePower), 1.2));
    }

    #[test]
    fn sliders_outside_unit_range_are_rejected() {
        let mut set = base(Representation::Absolute);
        let prefs = DriverPreferenceProfile {
            grip: 1.2,
            ..DriverPreferenceProfile::neutral()
        };
        let err = ProfileTuner
            .apply(&mut set, &prefs, Representation::Absolute)
            .unwrap_err();
        assert!(matches!(
            err,
            SetupError::OutOfRangeInput { ref name, .. } if name == "grip"
        ));
    }
}
