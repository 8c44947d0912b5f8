//! Category target tables.
//!
//! Each category has one immutable [`CategoryProfile`] of physical targets.
//! The pipeline reads them through [`TargetsOracle`] so tests and data files
//! can substitute alternate tables without touching any stage.

use crate::classify::Category;
use crate::vehicle::Axle;

/// A front/rear pair of values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxlePair {
    pub front: f64,
    pub rear: f64,
}

impl AxlePair {
    pub const fn new(front: f64, rear: f64) -> Self {
        Self { front, rear }
    }

    pub const fn get(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front,
            Axle::Rear => self.rear,
        }
    }
}

/// Physical targets for one vehicle category.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryProfile {
    /// Hot tyre pressure targets (psi).
    pub hot_pressure: AxlePair,
    /// Pressure rise per warm-up lap (psi).
    pub pressure_gain_per_lap: f64,
    /// Suspension natural frequencies (Hz).
    pub frequency: AxlePair,
    /// Rebound as a multiple of bump.
    pub bump_rebound_ratio: f64,
    /// Fast damping as a multiple of slow damping.
    pub fast_slow_ratio: f64,
    /// Target rake (degrees).
    pub rake_deg: f64,
    /// Static ride heights (mm).
    pub ride_height: AxlePair,
    /// Camber (degrees, negative leans the top inwards).
    pub camber: AxlePair,
    /// Toe (degrees) for the reference wheelbase.
    pub toe: AxlePair,
    /// Caster (degrees).
    pub caster: f64,
    pub diff_power: f64,
    pub diff_coast: f64,
    pub diff_preload: f64,
    /// Anti-roll bar positions.
    pub arb: AxlePair,
    /// Front brake share (%).
    pub brake_bias: f64,
    /// Default wheel-to-spring motion ratios.
    pub motion_ratio: AxlePair,
    /// Rear share of total downforce.
    pub aero_balance: f64,
}

/// Read-only source of category targets.
pub trait TargetsOracle: Send + Sync {
    fn targets(&self, category: Category) -> Option<CategoryProfile>;
}

/// Targets compiled into the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinTargets;

impl BuiltinTargets {
    pub const FORMULA: CategoryProfile = CategoryProfile {
        hot_pressure: AxlePair::new(24.0, 23.0),
        pressure_gain_per_lap: 1.2,
        frequency: AxlePair::new(3.5, 3.8),
        bump_rebound_ratio: 3.0,
        fast_slow_ratio: 2.5,
        rake_deg: 1.5,
        ride_height: AxlePair::new(35.0, 50.0),
        camber: AxlePair::new(-3.5, -2.0),
        toe: AxlePair::new(-0.05, 0.10),
        caster: 7.0,
        diff_power: 50.0,
        diff_coast: 40.0,
        diff_preload: 30.0,
        arb: AxlePair::new(8.0, 7.0),
        brake_bias: 62.0,
        motion_ratio: AxlePair::new(1.0, 1.0),
        aero_balance: 0.45,
    };

    pub const PROTOTYPE: CategoryProfile = CategoryProfile {
        hot_pressure: AxlePair::new(26.0, 25.5),
        pressure_gain_per_lap: 1.0,
        frequency: AxlePair::new(3.2, 3.5),
        bump_rebound_ratio: 2.8,
        fast_slow_ratio: 2.2,
        rake_deg: 1.8,
        ride_height: AxlePair::new(40.0, 58.0),
        camber: AxlePair::new(-3.8, -2.5),
        toe: AxlePair::new(-0.03, 0.12),
        caster: 6.5,
        diff_power: 65.0,
        diff_coast: 55.0,
        diff_preload: 40.0,
        arb: AxlePair::new(7.5, 6.5),
        brake_bias: 60.0,
        motion_ratio: AxlePair::new(0.95, 0.95),
        aero_balance: 0.48,
    };

    pub const GT: CategoryProfile = CategoryProfile {
        hot_pressure: AxlePair::new(27.5, 27.0),
        pressure_gain_per_lap: 0.8,
        frequency: AxlePair::new(2.8, 3.0),
        bump_rebound_ratio: 2.5,
        fast_slow_ratio: 2.0,
        rake_deg: 0.8,
        ride_height: AxlePair::new(50.0, 58.0),
        camber: AxlePair::new(-4.0, -3.0),
        toe: AxlePair::new(-0.05, 0.15),
        caster: 6.0,
        diff_power: 65.0,
        diff_coast: 50.0,
        diff_preload: 30.0,
        arb: AxlePair::new(6.0, 5.0),
        brake_bias: 62.0,
        motion_ratio: AxlePair::new(0.9, 0.8),
        aero_balance: 0.50,
    };

    pub const STREET_SPORT: CategoryProfile = CategoryProfile {
        hot_pressure: AxlePair::new(30.0, 28.0),
        pressure_gain_per_lap: 0.6,
        frequency: AxlePair::new(2.2, 2.4),
        bump_rebound_ratio: 2.2,
        fast_slow_ratio: 1.8,
        rake_deg: 0.3,
        ride_height: AxlePair::new(90.0, 95.0),
        camber: AxlePair::new(-2.8, -2.2),
        toe: AxlePair::new(0.05, 0.15),
        caster: 5.5,
        diff_power: 45.0,
        diff_coast: 35.0,
        diff_preload: 25.0,
        arb: AxlePair::new(5.5, 4.5),
        brake_bias: 58.0,
        motion_ratio: AxlePair::new(0.85, 0.75),
        aero_balance: 0.52,
    };

    pub const STREET: CategoryProfile = CategoryProfile {
        hot_pressure: AxlePair::new(32.0, 30.0),
        pressure_gain_per_lap: 0.5,
        frequency: AxlePair::new(1.8, 2.0),
        bump_rebound_ratio: 2.0,
        fast_slow_ratio: 1.5,
        rake_deg: 0.0,
        ride_height: AxlePair::new(100.0, 105.0),
        camber: AxlePair::new(-2.5, -2.0),
        toe: AxlePair::new(0.05, 0.15),
        caster: 5.0,
        diff_power: 40.0,
        diff_coast: 30.0,
        diff_preload: 20.0,
        arb: AxlePair::new(5.0, 4.0),
        brake_bias: 58.0,
        motion_ratio: AxlePair::new(0.8, 0.7),
        aero_balance: 0.55,
    };

    pub const VINTAGE: CategoryProfile = CategoryProfile {
        hot_pressure: AxlePair::new(28.0, 26.0),
        pressure_gain_per_lap: 0.4,
        frequency: AxlePair::new(1.5, 1.6),
        bump_rebound_ratio: 1.8,
        fast_slow_ratio: 1.3,
        rake_deg: 0.0,
        ride_height: AxlePair::new(120.0, 125.0),
        camber: AxlePair::new(-1.5, -1.0),
        toe: AxlePair::new(0.10, 0.20),
        caster: 3.0,
        diff_power: 30.0,
        diff_coast: 20.0,
        diff_preload: 10.0,
        arb: AxlePair::new(3.0, 2.5),
        brake_bias: 52.0,
        motion_ratio: AxlePair::new(0.75, 0.65),
        aero_balance: 0.50,
    };

    pub const DRIFT: CategoryProfile = CategoryProfile {
        hot_pressure: AxlePair::new(32.0, 36.0),
        pressure_gain_per_lap: 0.7,
        frequency: AxlePair::new(2.5, 1.8),
        bump_rebound_ratio: 2.0,
        fast_slow_ratio: 1.6,
        rake_deg: 0.2,
        ride_height: AxlePair::new(110.0, 120.0),
        camber: AxlePair::new(-3.5, -1.0),
        toe: AxlePair::new(-0.05, -0.15),
        caster: 6.5,
        diff_power: 85.0,
        diff_coast: 65.0,
        diff_preload: 50.0,
        arb: AxlePair::new(7.0, 3.0),
        brake_bias: 54.0,
        motion_ratio: AxlePair::new(0.85, 0.7),
        aero_balance: 0.70,
    };

    pub const fn profile(category: Category) -> CategoryProfile {
        match category {
            Category::Formula => Self::FORMULA,
            Category::Prototype => Self::PROTOTYPE,
            Category::Gt => Self::GT,
            Category::StreetSport => Self::STREET_SPORT,
            Category::Street => Self::STREET,
            Category::Vintage => Self::VINTAGE,
            Category::Drift => Self::DRIFT,
        }
    }
}

impl TargetsOracle for BuiltinTargets {
    fn targets(&self, category: Category) -> Option<CategoryProfile> {
        Some(Self::profile(category))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_category_has_sane_targets() {
        for category in Category::iter() {
            let profile = BuiltinTargets.targets(category).expect("builtin row");
            assert!(profile.frequency.front > 0.0 && profile.frequency.rear > 0.0);
            assert!(profile.bump_rebound_ratio >= 1.0, "{category}");
            assert!(profile.fast_slow_ratio >= 1.0, "{category}");
            assert!((0.0..=1.0).contains(&profile.aero_balance));
            assert!(profile.motion_ratio.front > 0.0 && profile.motion_ratio.front <= 1.0);
            assert!(profile.motion_ratio.rear > 0.0 && profile.motion_ratio.rear <= 1.0);
        }
    }

    #[test]
    fn only_high_downforce_categories_run_big_rake() {
        for category in Category::iter() {
            let rake = BuiltinTargets::profile(category).rake_deg;
            if rake > 1.0 {
                assert!(category.is_high_downforce(), "{category} rake {rake}");
            }
        }
    }

    #[test]
    fn axle_pair_lookup() {
        let gt = BuiltinTargets::GT;
        assert_eq!(gt.motion_ratio.get(Axle::Front), 0.9);
        assert_eq!(gt.motion_ratio.get(Axle::Rear), 0.8);
    }
}
