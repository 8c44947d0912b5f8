//! Parameter bounds used by the final clamp.

use crate::params::{ParamKey, ParamKind};
use crate::vehicle::VehicleDescriptor;

/// Closed `[min, max]` interval in a parameter's physical unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Bounds `value` to the interval. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    /// Same interval with a tighter upper bound, never below `min`.
    pub fn with_ceiling(&self, ceiling: f64) -> Self {
        Self::new(self.min, self.max.min(ceiling).max(self.min))
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Source of per-parameter bounds.
///
/// The default table is a category-independent approximation; a provider
/// that knows a vehicle's true ranges can be injected instead.
pub trait LimitProvider: Send + Sync {
    fn limits(&self, vehicle: &VehicleDescriptor, key: ParamKey) -> Option<Limits>;
}

/// Generic bounds per parameter kind, shared by every vehicle.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericLimits;

impl GenericLimits {
    pub const fn for_kind(kind: ParamKind) -> Limits {
        match kind {
            ParamKind::Pressure => Limits::new(20.0, 40.0),
            ParamKind::Camber => Limits::new(-6.0, 2.0),
            ParamKind::Toe => Limits::new(-1.0, 1.0),
            ParamKind::Caster => Limits::new(0.0, 10.0),
            ParamKind::Spring => Limits::new(10_000.0, 400_000.0),
            ParamKind::RideHeight => Limits::new(30.0, 200.0),
            ParamKind::Bump => Limits::new(500.0, 15_000.0),
            ParamKind::Rebound => Limits::new(1000.0, 30_000.0),
            ParamKind::FastBump => Limits::new(250.0, 20_000.0),
            ParamKind::FastRebound => Limits::new(500.0, 40_000.0),
            ParamKind::Arb => Limits::new(0.0, 50.0),
            ParamKind::Diff => Limits::new(0.0, 100.0),
            ParamKind::BrakeBias => Limits::new(40.0, 80.0),
            ParamKind::BrakePower => Limits::new(0.5, 1.5),
            ParamKind::Wing => Limits::new(0.0, 5.0),
            ParamKind::Fuel => Limits::new(0.0, 200.0),
        }
    }
}

impl LimitProvider for GenericLimits {
    fn limits(&self, _vehicle: &VehicleDescriptor, key: ParamKey) -> Option<Limits> {
        Some(Self::for_kind(key.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_idempotent() {
        let limits = GenericLimits::for_kind(ParamKind::Diff);
        for value in [-50.0, 0.0, 42.0, 100.0, 125.0, f64::INFINITY, f64::NAN] {
            let once = limits.clamp(value);
            assert_eq!(limits.clamp(once), once);
            assert!(limits.contains(once));
        }
    }

    #[test]
    fn ceiling_never_inverts_interval() {
        let limits = Limits::new(250.0, 20_000.0);
        assert_eq!(limits.with_ceiling(1500.0), Limits::new(250.0, 1500.0));
        assert_eq!(limits.with_ceiling(100.0), Limits::new(250.0, 250.0));
        assert_eq!(limits.with_ceiling(50_000.0), limits);
    }

    #[test]
    fn every_kind_has_a_sane_range() {
        use strum::IntoEnumIterator;
        for kind in ParamKind::iter() {
            let limits = GenericLimits::for_kind(kind);
            assert!(limits.span() > 0.0, "{kind}");
        }
    }

    #[test]
    fn fast_floors_sit_at_half_slow_floors() {
        let bump = GenericLimits::for_kind(ParamKind::Bump);
        let fast = GenericLimits::for_kind(ParamKind::FastBump);
        assert!(fast.min <= 0.5 * bump.min);
        let rebound = GenericLimits::for_kind(ParamKind::Rebound);
        let fast = GenericLimits::for_kind(ParamKind::FastRebound);
        assert!(fast.min <= 0.5 * rebound.min);
    }
}
