//! Final clamp and native-unit conversion.
//!
//! This is the only stage that bounds values. Clamping runs on physical
//! values and is idempotent; conversion then rounds each parameter to the
//! unit the simulator stores it in:
//!
//! - pressures to the nearest tenth of a psi
//! - camber and toe multiplied by the decimal scale and rounded
//! - click-based parameters through a [`ClickStrategy`], plus their pending
//!   click offset, rounded to a whole click
//! - everything else to its kind's precision
//!
//! Rounding can lift a capped fast damper channel above half its slow
//! partner, so capped channels are re-bounded after their partner is rounded.

mod clicks;
mod limits;

use std::collections::BTreeMap;

use tracing::{debug, warn};

pub use clicks::{ClickRange, ClickStrategy, FixedDivisor, RangeInterpolation};
pub use limits::{GenericLimits, LimitProvider, Limits};

use crate::classify::Category;
use crate::config::PipelineConfig;
use crate::params::{Corrections, ParamKey, ParamKind, Representation, SetupParameterSet};
use crate::vehicle::VehicleDescriptor;

/// A value the clamp moved.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClampEvent {
    pub key: ParamKey,
    pub requested: f64,
    pub clamped: f64,
    pub limits: Limits,
}

impl ClampEvent {
    /// True when the clamp moved the value by more than `fraction` of the
    /// allowed span, which usually means a category target does not fit the
    /// vehicle.
    pub fn is_large(&self, fraction: f64) -> bool {
        if !self.requested.is_finite() {
            return true;
        }
        (self.requested - self.clamped).abs() > fraction * self.limits.span()
    }
}

/// A converted parameter in the simulator's native unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputValue {
    pub value: f64,
    pub representation: Representation,
}

/// Decimal places a kind is rounded to in absolute representation.
pub const fn precision(kind: ParamKind) -> i32 {
    match kind {
        ParamKind::Pressure | ParamKind::Caster => 1,
        ParamKind::BrakePower => 2,
        _ => 0,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn floor_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).floor() / factor
}

/// Converted parameters plus any bound the rounding forced.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub parameters: BTreeMap<ParamKey, OutputValue>,
    /// Fast damper channels pulled back under half their rounded slow
    /// partner, in output units.
    pub clamp_events: Vec<ClampEvent>,
}

/// Clamps and converts a refined parameter set.
pub struct ValueConverter<'a> {
    limits: &'a dyn LimitProvider,
    clicks: &'a dyn ClickStrategy,
    large_clamp_fraction: f64,
}

impl<'a> ValueConverter<'a> {
    pub fn new(limits: &'a dyn LimitProvider, clicks: &'a dyn ClickStrategy) -> Self {
        Self {
            limits,
            clicks,
            large_clamp_fraction: PipelineConfig::DEFAULT_LARGE_CLAMP_FRACTION,
        }
    }

    pub fn with_large_clamp_fraction(mut self, fraction: f64) -> Self {
        self.large_clamp_fraction = fraction;
        self
    }

    /// Bounds every value to its limits.
    ///
    /// Fast damper channels flagged by the rough-surface cap get an extra
    /// ceiling of half their (already clamped) slow channel, so the cap
    /// survives clamping.
    pub fn clamp(&self, vehicle: &VehicleDescriptor, set: &mut SetupParameterSet) -> Vec<ClampEvent> {
        let (capped, free): (Vec<ParamKey>, Vec<ParamKey>) =
            set.iter().map(|(key, _)| *key).partition(|key| {
                set.get(*key)
                    .is_some_and(|p| p.corrections.contains(Corrections::FAST_DAMPING_CAP))
            });

        let mut events = Vec::new();
        for key in free {
            if let Some(limits) = self.limits.limits(vehicle, key) {
                events.extend(self.clamp_one(set, key, limits));
            }
        }
        for key in capped {
            let Some(limits) = self.limits.limits(vehicle, key) else {
                continue;
            };
            let limits = match key.slow_counterpart().and_then(|slow| set.value(slow)) {
                Some(slow) => limits.with_ceiling(slow * PipelineConfig::ROUGH_FAST_DAMPING_CAP),
                None => limits,
            };
            events.extend(self.clamp_one(set, key, limits));
        }
        debug!(clamped = events.len(), "clamp");
        events
    }

    fn clamp_one(&self, set: &mut SetupParameterSet, key: ParamKey, limits: Limits) -> Option<ClampEvent> {
        let param = set.get_mut(key)?;
        let requested = param.value;
        let clamped = limits.clamp(requested);
        if clamped == requested {
            return None;
        }
        param.value = clamped;

        let event = ClampEvent {
            key,
            requested,
            clamped,
            limits,
        };
        if event.is_large(self.large_clamp_fraction) {
            warn!(
                %key,
                requested,
                clamped,
                min = limits.min,
                max = limits.max,
                "large clamp adjustment; category target may not suit this vehicle"
            );
        }
        Some(event)
    }

    /// Converts clamped values to native units.
    pub fn convert(&self, category: Category, set: &SetupParameterSet) -> Conversion {
        let mut parameters = self.round(category, set);
        let clamp_events = Self::recap_fast_damping(set, &mut parameters);
        debug!(recapped = clamp_events.len(), "convert");
        Conversion {
            parameters,
            clamp_events,
        }
    }

    fn round(&self, category: Category, set: &SetupParameterSet) -> BTreeMap<ParamKey, OutputValue> {
        let scale = set.decimal_scale().factor();
        set.iter()
            .map(|(key, param)| {
                let kind = key.kind();
                let output = if param.is_clicks() {
                    let raw = self.clicks.to_clicks(category, *key, param.value) + param.click_offset;
                    let ceiling = self.clicks.max_clicks(category, *key).unwrap_or(f64::INFINITY);
                    OutputValue {
                        value: raw.round().clamp(0.0, ceiling),
                        representation: Representation::Clicks,
                    }
                } else if kind.is_alignment() {
                    OutputValue {
                        value: (param.value * scale).round(),
                        representation: Representation::Absolute,
                    }
                } else {
                    OutputValue {
                        value: round_to(param.value, precision(kind)),
                        representation: Representation::Absolute,
                    }
                };
                (*key, output)
            })
            .collect()
    }

    /// Bounds every rounded fast channel flagged by the rough-surface cap to
    /// half its rounded slow partner, rounding the bound down.
    fn recap_fast_damping(
        set: &SetupParameterSet,
        parameters: &mut BTreeMap<ParamKey, OutputValue>,
    ) -> Vec<ClampEvent> {
        let mut events = Vec::new();
        for (key, param) in set.iter() {
            if !param.corrections.contains(Corrections::FAST_DAMPING_CAP) {
                continue;
            }
            let Some(slow) = key.slow_counterpart().and_then(|slow| parameters.get(&slow).copied()) else {
                continue;
            };
            let Some(fast) = parameters.get_mut(key) else {
                continue;
            };
            if fast.representation != slow.representation {
                continue;
            }
            let decimals = match fast.representation {
                Representation::Clicks => 0,
                Representation::Absolute => precision(key.kind()),
            };
            let ceiling = floor_to(slow.value * PipelineConfig::ROUGH_FAST_DAMPING_CAP, decimals);
            if fast.value <= ceiling {
                continue;
            }
            let requested = fast.value;
            fast.value = ceiling.max(0.0);
            events.push(ClampEvent {
                key: *key,
                requested,
                clamped: fast.value,
                limits: Limits::new(0.0, ceiling.max(0.0)),
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Corner, DecimalScale};
    use crate::vehicle::Drivetrain;

    fn vehicle() -> VehicleDescriptor {
        VehicleDescriptor::new("ks_test", Drivetrain::Rwd)
    }

    fn converter<'a>(limits: &'a GenericLimits, clicks: &'a FixedDivisor) -> ValueConverter<'a> {
        ValueConverter::new(limits, clicks)
    }

    #[test]
    fn clamp_bounds_and_reports() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let mut set = SetupParameterSet::new(Representation::Absolute, DecimalScale::Tenths);
        set.insert(ParamKey::DiffPower, 125.0);
        set.insert(ParamKey::DiffCoast, 80.0);

        let events = converter(&limits, &clicks).clamp(&vehicle(), &mut set);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, ParamKey::DiffPower);
        assert_eq!(events[0].clamped, 100.0);
        assert!(!events[0].is_large(0.25));
        assert_eq!(set.value(ParamKey::DiffPower), Some(100.0));
        assert_eq!(set.value(ParamKey::DiffCoast), Some(80.0));
    }

    #[test]
    fn clamp_is_idempotent() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let converter = converter(&limits, &clicks);
        let mut set = SetupParameterSet::new(Representation::Absolute, DecimalScale::Tenths);
        set.insert(ParamKey::Pressure(Corner::Lf), 55.0);
        set.insert(ParamKey::Camber(Corner::Lf), -9.0);
        set.insert(ParamKey::DampBump(Corner::Lf), 400.0);
        set.insert(ParamKey::DampFastBump(Corner::Lf), 30_000.0);
        set.get_mut(ParamKey::DampFastBump(Corner::Lf))
            .unwrap()
            .corrections
            .insert(Corrections::FAST_DAMPING_CAP);

        converter.clamp(&vehicle(), &mut set);
        let once = set.clone();
        assert!(converter.clamp(&vehicle(), &mut set).is_empty());
        assert_eq!(set, once);
    }

    #[test]
    fn capped_fast_channel_follows_clamped_slow() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let mut set = SetupParameterSet::new(Representation::Absolute, DecimalScale::Tenths);
        set.insert(ParamKey::DampBump(Corner::Rr), 20_000.0);
        set.insert(ParamKey::DampFastBump(Corner::Rr), 10_000.0);
        set.get_mut(ParamKey::DampFastBump(Corner::Rr))
            .unwrap()
            .corrections
            .insert(Corrections::FAST_DAMPING_CAP);

        converter(&limits, &clicks).clamp(&vehicle(), &mut set);
        assert_eq!(set.value(ParamKey::DampBump(Corner::Rr)), Some(15_000.0));
        assert_eq!(set.value(ParamKey::DampFastBump(Corner::Rr)), Some(7500.0));
    }

    #[test]
    fn large_clamps_are_flagged() {
        let event = ClampEvent {
            key: ParamKey::Pressure(Corner::Lf),
            requested: 50.0,
            clamped: 40.0,
            limits: GenericLimits::for_kind(ParamKind::Pressure),
        };
        assert!(event.is_large(0.25));
        assert!(!event.is_large(0.6));
    }

    #[test]
    fn absolute_conversion_rounds_per_kind() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let mut set = SetupParameterSet::new(Representation::Absolute, DecimalScale::Hundredths);
        set.insert(ParamKey::Pressure(Corner::Lf), 25.137);
        set.insert(ParamKey::Camber(Corner::Lf), -3.456);
        set.insert(ParamKey::Toe(Corner::Lr), 0.1);
        set.insert(ParamKey::SpringRate(Corner::Lf), 154_687.5);
        set.insert(ParamKey::BrakePower, 1.234);

        let out = converter(&limits, &clicks).convert(Category::Gt, &set).parameters;
        assert!((out[&ParamKey::Pressure(Corner::Lf)].value - 25.1).abs() < 1e-9);
        assert_eq!(out[&ParamKey::Camber(Corner::Lf)].value, -346.0);
        assert_eq!(out[&ParamKey::Toe(Corner::Lr)].value, 10.0);
        assert_eq!(out[&ParamKey::SpringRate(Corner::Lf)].value, 154_688.0);
        assert!((out[&ParamKey::BrakePower].value - 1.23).abs() < 1e-9);
        assert!(out.values().all(|v| v.representation == Representation::Absolute));
    }

    #[test]
    fn click_conversion_adds_offsets() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let mut set = SetupParameterSet::new(Representation::Clicks, DecimalScale::Tenths);
        set.insert(ParamKey::SpringRate(Corner::Lf), 120_000.0);
        set.get_mut(ParamKey::SpringRate(Corner::Lf)).unwrap().click_offset = 1.5;
        set.insert(ParamKey::DampBump(Corner::Lf), 300.0);
        set.get_mut(ParamKey::DampBump(Corner::Lf)).unwrap().click_offset = -2.0;
        set.insert(ParamKey::Pressure(Corner::Lf), 26.0);

        let out = converter(&limits, &clicks).convert(Category::Gt, &set).parameters;
        let spring = out[&ParamKey::SpringRate(Corner::Lf)];
        assert_eq!(spring.representation, Representation::Clicks);
        // 12 + 1.5 = 13.5 rounds away from zero
        assert_eq!(spring.value, 14.0);
        assert_eq!(out[&ParamKey::DampBump(Corner::Lf)].value, 0.0);
        assert_eq!(out[&ParamKey::Pressure(Corner::Lf)].representation, Representation::Absolute);
    }

    #[test]
    fn interpolated_clicks_respect_max() {
        let limits = GenericLimits;
        let clicks = RangeInterpolation::default();
        let converter = ValueConverter::new(&limits, &clicks);
        let mut set = SetupParameterSet::new(Representation::Clicks, DecimalScale::Tenths);
        set.insert(ParamKey::SpringRate(Corner::Lf), 200_000.0);
        set.get_mut(ParamKey::SpringRate(Corner::Lf)).unwrap().click_offset = 3.0;

        let out = converter.convert(Category::Gt, &set).parameters;
        assert_eq!(out[&ParamKey::SpringRate(Corner::Lf)].value, 15.0);
    }

    fn capped(set: &mut SetupParameterSet, key: ParamKey) {
        set.get_mut(key)
            .unwrap()
            .corrections
            .insert(Corrections::FAST_DAMPING_CAP);
    }

    #[test]
    fn rounded_clicks_keep_fast_under_half_slow() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let mut set = SetupParameterSet::new(Representation::Clicks, DecimalScale::Tenths);
        // 1.4 clicks rounds to 1; the fast channel at exactly half rounds to 1 too
        set.insert(ParamKey::DampBump(Corner::Lf), 1.4 * FixedDivisor::default().damper);
        set.insert(ParamKey::DampFastBump(Corner::Lf), 0.7 * FixedDivisor::default().damper);
        capped(&mut set, ParamKey::DampFastBump(Corner::Lf));
        set.insert(ParamKey::DampBump(Corner::Rf), 9.0 * FixedDivisor::default().damper);
        set.insert(ParamKey::DampFastBump(Corner::Rf), 4.5 * FixedDivisor::default().damper);
        capped(&mut set, ParamKey::DampFastBump(Corner::Rf));

        let conversion = converter(&limits, &clicks).convert(Category::Street, &set);
        let out = &conversion.parameters;
        assert_eq!(out[&ParamKey::DampBump(Corner::Lf)].value, 1.0);
        assert_eq!(out[&ParamKey::DampFastBump(Corner::Lf)].value, 0.0);
        assert_eq!(out[&ParamKey::DampBump(Corner::Rf)].value, 9.0);
        assert_eq!(out[&ParamKey::DampFastBump(Corner::Rf)].value, 4.0);

        assert_eq!(conversion.clamp_events.len(), 2);
        let event = conversion.clamp_events[0];
        assert_eq!(event.key, ParamKey::DampFastBump(Corner::Lf));
        assert_eq!((event.requested, event.clamped), (1.0, 0.0));
    }

    #[test]
    fn rounded_absolute_dampers_keep_fast_under_half_slow() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let mut set = SetupParameterSet::new(Representation::Absolute, DecimalScale::Tenths);
        set.insert(ParamKey::DampRebound(Corner::Rr), 3001.4);
        set.insert(ParamKey::DampFastRebound(Corner::Rr), 1500.7);
        capped(&mut set, ParamKey::DampFastRebound(Corner::Rr));

        let conversion = converter(&limits, &clicks).convert(Category::Gt, &set);
        assert_eq!(conversion.parameters[&ParamKey::DampRebound(Corner::Rr)].value, 3001.0);
        assert_eq!(conversion.parameters[&ParamKey::DampFastRebound(Corner::Rr)].value, 1500.0);
        assert_eq!(conversion.clamp_events.len(), 1);
    }

    #[test]
    fn uncapped_fast_channels_are_left_alone() {
        let (limits, clicks) = (GenericLimits, FixedDivisor::default());
        let mut set = SetupParameterSet::new(Representation::Absolute, DecimalScale::Tenths);
        set.insert(ParamKey::DampBump(Corner::Lf), 2000.0);
        set.insert(ParamKey::DampFastBump(Corner::Lf), 4000.0);

        let conversion = converter(&limits, &clicks).convert(Category::Gt, &set);
        assert_eq!(conversion.parameters[&ParamKey::DampFastBump(Corner::Lf)].value, 4000.0);
        assert!(conversion.clamp_events.is_empty());
    }
}
