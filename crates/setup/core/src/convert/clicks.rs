//! Physical value → click index strategies.
//!
//! No per-vehicle step tables are available, so both strategies here are
//! approximations. They sit behind [`ClickStrategy`] so a strategy fed with
//! real step data can replace them.

use crate::classify::Category;
use crate::params::{ParamKey, ParamKind};
use crate::vehicle::Axle;

/// Converts a physical value of a click-based parameter into a fractional
/// click index. Rounding happens in the converter, after click offsets are
/// added.
pub trait ClickStrategy: Send + Sync {
    fn to_clicks(&self, category: Category, key: ParamKey, value: f64) -> f64;

    /// Highest valid click index, if the strategy knows it.
    fn max_clicks(&self, _category: Category, _key: ParamKey) -> Option<f64> {
        None
    }
}

/// Divides by a fixed physical step per click.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FixedDivisor {
    /// N/m per spring click.
    pub spring: f64,
    /// N·s/m per damper click.
    pub damper: f64,
    /// ARB units per click.
    pub arb: f64,
}

impl FixedDivisor {
    pub const DEFAULT_SPRING: f64 = 10_000.0;
    pub const DEFAULT_DAMPER: f64 = 1000.0;
    pub const DEFAULT_ARB: f64 = 1.0;

    pub const fn new(spring: f64, damper: f64, arb: f64) -> Self {
        Self {
            spring,
            damper,
            arb,
        }
    }

    fn divisor(&self, kind: ParamKind) -> f64 {
        let divisor = match kind {
            ParamKind::Spring => self.spring,
            ParamKind::Arb => self.arb,
            kind if kind.is_damper() => self.damper,
            _ => 1.0,
        };
        if divisor > 0.0 { divisor } else { 1.0 }
    }
}

impl Default for FixedDivisor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPRING, Self::DEFAULT_DAMPER, Self::DEFAULT_ARB)
    }
}

impl ClickStrategy for FixedDivisor {
    fn to_clicks(&self, _category: Category, key: ParamKey, value: f64) -> f64 {
        value / self.divisor(key.kind())
    }
}

/// A physical range spread evenly over `0..=max_clicks`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickRange {
    pub min: f64,
    pub max: f64,
    pub max_clicks: u32,
}

impl ClickRange {
    pub const fn new(min: f64, max: f64, max_clicks: u32) -> Self {
        Self {
            min,
            max,
            max_clicks,
        }
    }

    pub fn step(&self) -> f64 {
        (self.max - self.min) / f64::from(self.max_clicks)
    }

    /// `(value − min) / step`, bounded to the click range.
    pub fn click(&self, value: f64) -> f64 {
        let step = self.step();
        if !(step > 0.0) {
            return 0.0;
        }
        ((value - self.min) / step).clamp(0.0, f64::from(self.max_clicks))
    }

    /// Typical click range of a parameter for a category.
    pub const fn for_category(category: Category, kind: ParamKind, axle: Option<Axle>) -> Option<Self> {
        use Category::*;
        use ParamKind::*;
        let range = match (category, kind) {
            (Gt, Spring) => Self::new(80_000.0, 200_000.0, 15),
            (Gt, Bump) => Self::new(1500.0, 6000.0, 15),
            (Gt, Rebound) => Self::new(3000.0, 12_000.0, 15),
            (Gt, FastBump) => Self::new(1000.0, 4000.0, 15),
            (Gt, FastRebound) => Self::new(2000.0, 8000.0, 15),
            (Gt, Arb) => Self::new(0.0, 10.0, 10),

            (Formula, Spring) => Self::new(120_000.0, 300_000.0, 20),
            (Formula, Bump) => Self::new(2000.0, 8000.0, 20),
            (Formula, Rebound) => Self::new(4000.0, 16_000.0, 20),
            (Formula, FastBump) => Self::new(1500.0, 6000.0, 20),
            (Formula, FastRebound) => Self::new(3000.0, 12_000.0, 20),
            (Formula, Arb) => Self::new(0.0, 15.0, 15),

            (Prototype, Spring) => Self::new(150_000.0, 350_000.0, 20),
            (Prototype, Bump) => Self::new(2500.0, 10_000.0, 20),
            (Prototype, Rebound) => Self::new(5000.0, 20_000.0, 20),
            (Prototype, FastBump) => Self::new(2000.0, 8000.0, 20),
            (Prototype, FastRebound) => Self::new(4000.0, 16_000.0, 20),
            (Prototype, Arb) => Self::new(0.0, 15.0, 15),

            (Drift, Spring) => match axle {
                Some(Axle::Rear) => Self::new(30_000.0, 100_000.0, 10),
                _ => Self::new(40_000.0, 120_000.0, 10),
            },
            (Drift, Bump) => Self::new(1200.0, 5000.0, 10),
            (Drift, Rebound) => Self::new(2500.0, 10_000.0, 10),
            (Drift, Arb) => Self::new(0.0, 8.0, 8),

            (Vintage, Arb) => Self::new(0.0, 5.0, 5),

            _ => return None,
        };
        Some(range)
    }
}

/// Linear interpolation over category click ranges, with a fixed divisor for
/// parameters no range covers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeInterpolation {
    pub fallback: FixedDivisor,
}

impl RangeInterpolation {
    pub const fn new(fallback: FixedDivisor) -> Self {
        Self { fallback }
    }
}

impl ClickStrategy for RangeInterpolation {
    fn to_clicks(&self, category: Category, key: ParamKey, value: f64) -> f64 {
        match ClickRange::for_category(category, key.kind(), key.axle()) {
            Some(range) => range.click(value),
            None => self.fallback.to_clicks(category, key, value),
        }
    }

    fn max_clicks(&self, category: Category, key: ParamKey) -> Option<f64> {
        ClickRange::for_category(category, key.kind(), key.axle())
            .map(|range| f64::from(range.max_clicks))
    }
}
