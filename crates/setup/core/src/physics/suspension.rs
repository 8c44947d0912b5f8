//! Spring and damper baselines from natural frequency.
//!
//! A corner behaves like a mass on a spring, `f = (1/2π)·√(k/m)`, so the wheel
//! rate for a target frequency is `k_wheel = (2πf)²·m`. The spring itself
//! sees the wheel rate amplified by the inverse square of the motion ratio.

use core::f64::consts::PI;

use crate::error::{SetupError, require_positive};

/// Wheel rate (N/m) that gives `frequency_hz` on a corner of `corner_mass_kg`.
pub fn wheel_rate_from_frequency(frequency_hz: f64, corner_mass_kg: f64) -> Result<f64, SetupError> {
    let frequency = require_positive("frequency_hz", frequency_hz)?;
    let mass = require_positive("corner_mass_kg", corner_mass_kg)?;
    let omega = 2.0 * PI * frequency;
    Ok(omega * omega * mass)
}

/// Spring rate (N/m) behind a wheel rate for a given motion ratio.
///
/// `motion_ratio = 1.0` is the identity; smaller ratios need stiffer springs.
pub fn spring_from_wheel_rate(wheel_rate: f64, motion_ratio: f64) -> Result<f64, SetupError> {
    let ratio = require_positive("motion_ratio", motion_ratio)?;
    Ok(wheel_rate / (ratio * ratio))
}

/// Spring rate (N/m) for a target frequency, corner mass and motion ratio.
pub fn spring_rate_from_frequency(
    frequency_hz: f64,
    corner_mass_kg: f64,
    motion_ratio: f64,
) -> Result<f64, SetupError> {
    let wheel_rate = wheel_rate_from_frequency(frequency_hz, corner_mass_kg)?;
    spring_from_wheel_rate(wheel_rate, motion_ratio)
}

/// Damper ratios of a category.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DampingRatios {
    /// Rebound as a multiple of bump.
    pub bump_rebound: f64,
    /// Fast as a multiple of slow.
    pub fast_slow: f64,
}

impl DampingRatios {
    pub const fn new(bump_rebound: f64, fast_slow: f64) -> Self {
        Self {
            bump_rebound,
            fast_slow,
        }
    }
}

/// The four damper channels of one corner (N·s/m).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DampingSplit {
    pub bump: f64,
    pub rebound: f64,
    pub fast_bump: f64,
    pub fast_rebound: f64,
}

impl DampingSplit {
    /// Derives every channel from one slow-bump value.
    pub fn from_slow_bump(bump: f64, ratios: DampingRatios) -> Self {
        let rebound = bump * ratios.bump_rebound;
        Self {
            bump,
            rebound,
            fast_bump: bump * ratios.fast_slow,
            fast_rebound: rebound * ratios.fast_slow,
        }
    }

    /// Splits `critical_fraction × 2√(k·m)` into bump and rebound.
    ///
    /// ```text
    /// c       = fraction × 2√(k·m)
    /// bump    = c / (1 + ratio)
    /// rebound = bump × ratio
    /// ```
    pub fn from_spring(
        spring_rate: f64,
        corner_mass_kg: f64,
        ratios: DampingRatios,
        critical_fraction: f64,
    ) -> Result<Self, SetupError> {
        let rate = require_positive("spring_rate", spring_rate)?;
        let mass = require_positive("corner_mass_kg", corner_mass_kg)?;
        let fraction = require_positive("critical_damping_fraction", critical_fraction)?;

        let coefficient = fraction * 2.0 * (rate * mass).sqrt();
        let bump = coefficient / (1.0 + ratios.bump_rebound);
        Ok(Self::from_slow_bump(bump, ratios))
    }

    /// Sum of the slow channels; equals the damping coefficient it came from.
    pub fn slow_total(&self) -> f64 {
        self.bump + self.rebound
    }
}
