//! Differential and wheelbase adjustments.
//!
//! Applied once while assembling the base setup and never revisited.

use crate::vehicle::Drivetrain;

/// Torque above which an RWD car gets the full high-torque lock bonus (Nm).
pub const HIGH_TORQUE_NM: f64 = 600.0;
/// Torque above which an RWD car gets the medium lock bonus (Nm).
pub const MEDIUM_TORQUE_NM: f64 = 400.0;

/// Differential lock settings (% lock, preload in Nm).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffSettings {
    pub power: f64,
    pub coast: f64,
    pub preload: f64,
}

impl DiffSettings {
    pub const fn new(power: f64, coast: f64, preload: f64) -> Self {
        Self {
            power,
            coast,
            preload,
        }
    }

    const fn offset(self, power: f64, coast: f64, preload: f64) -> Self {
        Self::new(self.power + power, self.coast + coast, self.preload + preload)
    }
}

/// Adjusts category diff targets for drivetrain layout and torque.
///
/// - RWD above [`HIGH_TORQUE_NM`]: power +10, coast +5, preload +5
/// - RWD above [`MEDIUM_TORQUE_NM`]: power +5, coast +3
/// - FWD: power −15, coast −10, preload −10 (less lock fights torque steer)
/// - AWD: power +5, coast +5
///
/// Results are not bounded here.
pub fn adjust_diff(base: DiffSettings, drivetrain: Drivetrain, torque_nm: f64) -> DiffSettings {
    match drivetrain {
        Drivetrain::Rwd if torque_nm > HIGH_TORQUE_NM => base.offset(10.0, 5.0, 5.0),
        Drivetrain::Rwd if torque_nm > MEDIUM_TORQUE_NM => base.offset(5.0, 3.0, 0.0),
        Drivetrain::Rwd => base,
        Drivetrain::Fwd => base.offset(-15.0, -10.0, -10.0),
        Drivetrain::Awd => base.offset(5.0, 5.0, 0.0),
    }
}

/// Scales a toe target tuned for `reference_mm` to the actual wheelbase.
///
/// Shorter cars are more sensitive to toe, so they get proportionally more.
/// A missing or non-physical wheelbase leaves the value unchanged.
pub fn wheelbase_toe(toe: f64, wheelbase_mm: Option<f64>, reference_mm: f64) -> f64 {
    match wheelbase_mm {
        Some(wheelbase) if wheelbase.is_finite() && wheelbase > 0.0 => {
            toe * (reference_mm / wheelbase)
        }
        _ => toe,
    }
}
