//! Physics refinement of the modified setup.
//!
//! Runs after every modifier and before clamping, in a fixed order:
//!
//! 1. motion-ratio correction (wheel rate → spring rate)
//! 2. anti-bottoming for high-downforce cars on steep rake
//! 3. fast-damping cap on rough surfaces
//!
//! Every step marks the parameters it touched with a [`Corrections`] flag and
//! skips parameters that already carry it, so no step can act twice on the
//! same value.

use tracing::debug;

use crate::classify::Category;
use crate::config::PipelineConfig;
use crate::error::SetupError;
use crate::params::{Corrections, ParamKey, ParamKind, SetupParameterSet};
use crate::physics::spring_from_wheel_rate;
use crate::report::{ChangeRecord, Stage};
use crate::tables::{AxlePair, CategoryProfile};
use crate::vehicle::{Axle, TrackType, VehicleDescriptor};

/// Per-vehicle physical facts the refiner needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehiclePhysics {
    pub motion_ratio: AxlePair,
}

impl VehiclePhysics {
    pub const fn new(motion_ratio: AxlePair) -> Self {
        Self { motion_ratio }
    }

    /// Vehicle motion ratios, falling back to the category defaults per axle.
    pub fn resolve(vehicle: &VehicleDescriptor, profile: &CategoryProfile) -> Self {
        let pick = |axle: Axle| {
            vehicle
                .motion_ratio(axle)
                .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
                .unwrap_or(profile.motion_ratio.get(axle))
        };
        Self::new(AxlePair::new(
            pick(Axle::Front),
            pick(Axle::Rear),
        ))
    }
}

/// Applies the refinement steps to a parameter set.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhysicsRefiner;

impl PhysicsRefiner {
    pub fn new() -> Self {
        Self
    }

    /// Runs all three steps in order.
    pub fn refine(
        &self,
        set: &mut SetupParameterSet,
        category: Category,
        rake_deg: f64,
        track_type: TrackType,
        physics: &VehiclePhysics,
    ) -> Result<Vec<ChangeRecord>, SetupError> {
        let mut changes = self.correct_motion_ratio(set, physics)?;
        changes.extend(self.anti_bottoming(set, category, rake_deg));
        changes.extend(self.cap_fast_damping(set, track_type));
        Ok(changes)
    }

    /// Converts every spring value from wheel rate to spring rate:
    /// `spring = wheel_rate / mr²`.
    pub fn correct_motion_ratio(
        &self,
        set: &mut SetupParameterSet,
        physics: &VehiclePhysics,
    ) -> Result<Vec<ChangeRecord>, SetupError> {
        let mut changes = Vec::new();
        for key in set.keys_of(ParamKind::Spring) {
            let (Some(axle), Some(param)) = (key.axle(), set.get_mut(key)) else {
                continue;
            };
            if param.corrections.contains(Corrections::MOTION_RATIO) {
                continue;
            }
            let ratio = physics.motion_ratio.get(axle);
            let before = param.value;
            param.value = spring_from_wheel_rate(before, ratio)?;
            param.corrections.insert(Corrections::MOTION_RATIO);
            if param.value != before {
                changes.push(ChangeRecord::new(Stage::MotionRatio, key, before, param.value));
            }
        }
        debug!(
            front = physics.motion_ratio.front,
            rear = physics.motion_ratio.rear,
            corrected = changes.len(),
            "motion ratio correction"
        );
        Ok(changes)
    }

    /// Stiffens springs and dampers of high-downforce cars running more
    /// rake than [`PipelineConfig::ANTI_BOTTOMING_RAKE_DEG`].
    pub fn anti_bottoming(
        &self,
        set: &mut SetupParameterSet,
        category: Category,
        rake_deg: f64,
    ) -> Vec<ChangeRecord> {
        if !category.is_high_downforce() || rake_deg <= PipelineConfig::ANTI_BOTTOMING_RAKE_DEG {
            return Vec::new();
        }

        let mut changes = Vec::new();
        for (key, param) in set.iter_mut() {
            let kind = key.kind();
            let gain = if kind == ParamKind::Spring {
                PipelineConfig::ANTI_BOTTOMING_SPRING_GAIN
            } else if kind.is_damper() {
                PipelineConfig::ANTI_BOTTOMING_DAMPING_GAIN
            } else {
                continue;
            };
            if param.corrections.contains(Corrections::ANTI_BOTTOMING) {
                continue;
            }
            let before = param.value;
            param.value *= gain;
            param.corrections.insert(Corrections::ANTI_BOTTOMING);
            changes.push(ChangeRecord::new(Stage::AntiBottoming, *key, before, param.value));
        }
        debug!(%category, rake_deg, stiffened = changes.len(), "anti-bottoming");
        changes
    }

    /// Limits each fast damper channel to half its slow counterpart on rough
    /// surfaces.
    ///
    /// Every fast channel is flagged so the converter keeps the bound after
    /// clamping. In click representation the pending click delta is not
    /// allowed to push the channel back up once capped.
    pub fn cap_fast_damping(
        &self,
        set: &mut SetupParameterSet,
        track_type: TrackType,
    ) -> Vec<ChangeRecord> {
        if !track_type.is_rough() {
            return Vec::new();
        }

        let fast_keys: Vec<ParamKey> = set
            .iter()
            .filter(|(key, _)| key.kind().is_fast_damper())
            .map(|(key, _)| *key)
            .collect();

        let mut changes = Vec::new();
        for key in fast_keys {
            let Some(slow) = key.slow_counterpart().and_then(|slow| set.value(slow)) else {
                continue;
            };
            let Some(param) = set.get_mut(key) else {
                continue;
            };
            if param.corrections.contains(Corrections::FAST_DAMPING_CAP) {
                continue;
            }
            param.corrections.insert(Corrections::FAST_DAMPING_CAP);

            let cap = slow * PipelineConfig::ROUGH_FAST_DAMPING_CAP;
            if param.value > cap {
                let before = param.value;
                param.value = cap;
                param.click_offset = param.click_offset.min(0.0);
                changes.push(ChangeRecord::new(Stage::FastDampingCap, key, before, cap));
            }
        }
        debug!(%track_type, capped = changes.len(), "fast damping cap");
        changes
    }
}
