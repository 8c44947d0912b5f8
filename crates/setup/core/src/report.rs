//! Records of what each stage changed.

use crate::params::ParamKey;

/// Pipeline stage that produced a change.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Behavior,
    Profile,
    MotionRatio,
    AntiBottoming,
    FastDampingCap,
}

/// One parameter edit made by a stage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeRecord {
    pub stage: Stage,
    pub key: ParamKey,
    pub before: f64,
    pub after: f64,
    /// Click delta queued for conversion, zero for absolute parameters.
    pub click_delta: f64,
}

impl ChangeRecord {
    pub const fn new(stage: Stage, key: ParamKey, before: f64, after: f64) -> Self {
        Self {
            stage,
            key,
            before,
            after,
            click_delta: 0.0,
        }
    }

    #[must_use]
    pub const fn with_click_delta(mut self, click_delta: f64) -> Self {
        self.click_delta = click_delta;
        self
    }
}

impl core::fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] {}: {:.3} → {:.3}", self.stage, self.key, self.before, self.after)?;
        if self.click_delta != 0.0 {
            write!(f, " ({:+.1} clicks)", self.click_delta)?;
        }
        Ok(())
    }
}
