//! Behavior and driver-preference modifiers.
//!
//! Both stages describe their changes as [`Effect`] tables and compose them
//! through [`ParameterAdjustments`]: contributions are summed per parameter,
//! then applied once. Neither stage clamps.

pub mod adjust;
pub mod behavior;
pub mod profile;

pub use adjust::{
    Adjustment, AdjustmentStack, CLICKS_PER_UNIT_SCALE, Effect, Op, ParameterAdjustments, Target,
};
pub use behavior::{
    BehaviorAxis, BehaviorCatalog, BehaviorCoefficients, BehaviorEngine, BehaviorProfile,
    BuiltinBehaviors, Preset, recommend,
};
pub use profile::{DriverPreferenceProfile, PreferenceAxis, ProfileTuner};
