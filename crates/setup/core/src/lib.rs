//! Physics-based setup computation for a racing simulator.
//!
//! `setup-core` turns a vehicle, a track, a driving-style behavior and a set
//! of driver-preference sliders into a complete numeric setup. Everything is
//! pure and synchronous; tables are injected through [`TargetsOracle`],
//! [`BehaviorCatalog`], [`LimitProvider`] and [`ClickStrategy`], and every
//! request runs through [`engine::SetupPipeline`].
pub mod assembly;
pub mod classify;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod modifiers;
pub mod params;
pub mod physics;
pub mod refine;
pub mod report;
pub mod tables;
pub mod vehicle;

pub use assembly::{AssemblyInput, assemble_base};
pub use classify::{Category, classify};
pub use config::PipelineConfig;
pub use convert::{
    ClampEvent, ClickRange, ClickStrategy, Conversion, FixedDivisor, GenericLimits, LimitProvider,
    Limits, OutputValue, RangeInterpolation, ValueConverter,
};
pub use engine::{GeneratedSetup, SetupPipeline, SetupRequest, SetupSheet};
pub use error::{ErrorSeverity, SetupError, SetupFault};
pub use modifiers::{
    BehaviorAxis, BehaviorCatalog, BehaviorCoefficients, BehaviorEngine, BehaviorProfile,
    BuiltinBehaviors, DriverPreferenceProfile, PreferenceAxis, Preset, ProfileTuner, recommend,
};
pub use params::{
    Corner, Corrections, DecimalScale, ParamKey, ParamKind, ParameterValue, Representation,
    Section, SetupParameterSet,
};
pub use refine::{PhysicsRefiner, VehiclePhysics};
pub use report::{ChangeRecord, Stage};
pub use tables::{AxlePair, BuiltinTargets, CategoryProfile, TargetsOracle};
pub use vehicle::{Axle, Conditions, Drivetrain, TrackDescriptor, TrackType, VehicleDescriptor};
