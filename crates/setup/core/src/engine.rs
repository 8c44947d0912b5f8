//! The setup computation pipeline.
//!
//! [`SetupPipeline`] owns the injected tables and runs one request through
//! every stage in order:
//!
//! ```text
//! classify → targets → assemble → behavior → preferences → refine → clamp → convert
//! ```
//!
//! Inputs are validated before any stage runs. The pipeline holds no mutable
//! state, so one instance can serve requests from many threads.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::assembly::{AssemblyInput, assemble_base};
use crate::classify::{Category, classify};
use crate::config::PipelineConfig;
use crate::convert::{
    ClampEvent, ClickStrategy, FixedDivisor, GenericLimits, LimitProvider, OutputValue,
    ValueConverter,
};
use crate::error::SetupError;
use crate::modifiers::{
    BehaviorCatalog, BehaviorEngine, BehaviorProfile, BuiltinBehaviors, DriverPreferenceProfile,
    Preset, ProfileTuner, recommend,
};
use crate::params::{DecimalScale, ParamKey, Representation};
use crate::refine::{PhysicsRefiner, VehiclePhysics};
use crate::report::ChangeRecord;
use crate::tables::{BuiltinTargets, TargetsOracle};
use crate::vehicle::{Conditions, TrackDescriptor, VehicleDescriptor};

/// One setup request.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetupRequest {
    pub vehicle: VehicleDescriptor,
    pub track: TrackDescriptor,
    /// Behavior id; when absent the behavior is recommended from the
    /// preferences, or `balanced` without them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: Option<DriverPreferenceProfile>,
    /// Temperature snapshot; config defaults when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Option<Conditions>,
}

impl SetupRequest {
    pub fn new(vehicle: VehicleDescriptor, track: TrackDescriptor) -> Self {
        Self {
            vehicle,
            track,
            behavior: None,
            preferences: None,
            conditions: None,
        }
    }

    #[must_use]
    pub fn with_behavior(mut self, id: impl Into<String>) -> Self {
        self.behavior = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_preferences(mut self, preferences: DriverPreferenceProfile) -> Self {
        self.preferences = Some(preferences);
        self
    }

    #[must_use]
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// The behavior id this request resolves to.
    pub fn behavior_id(&self) -> String {
        match (&self.behavior, &self.preferences) {
            (Some(id), _) => id.clone(),
            (None, Some(preferences)) => recommend(preferences).to_string(),
            (None, None) => Preset::Balanced.to_string(),
        }
    }
}

/// Output of one request.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedSetup {
    pub category: Category,
    pub behavior: String,
    pub representation: Representation,
    pub decimal_scale: DecimalScale,
    pub parameters: BTreeMap<ParamKey, OutputValue>,
    /// Every edit made by the modifier and refiner stages, in order.
    pub changes: Vec<ChangeRecord>,
    pub clamp_events: Vec<ClampEvent>,
}

impl GeneratedSetup {
    pub fn get(&self, key: ParamKey) -> Option<f64> {
        self.parameters.get(&key).map(|v| v.value)
    }

    /// Parameters grouped `section → key → value`, as a writer consumes them.
    pub fn sheet(&self) -> SetupSheet {
        let mut sections: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (key, output) in &self.parameters {
            sections
                .entry(key.section().to_string())
                .or_default()
                .insert(key.name(), output.value);
        }
        SetupSheet {
            category: self.category,
            behavior: self.behavior.clone(),
            representation: self.representation,
            decimal_scale: self.decimal_scale,
            sections,
        }
    }
}

/// String-keyed view of a generated setup.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetupSheet {
    pub category: Category,
    pub behavior: String,
    pub representation: Representation,
    pub decimal_scale: DecimalScale,
    pub sections: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Runs setup requests against injected tables.
#[derive(Clone)]
pub struct SetupPipeline {
    config: PipelineConfig,
    targets: Arc<dyn TargetsOracle>,
    behaviors: Arc<dyn BehaviorCatalog>,
    limits: Arc<dyn LimitProvider>,
    clicks: Arc<dyn ClickStrategy>,
}

impl SetupPipeline {
    /// Pipeline over the builtin tables.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            targets: Arc::new(BuiltinTargets),
            behaviors: Arc::new(BuiltinBehaviors),
            limits: Arc::new(GenericLimits),
            clicks: Arc::new(FixedDivisor::default()),
        }
    }

    #[must_use]
    pub fn with_targets(mut self, targets: Arc<dyn TargetsOracle>) -> Self {
        self.targets = targets;
        self
    }

    #[must_use]
    pub fn with_behaviors(mut self, behaviors: Arc<dyn BehaviorCatalog>) -> Self {
        self.behaviors = behaviors;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Arc<dyn LimitProvider>) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_click_strategy(mut self, clicks: Arc<dyn ClickStrategy>) -> Self {
        self.clicks = clicks;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn behaviors(&self) -> &dyn BehaviorCatalog {
        self.behaviors.as_ref()
    }

    /// Resolves and validates the request's behavior.
    pub fn resolve_behavior(&self, request: &SetupRequest) -> Result<BehaviorProfile, SetupError> {
        let id = request.behavior_id();
        let behavior = self
            .behaviors
            .behavior(&id)
            .ok_or(SetupError::UnknownBehavior(id))?;
        behavior.validate()?;
        Ok(behavior)
    }

    pub fn generate(&self, request: &SetupRequest) -> Result<GeneratedSetup, SetupError> {
        let behavior = self.resolve_behavior(request)?;
        if let Some(preferences) = &request.preferences {
            preferences.validate()?;
        }

        let vehicle = &request.vehicle;
        let category = classify(vehicle);
        let profile = self
            .targets
            .targets(category)
            .ok_or(SetupError::MissingTargets(category))?;
        let conditions = request
            .conditions
            .unwrap_or_else(|| Conditions::from_config(&self.config));

        let input = AssemblyInput {
            vehicle,
            track: &request.track,
            conditions,
            category,
            profile: &profile,
        };
        let mut set = assemble_base(&input, &self.config)?;
        let representation = set.representation();

        let mut changes = BehaviorEngine.apply(&mut set, &behavior, representation)?;
        if let Some(preferences) = &request.preferences {
            changes.extend(ProfileTuner.apply(&mut set, preferences, representation)?);
        }
        let physics = VehiclePhysics::resolve(vehicle, &profile);
        changes.extend(PhysicsRefiner.refine(
            &mut set,
            category,
            profile.rake_deg,
            request.track.track_type,
            &physics,
        )?);

        let converter = ValueConverter::new(self.limits.as_ref(), self.clicks.as_ref())
            .with_large_clamp_fraction(self.config.large_clamp_fraction);
        let mut clamp_events = converter.clamp(vehicle, &mut set);
        let conversion = converter.convert(category, &set);
        clamp_events.extend(conversion.clamp_events);
        let parameters = conversion.parameters;

        info!(
            vehicle = %vehicle.id,
            track = %request.track.id,
            %category,
            behavior = %behavior.id,
            %representation,
            changes = changes.len(),
            clamped = clamp_events.len(),
            "generated setup"
        );

        Ok(GeneratedSetup {
            category,
            behavior: behavior.id,
            representation,
            decimal_scale: set.decimal_scale(),
            parameters,
            changes,
            clamp_events,
        })
    }
}

impl Default for SetupPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl core::fmt::Debug for SetupPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SetupPipeline")
            .field("config", &self.config)
            .field("behaviors", &self.behaviors.ids())
            .finish_non_exhaustive()
    }
}
