use std::collections::BTreeMap;

use bitflags::bitflags;

use super::key::{ParamKey, ParamKind};
use super::representation::{DecimalScale, Representation};

bitflags! {
    /// Refinement steps already applied to a parameter.
    ///
    /// The refiner checks these before acting so a step can never be applied
    /// twice to the same value, whatever order the stages are called in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Corrections: u8 {
        const MOTION_RATIO     = 1 << 0;
        const ANTI_BOTTOMING   = 1 << 1;
        const FAST_DAMPING_CAP = 1 << 2;
    }
}

/// One parameter's value while the pipeline runs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterValue {
    /// Physical value (psi, degrees, N/m, mm, %...).
    pub value: f64,
    /// Pending click delta, added after the value is converted to clicks.
    /// Always zero for absolute parameters.
    pub click_offset: f64,
    pub representation: Representation,
    pub corrections: Corrections,
}

impl ParameterValue {
    pub const fn new(value: f64, representation: Representation) -> Self {
        Self {
            value,
            click_offset: 0.0,
            representation,
            corrections: Corrections::empty(),
        }
    }

    pub const fn is_clicks(&self) -> bool {
        self.representation.is_clicks()
    }
}

/// Ordered `(section, key) → value` map for one setup request.
#[derive(Clone, Debug, PartialEq)]
pub struct SetupParameterSet {
    values: BTreeMap<ParamKey, ParameterValue>,
    representation: Representation,
    decimal_scale: DecimalScale,
}

impl SetupParameterSet {
    pub fn new(representation: Representation, decimal_scale: DecimalScale) -> Self {
        Self {
            values: BTreeMap::new(),
            representation,
            decimal_scale,
        }
    }

    pub const fn representation(&self) -> Representation {
        self.representation
    }

    pub const fn decimal_scale(&self) -> DecimalScale {
        self.decimal_scale
    }

    /// Inserts a physical value, tagging it with the set's representation if
    /// the parameter kind can be click-based.
    pub fn insert(&mut self, key: ParamKey, value: f64) {
        let representation = if key.kind().is_click_capable() {
            self.representation
        } else {
            Representation::Absolute
        };
        self.values
            .insert(key, ParameterValue::new(value, representation));
    }

    pub fn get(&self, key: ParamKey) -> Option<&ParameterValue> {
        self.values.get(&key)
    }

    pub fn get_mut(&mut self, key: ParamKey) -> Option<&mut ParameterValue> {
        self.values.get_mut(&key)
    }

    pub fn value(&self, key: ParamKey) -> Option<f64> {
        self.values.get(&key).map(|p| p.value)
    }

    pub fn contains(&self, key: ParamKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Keys of one kind, in map order.
    pub fn keys_of(&self, kind: ParamKind) -> Vec<ParamKey> {
        self.values
            .keys()
            .filter(|key| key.kind() == kind)
            .copied()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &ParameterValue)> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ParamKey, &mut ParameterValue)> {
        self.values.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
