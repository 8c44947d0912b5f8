//! Per-parameter adjustment composition.
//!
//! Every modifier stage follows the same order for each parameter:
//! Offset (summed) → Scale (summed, then multiplied once) → Clicks (summed,
//! queued for conversion). Contributions from all axes are collected first
//! and applied once, so the result does not depend on axis order.

use std::collections::BTreeMap;

use tracing::trace;

use crate::params::{ParamKey, ParamKind, Representation, SetupParameterSet};
use crate::report::{ChangeRecord, Stage};
use crate::vehicle::Axle;

/// Fractional scale expressed as clicks when a scale effect lands on a
/// click-based parameter: a 30 % effect becomes 1.5 clicks.
pub const CLICKS_PER_UNIT_SCALE: f64 = 5.0;

/// A single change to one parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjustment {
    /// Additive change in the parameter's physical unit.
    Offset(f64),
    /// Fractional change (0.3 = +30 %); summed with other scales, then
    /// multiplied once.
    Scale(f64),
    /// Click delta for click-based parameters.
    Clicks(f64),
}

/// The adjustments collected for one parameter.
///
/// ```
/// # use setup_core::modifiers::{Adjustment, AdjustmentStack};
/// let mut stack = AdjustmentStack::new();
/// stack.add(Adjustment::Offset(2.0));
/// stack.add(Adjustment::Scale(0.2));
/// stack.add(Adjustment::Scale(0.1));
///
/// // (10 + 2) × (1 + 0.3)
/// assert!((stack.apply(10.0) - 15.6).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjustmentStack {
    adjustments: Vec<Adjustment>,
}

impl AdjustmentStack {
    pub fn new() -> Self {
        Self {
            adjustments: Vec::new(),
        }
    }

    pub fn add(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    pub fn extend(&mut self, adjustments: impl IntoIterator<Item = Adjustment>) {
        self.adjustments.extend(adjustments);
    }

    pub fn offset_sum(&self) -> f64 {
        self.adjustments
            .iter()
            .filter_map(|a| match a {
                Adjustment::Offset(v) => Some(*v),
                _ => None,
            })
            .sum()
    }

    pub fn scale_sum(&self) -> f64 {
        self.adjustments
            .iter()
            .filter_map(|a| match a {
                Adjustment::Scale(v) => Some(*v),
                _ => None,
            })
            .sum()
    }

    pub fn click_sum(&self) -> f64 {
        self.adjustments
            .iter()
            .filter_map(|a| match a {
                Adjustment::Clicks(v) => Some(*v),
                _ => None,
            })
            .sum()
    }

    /// Applies offsets and scales to a physical value.
    ///
    /// ```text
    /// result = (base + offset_sum) × (1 + scale_sum)
    /// ```
    pub fn apply(&self, base: f64) -> f64 {
        let after_offset = base + self.offset_sum();
        let scale = self.scale_sum();
        if scale == 0.0 {
            after_offset
        } else {
            after_offset * (1.0 + scale)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.adjustments.len()
    }
}

/// How an effect changes its targets at full strength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    Add(f64),
    Scale(f64),
    Clicks(f64),
}

impl Op {
    fn at(self, strength: f64) -> Adjustment {
        match self {
            Op::Add(v) => Adjustment::Offset(v * strength),
            Op::Scale(v) => Adjustment::Scale(v * strength),
            Op::Clicks(v) => Adjustment::Clicks(v * strength),
        }
    }
}

/// Parameters an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// Every parameter of a kind, optionally restricted to one axle.
    Kind(ParamKind, Option<Axle>),
    /// One specific parameter.
    Key(ParamKey),
}

impl Target {
    pub const fn all(kind: ParamKind) -> Self {
        Self::Kind(kind, None)
    }

    pub const fn front(kind: ParamKind) -> Self {
        Self::Kind(kind, Some(Axle::Front))
    }

    pub const fn rear(kind: ParamKind) -> Self {
        Self::Kind(kind, Some(Axle::Rear))
    }

    fn keys(&self, set: &SetupParameterSet) -> Vec<ParamKey> {
        match *self {
            Target::Kind(kind, axle) => set
                .keys_of(kind)
                .into_iter()
                .filter(|key| axle.is_none() || key.axle() == axle)
                .collect(),
            Target::Key(key) if set.contains(key) => vec![key],
            Target::Key(_) => Vec::new(),
        }
    }
}

/// A fixed, documented change: which parameters, and by how much at full
/// strength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    pub target: Target,
    pub op: Op,
    /// Replacement op for click-based parameters.
    pub click_op: Option<Op>,
}

impl Effect {
    pub const fn new(target: Target, op: Op) -> Self {
        Self {
            target,
            op,
            click_op: None,
        }
    }

    #[must_use]
    pub const fn in_clicks(mut self, op: Op) -> Self {
        self.click_op = Some(op);
        self
    }

    /// The op for a parameter, honoring the representation.
    fn op_for(&self, key: ParamKey, representation: Representation) -> Op {
        if !(representation.is_clicks() && key.kind().is_click_capable()) {
            return self.op;
        }
        match (self.click_op, self.op) {
            (Some(op), _) => op,
            (None, Op::Scale(v)) => Op::Clicks(v * CLICKS_PER_UNIT_SCALE),
            (None, op) => op,
        }
    }
}

/// Adjustments collected across all axes of one stage.
#[derive(Clone, Debug, Default)]
pub struct ParameterAdjustments {
    stacks: BTreeMap<ParamKey, AdjustmentStack>,
}

impl ParameterAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one effect at `strength` to every parameter it targets.
    ///
    /// Zero strength contributes nothing.
    pub fn collect(
        &mut self,
        set: &SetupParameterSet,
        effect: &Effect,
        strength: f64,
        representation: Representation,
    ) {
        if strength == 0.0 {
            return;
        }
        for key in effect.target.keys(set) {
            let adjustment = effect.op_for(key, representation).at(strength);
            self.stacks.entry(key).or_default().add(adjustment);
        }
    }

    pub fn stack(&self, key: ParamKey) -> Option<&AdjustmentStack> {
        self.stacks.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Applies every stack once and reports what changed.
    pub fn apply(self, set: &mut SetupParameterSet, stage: Stage) -> Vec<ChangeRecord> {
        let mut changes = Vec::with_capacity(self.stacks.len());
        for (key, stack) in self.stacks {
            let Some(param) = set.get_mut(key) else {
                continue;
            };
            let before = param.value;
            param.value = stack.apply(before);
            let clicks = if param.is_clicks() {
                stack.click_sum()
            } else {
                0.0
            };
            param.click_offset += clicks;

            if param.value != before || clicks != 0.0 {
                trace!(%key, before, after = param.value, clicks, %stage, "adjusted");
                changes.push(ChangeRecord::new(stage, key, before, param.value).with_click_delta(clicks));
            }
        }
        changes
    }
}
