//! The mutable parameter map threaded through every pipeline stage.
//!
//! A [`SetupParameterSet`] is created fresh per request, mutated sequentially
//! by each stage and handed to the converter at the end. Values stay in
//! physical units the whole way through; click-based deltas ride alongside
//! in [`ParameterValue::click_offset`] until conversion.

mod key;
mod representation;
mod set;

pub use key::{Corner, ParamKey, ParamKind, Section};
pub use representation::{DecimalScale, Representation};
pub use set::{Corrections, ParameterValue, SetupParameterSet};
