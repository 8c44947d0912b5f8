//! Common error infrastructure for setup-core.
//!
//! Every fallible pipeline operation returns [`SetupError`]. The pipeline never
//! swallows a computation error: it propagates to the caller unchanged.
//! Clamping an out-of-bound computed value is *not* an error; it is reported
//! through [`crate::convert::ClampEvent`] instead.
//!
//! # Design Principles
//!
//! - **Fail fast**: a formula input that is missing or non-physical is rejected,
//!   never replaced by zero
//! - **Boundary validation**: sliders and coefficients are checked before any
//!   stage runs
//! - **Severity Classification**: errors are categorized for caller handling

use crate::classify::Category;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Injected tables are inconsistent with the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: weight missing, slider outside [0, 1]
    Validation,

    /// Internal error - injected configuration does not cover a case.
    ///
    /// Examples: a custom targets table without a row for a category
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a configuration bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all setup-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who must fix the problem
pub trait SetupFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by the setup computation pipeline.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SetupError {
    /// A field required by a formula is missing or non-physical.
    #[error("invalid descriptor field `{field}`: {reason}")]
    InvalidDescriptor { field: &'static str, reason: String },

    /// A slider or coefficient lies outside its documented domain.
    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRangeInput {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The requested behavior id is not in the behavior catalog.
    #[error("unknown behavior '{0}'")]
    UnknownBehavior(String),

    /// The injected targets table has no row for a category.
    #[error("no category targets for {0}")]
    MissingTargets(Category),
}

impl SetupError {
    pub(crate) fn missing(field: &'static str) -> Self {
        Self::InvalidDescriptor {
            field,
            reason: "required but not provided".to_string(),
        }
    }

    pub(crate) fn non_physical(field: &'static str, value: f64) -> Self {
        Self::InvalidDescriptor {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        }
    }

    pub(crate) fn out_of_range(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRangeInput {
            name: name.into(),
            value,
            min,
            max,
        }
    }
}

impl SetupFault for SetupError {
    fn severity(&self) -> ErrorSeverity {
        use SetupError::*;
        match self {
            InvalidDescriptor { .. } | OutOfRangeInput { .. } | UnknownBehavior(_) => {
                ErrorSeverity::Validation
            }
            MissingTargets(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use SetupError::*;
        match self {
            InvalidDescriptor { .. } => "SETUP_INVALID_DESCRIPTOR",
            OutOfRangeInput { .. } => "SETUP_OUT_OF_RANGE_INPUT",
            UnknownBehavior(_) => "SETUP_UNKNOWN_BEHAVIOR",
            MissingTargets(_) => "SETUP_MISSING_TARGETS",
        }
    }
}

/// Returns `value` if it is a positive finite number.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, SetupError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SetupError::non_physical(field, value))
    }
}

/// Checks that `value` lies in `[min, max]`.
pub(crate) fn require_within(
    name: impl Into<String>,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), SetupError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SetupError::out_of_range(name, value, min, max))
    }
}
