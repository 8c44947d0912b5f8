use crate::config::PipelineConfig;

/// How the simulator stores click-capable parameters (springs, dampers, ARB).
///
/// Decided once when the base setup is assembled and carried unchanged
/// through every stage; never re-inferred from intermediate values.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Representation {
    /// Integer index into a per-vehicle step table.
    Clicks,
    /// Continuous physical unit (N/m, N·s/m).
    #[default]
    Absolute,
}

impl Representation {
    /// Detects the representation from a spring-like reference value.
    pub fn detect(spring_reference: f64) -> Self {
        if spring_reference.abs() < PipelineConfig::CLICK_SPRING_THRESHOLD {
            Self::Clicks
        } else {
            Self::Absolute
        }
    }

    pub const fn is_clicks(&self) -> bool {
        matches!(self, Self::Clicks)
    }
}

/// Decimal scale of camber and toe in the simulator's setup file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DecimalScale {
    /// Degrees × 10.
    #[default]
    Tenths,
    /// Degrees × 100.
    Hundredths,
}

impl DecimalScale {
    /// Infers the scale from an existing alignment value; a magnitude above
    /// 50 can only be hundredths of a degree.
    pub fn detect(reference: Option<f64>) -> Self {
        match reference {
            Some(value) if value.abs() > PipelineConfig::HUNDREDTHS_THRESHOLD => Self::Hundredths,
            _ => Self::Tenths,
        }
    }

    pub const fn factor(&self) -> f64 {
        match self {
            Self::Tenths => 10.0,
            Self::Hundredths => 100.0,
        }
    }
}
