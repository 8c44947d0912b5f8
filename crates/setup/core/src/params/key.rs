use crate::vehicle::Axle;

/// Section of the simulator's setup file a parameter is written under.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Section {
    Tyres,
    Suspension,
    Alignment,
    Differential,
    Arb,
    Brakes,
    Aero,
    Fuel,
}

/// Wheel position.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Corner {
    Lf,
    Rf,
    Lr,
    Rr,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Lf, Corner::Rf, Corner::Lr, Corner::Rr];

    pub const fn axle(&self) -> Axle {
        match self {
            Self::Lf | Self::Rf => Axle::Front,
            Self::Lr | Self::Rr => Axle::Rear,
        }
    }

    /// The two corners of an axle.
    pub const fn on(axle: Axle) -> [Corner; 2] {
        match axle {
            Axle::Front => [Corner::Lf, Corner::Rf],
            Axle::Rear => [Corner::Lr, Corner::Rr],
        }
    }
}

/// Physical kind of a parameter; decides bounds, rounding and how modifiers
/// compose onto it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ParamKind {
    Pressure,
    Camber,
    Toe,
    Caster,
    Spring,
    RideHeight,
    Bump,
    Rebound,
    FastBump,
    FastRebound,
    Arb,
    Diff,
    BrakeBias,
    BrakePower,
    Wing,
    Fuel,
}

impl ParamKind {
    pub const fn is_damper(&self) -> bool {
        matches!(
            self,
            Self::Bump | Self::Rebound | Self::FastBump | Self::FastRebound
        )
    }

    pub const fn is_slow_damper(&self) -> bool {
        matches!(self, Self::Bump | Self::Rebound)
    }

    pub const fn is_fast_damper(&self) -> bool {
        matches!(self, Self::FastBump | Self::FastRebound)
    }

    /// Kinds a simulator may store as click indices.
    pub const fn is_click_capable(&self) -> bool {
        matches!(self, Self::Spring | Self::Arb) || self.is_damper()
    }

    /// Kinds written scaled by the alignment decimal scale.
    pub const fn is_alignment(&self) -> bool {
        matches!(self, Self::Camber | Self::Toe)
    }
}

/// A single setup parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKey {
    Pressure(Corner),
    Camber(Corner),
    Toe(Corner),
    Caster(Corner),
    SpringRate(Corner),
    RideHeight(Corner),
    DampBump(Corner),
    DampRebound(Corner),
    DampFastBump(Corner),
    DampFastRebound(Corner),
    ArbFront,
    ArbRear,
    DiffPower,
    DiffCoast,
    DiffPreload,
    BrakeBias,
    BrakePower,
    WingFront,
    WingRear,
    Fuel,
}

impl ParamKey {
    pub const fn kind(&self) -> ParamKind {
        use ParamKey::*;
        match self {
            Pressure(_) => ParamKind::Pressure,
            Camber(_) => ParamKind::Camber,
            Toe(_) => ParamKind::Toe,
            Caster(_) => ParamKind::Caster,
            SpringRate(_) => ParamKind::Spring,
            RideHeight(_) => ParamKind::RideHeight,
            DampBump(_) => ParamKind::Bump,
            DampRebound(_) => ParamKind::Rebound,
            DampFastBump(_) => ParamKind::FastBump,
            DampFastRebound(_) => ParamKind::FastRebound,
            ArbFront | ArbRear => ParamKind::Arb,
            DiffPower | DiffCoast | DiffPreload => ParamKind::Diff,
            BrakeBias => ParamKind::BrakeBias,
            BrakePower => ParamKind::BrakePower,
            WingFront | WingRear => ParamKind::Wing,
            Fuel => ParamKind::Fuel,
        }
    }

    pub const fn section(&self) -> Section {
        match self.kind() {
            ParamKind::Pressure => Section::Tyres,
            ParamKind::Camber | ParamKind::Toe | ParamKind::Caster => Section::Alignment,
            ParamKind::Spring
            | ParamKind::RideHeight
            | ParamKind::Bump
            | ParamKind::Rebound
            | ParamKind::FastBump
            | ParamKind::FastRebound => Section::Suspension,
            ParamKind::Arb => Section::Arb,
            ParamKind::Diff => Section::Differential,
            ParamKind::BrakeBias | ParamKind::BrakePower => Section::Brakes,
            ParamKind::Wing => Section::Aero,
            ParamKind::Fuel => Section::Fuel,
        }
    }

    pub const fn corner(&self) -> Option<Corner> {
        use ParamKey::*;
        match self {
            Pressure(c) | Camber(c) | Toe(c) | Caster(c) | SpringRate(c) | RideHeight(c)
            | DampBump(c) | DampRebound(c) | DampFastBump(c) | DampFastRebound(c) => Some(*c),
            _ => None,
        }
    }

    pub const fn axle(&self) -> Option<Axle> {
        match self {
            ParamKey::ArbFront | ParamKey::WingFront => Some(Axle::Front),
            ParamKey::ArbRear | ParamKey::WingRear => Some(Axle::Rear),
            _ => match self.corner() {
                Some(corner) => Some(corner.axle()),
                None => None,
            },
        }
    }

    /// The slow channel a fast damper channel is capped against.
    pub const fn slow_counterpart(&self) -> Option<ParamKey> {
        match self {
            ParamKey::DampFastBump(c) => Some(ParamKey::DampBump(*c)),
            ParamKey::DampFastRebound(c) => Some(ParamKey::DampRebound(*c)),
            _ => None,
        }
    }

    /// Key name inside its section, as the simulator spells it.
    pub fn name(&self) -> String {
        use ParamKey::*;
        match self {
            Pressure(c) => format!("PRESSURE_{c}"),
            Camber(c) => format!("CAMBER_{c}"),
            Toe(c) => format!("TOE_{c}"),
            Caster(c) => format!("CASTER_{c}"),
            SpringRate(c) => format!("SPRING_RATE_{c}"),
            RideHeight(c) => format!("RIDE_HEIGHT_{c}"),
            DampBump(c) => format!("DAMP_BUMP_{c}"),
            DampRebound(c) => format!("DAMP_REBOUND_{c}"),
            DampFastBump(c) => format!("DAMP_FAST_BUMP_{c}"),
            DampFastRebound(c) => format!("DAMP_FAST_REBOUND_{c}"),
            ArbFront => "FRONT".to_string(),
            ArbRear => "REAR".to_string(),
            DiffPower => "POWER".to_string(),
            DiffCoast => "COAST".to_string(),
            DiffPreload => "PRELOAD".to_string(),
            BrakeBias => "FRONT_BIAS".to_string(),
            BrakePower => "BRAKE_POWER_MULT".to_string(),
            WingFront => "WING_FRONT".to_string(),
            WingRear => "WING_REAR".to_string(),
            Fuel => "FUEL".to_string(),
        }
    }

    /// Per-corner keys of one kind on an axle.
    pub fn on_axle(make: fn(Corner) -> ParamKey, axle: Axle) -> [ParamKey; 2] {
        Corner::on(axle).map(make)
    }

    /// Per-corner keys of one kind on all four corners.
    pub fn all_corners(make: fn(Corner) -> ParamKey) -> [ParamKey; 4] {
        Corner::ALL.map(make)
    }
}

impl core::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.section(), self.name())
    }
}
