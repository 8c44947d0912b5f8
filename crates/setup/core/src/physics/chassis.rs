//! Ride height and wing baselines.

use crate::tables::{AxlePair, CategoryProfile};
use crate::vehicle::TrackType;

/// Extra ride height for mountain-pass roads (mm).
pub const TOUGE_RIDE_HEIGHT_MM: f64 = 15.0;
/// Extra ride height for public-road surfaces (mm).
pub const STREET_RIDE_HEIGHT_MM: f64 = 10.0;

/// Highest wing level.
pub const MAX_WING_LEVEL: f64 = 5.0;
const FAST_TRACK_KPH: f64 = 180.0;
const SLOW_TRACK_KPH: f64 = 120.0;

/// Category ride heights raised for rough surfaces.
///
/// Both axles move together so the rake is preserved.
pub fn ride_heights(profile: &CategoryProfile, track_type: TrackType) -> AxlePair {
    let lift = match track_type {
        TrackType::Circuit => 0.0,
        TrackType::Touge => TOUGE_RIDE_HEIGHT_MM,
        TrackType::Street => STREET_RIDE_HEIGHT_MM,
    };
    AxlePair::new(
        profile.ride_height.front + lift,
        profile.ride_height.rear + lift,
    )
}

/// Wing levels for a track's average speed, split by the aero balance.
///
/// Fast tracks trade downforce for straight-line speed; slow tracks want more
/// wing. Levels are whole steps in `0..=MAX_WING_LEVEL`.
pub fn wing_levels(aero_balance: f64, average_speed_kph: f64) -> AxlePair {
    let multiplier = if average_speed_kph > FAST_TRACK_KPH {
        0.7
    } else if average_speed_kph < SLOW_TRACK_KPH {
        1.3
    } else {
        1.0
    };
    let total = MAX_WING_LEVEL * multiplier;
    let level = |share: f64| (total * share).floor().clamp(0.0, MAX_WING_LEVEL);
    AxlePair::new(level(1.0 - aero_balance), level(aero_balance))
}
