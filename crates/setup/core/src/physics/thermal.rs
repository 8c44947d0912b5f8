//! Cold-from-hot tyre pressure.
//!
//! Tyres gain a roughly constant amount of pressure per warm-up lap, so the
//! cold setting is the hot target minus that gain. Cold tarmac slows the
//! warm-up and needs a little extra starting pressure; hot tarmac does the
//! opposite. Air temperature has a smaller effect in the same direction.

/// Road temperature below which the cold-road compensation applies (°C).
pub const COLD_ROAD_C: f64 = 20.0;
/// psi added per °C of road below [`COLD_ROAD_C`].
pub const COLD_ROAD_GAIN: f64 = 0.075;
/// Road temperature above which the hot-road compensation applies (°C).
pub const HOT_ROAD_C: f64 = 35.0;
/// psi removed per °C of road above [`HOT_ROAD_C`].
pub const HOT_ROAD_LOSS: f64 = 0.05;
/// Ambient temperature below which the cold-air compensation applies (°C).
pub const COLD_AMBIENT_C: f64 = 15.0;
/// psi added per °C of air below [`COLD_AMBIENT_C`].
pub const COLD_AMBIENT_GAIN: f64 = 0.03;
/// Ambient temperature above which the hot-air compensation applies (°C).
pub const HOT_AMBIENT_C: f64 = 30.0;
/// psi removed per °C of air above [`HOT_AMBIENT_C`].
pub const HOT_AMBIENT_LOSS: f64 = 0.02;

/// Cold starting pressure that reaches `hot_target` after `laps_to_optimal`.
///
/// ```text
/// cold = hot − gain × laps + temperature_compensation(ambient, road)
/// ```
///
/// Never clamps and never rounds.
pub fn cold_pressure(
    hot_target: f64,
    ambient_c: f64,
    road_c: f64,
    gain_per_lap: f64,
    laps_to_optimal: u32,
) -> f64 {
    hot_target - gain_per_lap * f64::from(laps_to_optimal)
        + temperature_compensation(ambient_c, road_c)
}

/// Pressure offset (psi) for the temperature snapshot; zero in the neutral band.
pub fn temperature_compensation(ambient_c: f64, road_c: f64) -> f64 {
    let mut offset = 0.0;

    if road_c < COLD_ROAD_C {
        offset += (COLD_ROAD_C - road_c) * COLD_ROAD_GAIN;
    } else if road_c > HOT_ROAD_C {
        offset -= (road_c - HOT_ROAD_C) * HOT_ROAD_LOSS;
    }

    if ambient_c < COLD_AMBIENT_C {
        offset += (COLD_AMBIENT_C - ambient_c) * COLD_AMBIENT_GAIN;
    } else if ambient_c > HOT_AMBIENT_C {
        offset -= (ambient_c - HOT_AMBIENT_C) * HOT_AMBIENT_LOSS;
    }

    offset
}
