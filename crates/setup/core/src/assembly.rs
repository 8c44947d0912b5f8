//! Base setup assembly.
//!
//! Turns category targets plus vehicle, track and temperature facts into the
//! first [`SetupParameterSet`] of a request. The representation and the
//! alignment decimal scale are decided here, once.
//!
//! Springs are stored as *wheel rates*; the refiner converts them to spring
//! rates through the motion ratio. Dampers are derived from the same wheel
//! rate so the ratio correction is never compounded into them.

use tracing::debug;

use crate::classify::Category;
use crate::config::PipelineConfig;
use crate::error::SetupError;
use crate::params::{Corner, DecimalScale, ParamKey, Representation, SetupParameterSet};
use crate::physics::{
    DampingRatios, DampingSplit, DiffSettings, adjust_diff, cold_pressure, ride_heights,
    wheel_rate_from_frequency, wheelbase_toe, wing_levels,
};
use crate::tables::CategoryProfile;
use crate::vehicle::{Axle, Conditions, TrackDescriptor, VehicleDescriptor};

/// Brake power multiplier every setup starts from.
pub const BASE_BRAKE_POWER: f64 = 1.0;
/// Fuel load for a baseline setup (litres).
pub const BASE_FUEL_L: f64 = 30.0;

/// Everything the base setup is computed from.
#[derive(Clone, Copy, Debug)]
pub struct AssemblyInput<'a> {
    pub vehicle: &'a VehicleDescriptor,
    pub track: &'a TrackDescriptor,
    pub conditions: Conditions,
    pub category: Category,
    pub profile: &'a CategoryProfile,
}

/// Builds the base parameter set.
///
/// Fails with [`SetupError::InvalidDescriptor`] when the vehicle weight is
/// missing or non-physical; every other gap falls back to a default.
pub fn assemble_base(
    input: &AssemblyInput<'_>,
    config: &PipelineConfig,
) -> Result<SetupParameterSet, SetupError> {
    let AssemblyInput {
        vehicle,
        track,
        conditions,
        category,
        profile,
    } = *input;

    let corner_mass = vehicle.corner_mass_kg()?;
    let wheel_rate_front = wheel_rate_from_frequency(profile.frequency.front, corner_mass)?;
    let wheel_rate_rear = wheel_rate_from_frequency(profile.frequency.rear, corner_mass)?;

    let representation =
        Representation::detect(vehicle.reference_spring.unwrap_or(wheel_rate_front));
    let decimal_scale = DecimalScale::detect(vehicle.reference_toe);
    let mut set = SetupParameterSet::new(representation, decimal_scale);

    let ratios = DampingRatios::new(profile.bump_rebound_ratio, profile.fast_slow_ratio);
    let heights = ride_heights(profile, track.track_type);

    for axle in [Axle::Front, Axle::Rear] {
        let wheel_rate = match axle {
            Axle::Front => wheel_rate_front,
            Axle::Rear => wheel_rate_rear,
        };
        let pressure = cold_pressure(
            profile.hot_pressure.get(axle),
            conditions.ambient_c,
            conditions.road_c,
            profile.pressure_gain_per_lap,
            config.laps_to_optimal,
        );
        let toe = wheelbase_toe(
            profile.toe.get(axle),
            vehicle.wheelbase_mm,
            config.reference_wheelbase_mm,
        );
        let dampers = DampingSplit::from_spring(
            wheel_rate,
            corner_mass,
            ratios,
            config.critical_damping_fraction,
        )?;

        for corner in Corner::on(axle) {
            set.insert(ParamKey::Pressure(corner), pressure);
            set.insert(ParamKey::Camber(corner), profile.camber.get(axle));
            set.insert(ParamKey::Toe(corner), toe);
            set.insert(ParamKey::SpringRate(corner), wheel_rate);
            set.insert(ParamKey::RideHeight(corner), heights.get(axle));
            set.insert(ParamKey::DampBump(corner), dampers.bump);
            set.insert(ParamKey::DampRebound(corner), dampers.rebound);
            set.insert(ParamKey::DampFastBump(corner), dampers.fast_bump);
            set.insert(ParamKey::DampFastRebound(corner), dampers.fast_rebound);
            if axle == Axle::Front {
                set.insert(ParamKey::Caster(corner), profile.caster);
            }
        }
    }

    set.insert(ParamKey::ArbFront, profile.arb.front);
    set.insert(ParamKey::ArbRear, profile.arb.rear);

    let diff = adjust_diff(
        DiffSettings::new(profile.diff_power, profile.diff_coast, profile.diff_preload),
        vehicle.drivetrain,
        vehicle.effective_torque_nm(),
    );
    set.insert(ParamKey::DiffPower, diff.power);
    set.insert(ParamKey::DiffCoast, diff.coast);
    set.insert(ParamKey::DiffPreload, diff.preload);

    set.insert(ParamKey::BrakeBias, profile.brake_bias);
    set.insert(ParamKey::BrakePower, BASE_BRAKE_POWER);

    let speed = track
        .average_speed_kph
        .unwrap_or(config.default_track_speed_kph);
    let wings = wing_levels(profile.aero_balance, speed);
    set.insert(ParamKey::WingFront, wings.front);
    set.insert(ParamKey::WingRear, wings.rear);

    set.insert(ParamKey::Fuel, BASE_FUEL_L);

    debug!(
        vehicle = %vehicle.id,
        %category,
        %representation,
        %decimal_scale,
        corner_mass,
        parameters = set.len(),
        "assembled base setup"
    );
    Ok(set)
}
