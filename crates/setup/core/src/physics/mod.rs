//! Physics-based baseline calculators.
//!
//! Every function here is a pure transform over plain numbers. None of them
//! clamp: bounding values is the converter's job.

pub mod chassis;
pub mod drivetrain;
pub mod suspension;
pub mod thermal;

pub use chassis::{ride_heights, wing_levels};
pub use drivetrain::{DiffSettings, adjust_diff, wheelbase_toe};
pub use suspension::{
    DampingRatios, DampingSplit, spring_from_wheel_rate, spring_rate_from_frequency,
    wheel_rate_from_frequency,
};
pub use thermal::{cold_pressure, temperature_compensation};
