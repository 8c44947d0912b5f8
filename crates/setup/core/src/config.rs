/// Pipeline configuration constants and tunable parameters.
///
/// Constants are physical thresholds that the pipeline treats as fixed.
/// The struct fields are runtime-tunable defaults that callers may override,
/// typically from a TOML file loaded by `setup-content`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Warm-up laps assumed before the tyres reach their hot target.
    pub laps_to_optimal: u32,

    /// Fraction of critical damping used for the baseline damper split.
    pub critical_damping_fraction: f64,

    /// Wheelbase the category toe targets were tuned for (mm).
    pub reference_wheelbase_mm: f64,

    /// Ambient temperature used when no telemetry snapshot is supplied (°C).
    pub default_ambient_c: f64,

    /// Road temperature used when no telemetry snapshot is supplied (°C).
    pub default_road_c: f64,

    /// Average speed assumed for tracks that do not publish one (km/h).
    pub default_track_speed_kph: f64,

    /// Clamp adjustments larger than this share of the allowed span are
    /// logged as warnings.
    pub large_clamp_fraction: f64,
}

impl PipelineConfig {
    // ===== physical thresholds =====
    /// Spring-like values below this magnitude are click indices.
    pub const CLICK_SPRING_THRESHOLD: f64 = 1000.0;
    /// Alignment values above this magnitude are already hundredths-scaled.
    pub const HUNDREDTHS_THRESHOLD: f64 = 50.0;
    /// Minimum rake (degrees) before anti-bottoming stiffening kicks in.
    pub const ANTI_BOTTOMING_RAKE_DEG: f64 = 1.0;
    /// Spring multiplier applied by anti-bottoming.
    pub const ANTI_BOTTOMING_SPRING_GAIN: f64 = 1.15;
    /// Damping multiplier applied by anti-bottoming (≈ √1.15).
    pub const ANTI_BOTTOMING_DAMPING_GAIN: f64 = 1.07;
    /// Fast damping ceiling on rough surfaces, as a share of slow damping.
    pub const ROUGH_FAST_DAMPING_CAP: f64 = 0.5;
    /// Torque assumed when neither torque nor power is known (Nm).
    pub const FALLBACK_TORQUE_NM: f64 = 400.0;
    /// hp → Nm rough conversion used when torque is missing.
    pub const HP_TO_TORQUE: f64 = 1.36;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LAPS_TO_OPTIMAL: u32 = 3;
    pub const DEFAULT_CRITICAL_DAMPING_FRACTION: f64 = 0.7;
    pub const DEFAULT_REFERENCE_WHEELBASE_MM: f64 = 2600.0;
    pub const DEFAULT_AMBIENT_C: f64 = 25.0;
    pub const DEFAULT_ROAD_C: f64 = 30.0;
    pub const DEFAULT_TRACK_SPEED_KPH: f64 = 150.0;
    pub const DEFAULT_LARGE_CLAMP_FRACTION: f64 = 0.25;

    pub fn new() -> Self {
        Self {
            laps_to_optimal: Self::DEFAULT_LAPS_TO_OPTIMAL,
            critical_damping_fraction: Self::DEFAULT_CRITICAL_DAMPING_FRACTION,
            reference_wheelbase_mm: Self::DEFAULT_REFERENCE_WHEELBASE_MM,
            default_ambient_c: Self::DEFAULT_AMBIENT_C,
            default_road_c: Self::DEFAULT_ROAD_C,
            default_track_speed_kph: Self::DEFAULT_TRACK_SPEED_KPH,
            large_clamp_fraction: Self::DEFAULT_LARGE_CLAMP_FRACTION,
        }
    }

    pub fn with_laps_to_optimal(mut self, laps: u32) -> Self {
        self.laps_to_optimal = laps;
        self
    }

    pub fn with_critical_damping_fraction(mut self, fraction: f64) -> Self {
        self.critical_damping_fraction = fraction;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
