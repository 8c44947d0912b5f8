//! Invariants that must hold across the whole pipeline, checked over a grid
//! of vehicles, behaviors and slider profiles.

use setup_core::physics::spring_from_wheel_rate;
use setup_core::{
    AssemblyInput, BehaviorEngine, BehaviorProfile, BuiltinTargets, Category, Conditions, Corner,
    Drivetrain, DriverPreferenceProfile, FixedDivisor, GenericLimits, LimitProvider, ParamKey,
    PhysicsRefiner, PipelineConfig, Preset, ProfileTuner, Representation, SetupPipeline,
    SetupRequest, TrackDescriptor, TrackType, ValueConverter, VehicleDescriptor, VehiclePhysics,
    assemble_base, classify,
};
use strum::IntoEnumIterator;

fn vehicles() -> Vec<VehicleDescriptor> {
    vec![
        VehicleDescriptor::new("ks_ferrari_488_gt3", Drivetrain::Rwd)
            .with_class_tag("GT3")
            .with_power_hp(550.0)
            .with_weight_kg(1260.0),
        VehicleDescriptor::new("rss_formula_rss_4", Drivetrain::Rwd)
            .with_power_hp(230.0)
            .with_weight_kg(520.0),
        VehicleDescriptor::new("ks_audi_r18_lmp1", Drivetrain::Awd)
            .with_power_hp(900.0)
            .with_weight_kg(875.0),
        VehicleDescriptor::new("ks_mazda_mx5_nd", Drivetrain::Rwd)
            .with_power_hp(160.0)
            .with_weight_kg(1050.0),
        VehicleDescriptor::new("ks_vw_golf_gti", Drivetrain::Fwd)
            .with_power_hp(230.0)
            .with_weight_kg(1350.0)
            .with_wheelbase_mm(2630.0),
        VehicleDescriptor::new("ks_nissan_skyline_r34_drift", Drivetrain::Rwd)
            .with_power_hp(420.0)
            .with_weight_kg(1400.0),
        VehicleDescriptor::new("ks_lotus_25", Drivetrain::Rwd)
            .with_name("Lotus 25 Classic")
            .with_class_tag("classic")
            .with_power_hp(180.0)
            .with_weight_kg(450.0),
    ]
}

fn tracks() -> Vec<TrackDescriptor> {
    vec![
        TrackDescriptor::new("monza", TrackType::Circuit).with_average_speed_kph(220.0),
        TrackDescriptor::new("akina", TrackType::Touge).with_average_speed_kph(80.0),
        TrackDescriptor::new("shutoko", TrackType::Street),
    ]
}

fn slider_profiles() -> Vec<DriverPreferenceProfile> {
    let neutral = DriverPreferenceProfile::neutral();
    vec![
        neutral,
        DriverPreferenceProfile {
            rotation: 0.0,
            slide: 0.0,
            grip: 0.0,
            ..neutral
        },
        DriverPreferenceProfile {
            aero: 1.0,
            rotation: 1.0,
            slide: 1.0,
            aggression: 1.0,
            drift: 1.0,
            performance: 1.0,
            grip: 1.0,
        },
        DriverPreferenceProfile {
            aggression: 0.5,
            performance: 0.8,
            ..neutral
        },
    ]
}

#[test]
fn unit_motion_ratio_is_identity_and_ratio_is_monotonic() {
    for rate in [10_000.0, 87_050.0, 250_000.0] {
        assert_eq!(spring_from_wheel_rate(rate, 1.0).unwrap(), rate);
        let mut previous = f64::INFINITY;
        for ratio in [0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1] {
            let spring = spring_from_wheel_rate(rate, ratio).unwrap();
            assert!(spring < previous, "not decreasing at {ratio}");
            previous = spring;
        }
    }
}

#[test]
fn every_output_sits_inside_generic_limits() {
    let pipeline = SetupPipeline::default();
    for vehicle in vehicles() {
        for track in tracks() {
            for preset in Preset::iter() {
                for prefs in slider_profiles() {
                    let request = SetupRequest::new(vehicle.clone(), track.clone())
                        .with_behavior(preset.as_ref())
                        .with_preferences(prefs);
                    let setup = pipeline.generate(&request).expect("grid request should generate");
                    assert_eq!(setup.representation, Representation::Absolute);

                    for (key, output) in &setup.parameters {
                        let limits = GenericLimits.limits(&vehicle, *key).unwrap();
                        let value = if key.kind().is_alignment() {
                            output.value / setup.decimal_scale.factor()
                        } else {
                            output.value
                        };
                        // rounding may step just past a fractional bound
                        assert!(
                            value >= limits.min - 0.5 && value <= limits.max + 0.5,
                            "{} {key} = {value} outside {limits:?}",
                            vehicle.id
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn rough_tracks_keep_fast_damping_under_half_slow() {
    let pipeline = SetupPipeline::default();
    let click_based = vehicles()
        .into_iter()
        .map(|v| v.with_reference_spring(8.0));
    for vehicle in vehicles().into_iter().chain(click_based) {
        for track in tracks().into_iter().filter(|t| t.track_type.is_rough()) {
            let grid = Preset::iter().flat_map(|p| slider_profiles().into_iter().map(move |s| (p, s)));
            for (preset, prefs) in grid {
                let request = SetupRequest::new(vehicle.clone(), track.clone())
                    .with_behavior(preset.as_ref())
                    .with_preferences(prefs);
                let setup = pipeline.generate(&request).unwrap();
                for corner in Corner::ALL {
                    let pairs = [
                        (ParamKey::DampBump(corner), ParamKey::DampFastBump(corner)),
                        (ParamKey::DampRebound(corner), ParamKey::DampFastRebound(corner)),
                    ];
                    for (slow, fast) in pairs {
                        let slow = setup.get(slow).unwrap();
                        let fast = setup.get(fast).unwrap();
                        assert!(
                            fast <= 0.5 * slow,
                            "{} {preset} {corner} ({}): {fast} vs {slow}",
                            vehicle.id,
                            setup.representation
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn anti_bottoming_needs_downforce_category_and_steep_rake() {
    let refiner = PhysicsRefiner::new();
    let config = PipelineConfig::default();
    let vehicle = &vehicles()[0];
    let track = &tracks()[0];

    for category in Category::iter() {
        let profile = BuiltinTargets::profile(category);
        let input = AssemblyInput {
            vehicle,
            track,
            conditions: Conditions::default(),
            category,
            profile: &profile,
        };
        for rake in [0.5, 1.0, 1.5, 2.5] {
            let mut set = assemble_base(&input, &config).unwrap();
            let before = set.clone();
            let changes = refiner.anti_bottoming(&mut set, category, rake);
            let expected = category.is_high_downforce() && rake > 1.0;
            assert_eq!(!changes.is_empty(), expected, "{category} at {rake}°");
            if !expected {
                assert_eq!(set, before);
            }
        }
    }
}

#[test]
fn balanced_behavior_is_exact_identity() {
    let config = PipelineConfig::default();
    for vehicle in vehicles() {
        let category = classify(&vehicle);
        let profile = BuiltinTargets::profile(category);
        let track = TrackDescriptor::new("monza", TrackType::Circuit);
        let input = AssemblyInput {
            vehicle: &vehicle,
            track: &track,
            conditions: Conditions::default(),
            category,
            profile: &profile,
        };
        let mut set = assemble_base(&input, &config).unwrap();
        let before = set.clone();
        let representation = set.representation();

        let balanced = BehaviorProfile::preset(Preset::Balanced);
        let changes = BehaviorEngine.apply(&mut set, &balanced, representation).unwrap();
        assert!(changes.is_empty());
        let changes = ProfileTuner
            .apply(&mut set, &DriverPreferenceProfile::neutral(), representation)
            .unwrap();
        assert!(changes.is_empty());
        assert_eq!(set, before, "{}", vehicle.id);
    }
}

#[test]
fn clamp_is_idempotent_on_refined_sets() {
    let config = PipelineConfig::default();
    let limits = GenericLimits;
    let clicks = FixedDivisor::default();
    let converter = ValueConverter::new(&limits, &clicks);

    for vehicle in vehicles() {
        for track in tracks() {
            let category = classify(&vehicle);
            let profile = BuiltinTargets::profile(category);
            let input = AssemblyInput {
                vehicle: &vehicle,
                track: &track,
                conditions: Conditions::new(5.0, 8.0),
                category,
                profile: &profile,
            };
            let mut set = assemble_base(&input, &config).unwrap();
            let representation = set.representation();
            BehaviorEngine
                .apply(&mut set, &BehaviorProfile::preset(Preset::Drift), representation)
                .unwrap();
            ProfileTuner
                .apply(&mut set, &slider_profiles()[2], representation)
                .unwrap();
            PhysicsRefiner
                .refine(
                    &mut set,
                    category,
                    profile.rake_deg,
                    track.track_type,
                    &VehiclePhysics::resolve(&vehicle, &profile),
                )
                .unwrap();

            converter.clamp(&vehicle, &mut set);
            let once = set.clone();
            let events = converter.clamp(&vehicle, &mut set);
            assert!(events.is_empty(), "{}: {events:?}", vehicle.id);
            assert_eq!(set, once);
        }
    }
}

#[test]
fn motion_ratio_correction_happens_once_per_spring() {
    let setup = SetupPipeline::default()
        .generate(&SetupRequest::new(vehicles()[0].clone(), tracks()[0].clone()))
        .unwrap();
    for corner in Corner::ALL {
        let key = ParamKey::SpringRate(corner);
        let corrections = setup
            .changes
            .iter()
            .filter(|c| c.key == key && c.stage == setup_core::Stage::MotionRatio)
            .count();
        assert_eq!(corrections, 1, "{key}");
    }
}
