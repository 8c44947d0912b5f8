//! Vehicle classification.
//!
//! Maps a descriptor to one of seven categories. Rules are checked in a fixed
//! precedence order and the first match wins; `street` is the exhaustive
//! fallback so classification cannot fail.

use tracing::debug;

use crate::vehicle::VehicleDescriptor;

/// Vehicle category driving every category-specific target.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    Formula,
    Prototype,
    Gt,
    StreetSport,
    Street,
    Vintage,
    Drift,
}

impl Category {
    /// High-downforce categories that run large rake and need anti-bottoming.
    pub const fn is_high_downforce(&self) -> bool {
        matches!(self, Self::Formula | Self::Prototype)
    }
}

const FORMULA_TOKENS: &[&str] = &["formula", "f1", "f2", "f3", "f4"];
/// Id fragments that mark open-wheelers whose tokens alone are ambiguous.
const FORMULA_ID_MARKERS: &[&str] = &["rss_formula", "fia_f"];
const PROTOTYPE_PREFIXES: &[&str] = &["lmp", "prototype", "lmh", "lmdh"];
const PROTOTYPE_TOKENS: &[&str] = &["p1", "p2"];
const GT_TOKENS: &[&str] = &["gt1", "gt2", "gt3", "gt4", "gte", "gtc", "dtm", "tcr"];
const VINTAGE_TOKENS: &[&str] = &["vintage", "classic", "historic", "1960", "1970", "60s", "70s"];

/// Power-to-weight (hp/kg) above which a car is treated as a race-grade GT.
pub const TOP_TIER_POWER_TO_WEIGHT: f64 = 0.4;
/// Power-to-weight (hp/kg) above which a road car is a sports car.
pub const SPORT_POWER_TO_WEIGHT: f64 = 0.25;
/// Light, low-power cars without other markers are period cars.
const VINTAGE_POWER_TO_WEIGHT: f64 = 0.15;
const VINTAGE_MAX_POWER_HP: f64 = 250.0;

/// Classifies a vehicle, first match wins:
///
/// 1. drift flag or a `drift` token
/// 2. formula, prototype, GT tokens in id/name/class; vintage tokens in
///    id/name only
/// 3. power-to-weight tiers (skipped when power or weight is unknown)
/// 4. `street`
pub fn classify(vehicle: &VehicleDescriptor) -> Category {
    let category = classify_inner(vehicle);
    debug!(vehicle = %vehicle.id, %category, "classified vehicle");
    category
}

fn classify_inner(vehicle: &VehicleDescriptor) -> Category {
    let tokens = vehicle.tokens();
    let has = |set: &[&str]| tokens.iter().any(|t| set.contains(&t.as_str()));
    let has_prefix = |set: &[&str]| tokens.iter().any(|t| set.iter().any(|p| t.starts_with(p)));

    if vehicle.is_drift || has(&["drift"]) {
        return Category::Drift;
    }
    let id = vehicle.id.to_ascii_lowercase();
    if has(FORMULA_TOKENS) || FORMULA_ID_MARKERS.iter().any(|m| id.contains(m)) {
        return Category::Formula;
    }
    if has_prefix(PROTOTYPE_PREFIXES) || has(PROTOTYPE_TOKENS) {
        return Category::Prototype;
    }
    if has(GT_TOKENS) {
        return Category::Gt;
    }
    if vehicle
        .name_tokens()
        .iter()
        .any(|t| VINTAGE_TOKENS.contains(&t.as_str()))
    {
        return Category::Vintage;
    }

    if let Some(ratio) = vehicle.power_to_weight() {
        if ratio > TOP_TIER_POWER_TO_WEIGHT {
            return Category::Gt;
        }
        if ratio > SPORT_POWER_TO_WEIGHT {
            return Category::StreetSport;
        }
        let light_power = vehicle.power_hp.is_some_and(|hp| hp < VINTAGE_MAX_POWER_HP);
        if ratio < VINTAGE_POWER_TO_WEIGHT && light_power {
            return Category::Vintage;
        }
    }

    Category::Street
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::Drivetrain;

    fn car(id: &str) -> VehicleDescriptor {
        VehicleDescriptor::new(id, Drivetrain::Rwd)
    }

    #[test]
    fn drift_wins_over_everything() {
        let gt_drift = car("ks_gt3_drift");
        assert_eq!(classify(&gt_drift), Category::Drift);

        let flagged = car("rss_formula_hybrid").with_drift_flag(true);
        assert_eq!(classify(&flagged), Category::Drift);
    }

    #[test]
    fn token_rules_in_order() {
        assert_eq!(classify(&car("rss_formula_hybrid_2021")), Category::Formula);
        assert_eq!(classify(&car("ks_lotus_f1_2018")), Category::Formula);
        assert_eq!(classify(&car("urd_lmp1_hybrid")), Category::Prototype);
        assert_eq!(classify(&car("ks_ferrari_488_gt3")), Category::Gt);
        assert_eq!(classify(&car("ks_audi_tt_tcr")), Category::Gt);
        let classic = car("ks_ford_gt40").with_name("Ford GT40 1966 classic");
        assert_eq!(classify(&classic), Category::Vintage);
    }

    #[test]
    fn class_tag_is_considered() {
        let tagged = car("some_mod_car").with_class_tag("GT3");
        assert_eq!(classify(&tagged), Category::Gt);
    }

    #[test]
    fn rss_and_fia_prefixes_alone_are_not_formula() {
        let mercer = car("rss_gtm_mercer_v8").with_class_tag("GT3");
        assert_eq!(classify(&mercer), Category::Gt);
        let fia_gt = car("fia_gt_championship_car").with_class_tag("GTE");
        assert_eq!(classify(&fia_gt), Category::Gt);

        assert_eq!(classify(&car("rss_formula_americas_2020")), Category::Formula);
        assert_eq!(classify(&car("fia_f")), Category::Formula);
    }

    #[test]
    fn vintage_tokens_ignore_class_tag() {
        let tagged = car("mod_coupe")
            .with_class_tag("Historic")
            .with_power_hp(300.0)
            .with_weight_kg(1000.0);
        assert_eq!(classify(&tagged), Category::StreetSport);

        let named = car("mod_coupe").with_name("Historic Coupe");
        assert_eq!(classify(&named), Category::Vintage);
    }

    #[test]
    fn plain_road_car_is_street() {
        let road = car("ks_mazda_mx5_nd").with_power_hp(160.0).with_weight_kg(1000.0);
        assert_eq!(classify(&road), Category::Street);
    }

    #[test]
    fn power_to_weight_tiers() {
        let fast = car("mod_hyper").with_power_hp(700.0).with_weight_kg(1400.0);
        assert_eq!(classify(&fast), Category::Gt);

        let sporty = car("mod_hot_hatch").with_power_hp(400.0).with_weight_kg(1300.0);
        assert_eq!(classify(&sporty), Category::StreetSport);

        let old = car("mod_beetle").with_power_hp(50.0).with_weight_kg(800.0);
        assert_eq!(classify(&old), Category::Vintage);
    }

    #[test]
    fn missing_data_falls_through_to_street() {
        assert_eq!(classify(&car("mystery")), Category::Street);
        let no_weight = car("mystery").with_power_hp(900.0);
        assert_eq!(classify(&no_weight), Category::Street);
    }

    #[test]
    fn category_names_round_trip() {
        assert_eq!(Category::StreetSport.to_string(), "street_sport");
        assert_eq!("GT".parse::<Category>(), Ok(Category::Gt));
    }
}
