use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{Goal, NutritionTargets, PhysicalProfile, Sex};
use crate::planner::constants::*;
use crate::planner::units::normalize_height_weight;

/// Payload of the `/update_user_macs` upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroUpload {
    pub cals: u32,
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
}

impl From<MacroUpload> for NutritionTargets {
    fn from(m: MacroUpload) -> Self {
        NutritionTargets {
            target_calories: m.cals,
            target_protein: m.protein,
            target_carbs: m.carbs,
            target_fat: m.fat,
        }
    }
}

/// The two ways targets are derived from a profile.
///
/// They disagree for the same user; `ProfileBased` drives the planning
/// screens, `BodyweightQuick` only feeds the first-launch macro upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetStrategy {
    #[default]
    ProfileBased,
    BodyweightQuick,
}

impl TargetStrategy {
    pub fn compute(&self, profile: &PhysicalProfile) -> NutritionTargets {
        match self {
            TargetStrategy::ProfileBased => compute_targets(profile),
            TargetStrategy::BodyweightQuick => quick_targets(profile).into(),
        }
    }
}

impl FromStr for TargetStrategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "profile" | "profile-based" => Ok(TargetStrategy::ProfileBased),
            "quick" | "bodyweight" | "bodyweight-quick" => Ok(TargetStrategy::BodyweightQuick),
            other => Err(PlanError::InvalidInput(format!(
                "unknown target strategy '{}' (expected 'profile' or 'quick')",
                other
            ))),
        }
    }
}

/// Round half up, the way the stored targets have always been rounded.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn to_whole(x: f64) -> u32 {
    round_half_up(x).max(0.0) as u32
}

/// Keep a whole calorie count inside the supported target range.
fn clamp_calories(calories: f64) -> f64 {
    calories.clamp(MIN_TARGET_CALORIES, MAX_TARGET_CALORIES)
}

/// Mifflin-St Jeor basal metabolic rate.
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, is_male: bool) -> f64 {
    let offset = if is_male {
        BMR_MALE_OFFSET
    } else {
        BMR_FEMALE_OFFSET
    };
    BMR_WEIGHT_COEF * weight_kg + BMR_HEIGHT_COEF * height_cm - BMR_AGE_COEF * age as f64 + offset
}

/// Height and weight in metric units, defaults applied.
fn body_metrics(profile: &PhysicalProfile) -> (f64, f64) {
    normalize_height_weight(
        profile.height_cm.unwrap_or(DEFAULT_HEIGHT_CM),
        profile.weight_kg.unwrap_or(DEFAULT_WEIGHT_KG),
        profile.unit_system,
    )
}

/// A missing sex counts as male.
fn is_male(profile: &PhysicalProfile) -> bool {
    matches!(profile.sex, None | Some(Sex::Male))
}

/// Profile-based daily targets.
///
/// BMR × activity multiplier, adjusted by goal, then split into macros by
/// the goal's percentage split. Calories are rounded before the gram
/// amounts are derived from them.
pub fn compute_targets(profile: &PhysicalProfile) -> NutritionTargets {
    let (height_cm, weight_kg) = body_metrics(profile);
    let age = profile.age.unwrap_or(DEFAULT_AGE);
    let goal = profile.goal.unwrap_or(Goal::Maintain);

    let bmr = mifflin_st_jeor(weight_kg, height_cm, age, is_male(profile));
    let tdee = bmr * activity_multiplier(profile.activity_level);

    let calories = clamp_calories(round_half_up(tdee * goal_factor(goal)));
    let (protein_pct, carbs_pct, fat_pct) = macro_split(goal);

    NutritionTargets {
        target_calories: calories as u32,
        target_protein: to_whole(calories * protein_pct / KCAL_PER_G_PROTEIN),
        target_carbs: to_whole(calories * carbs_pct / KCAL_PER_G_CARBS),
        target_fat: to_whole(calories * fat_pct / KCAL_PER_G_FAT),
    }
}

/// Bodyweight-based quick targets.
///
/// Protein is fixed at 1.6 g per kg, fat takes 25% of calories and carbs
/// fill whatever energy remains.
pub fn quick_targets(profile: &PhysicalProfile) -> MacroUpload {
    let (height_cm, weight_kg) = body_metrics(profile);
    let age = profile.age.unwrap_or(QUICK_DEFAULT_AGE);

    let bmr = mifflin_st_jeor(weight_kg, height_cm, age, is_male(profile));
    let mut cals = round_half_up(bmr * quick_activity_multiplier(profile.activity_level));
    match profile.goal {
        Some(Goal::LoseWeight) => cals = round_half_up(cals * goal_factor(Goal::LoseWeight)),
        Some(Goal::GainMuscle) => cals = round_half_up(cals * goal_factor(Goal::GainMuscle)),
        _ => {}
    }
    let cals = clamp_calories(cals);

    let protein = round_half_up(QUICK_PROTEIN_G_PER_KG * weight_kg);
    let fat_kcal = round_half_up(cals * QUICK_FAT_SHARE);
    let carbs_kcal = (cals - protein * KCAL_PER_G_PROTEIN - fat_kcal).max(0.0);

    MacroUpload {
        cals: cals as u32,
        protein: to_whole(protein),
        fat: to_whole(fat_kcal / KCAL_PER_G_FAT),
        carbs: to_whole(carbs_kcal / KCAL_PER_G_CARBS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, UnitSystem};
    use assert_float_eq::*;

    fn reference_profile() -> PhysicalProfile {
        PhysicalProfile {
            sex: Some(Sex::Male),
            age: Some(30),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some(ActivityLevel::ModeratelyActive),
            goal: Some(Goal::Maintain),
            unit_system: UnitSystem::Metric,
        }
    }

    #[test]
    fn test_mifflin_st_jeor() {
        assert_float_absolute_eq!(mifflin_st_jeor(80.0, 180.0, 30, true), 1780.0, 1e-9);
        assert_float_absolute_eq!(mifflin_st_jeor(80.0, 180.0, 30, false), 1614.0, 1e-9);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(206.925), 207.0);
        assert_eq!(round_half_up(165.5), 166.0);
        assert_eq!(round_half_up(91.4), 91.0);
    }

    #[test]
    fn test_maintain_targets() {
        let targets = compute_targets(&reference_profile());
        assert_eq!(
            targets,
            NutritionTargets {
                target_calories: 2759,
                target_protein: 207,
                target_carbs: 276,
                target_fat: 92,
            }
        );
    }

    #[test]
    fn test_gain_muscle_split() {
        let profile = PhysicalProfile {
            goal: Some(Goal::GainMuscle),
            ..reference_profile()
        };
        let targets = compute_targets(&profile);
        // 2759 * 1.15 = 3172.85
        assert_eq!(targets.target_calories, 3173);
        assert_eq!(targets.target_protein, 238);
        assert_eq!(targets.target_carbs, 357);
        assert_eq!(targets.target_fat, 88);
    }

    #[test]
    fn test_quick_targets() {
        let upload = quick_targets(&reference_profile());
        assert_eq!(
            upload,
            MacroUpload {
                cals: 2759,
                protein: 128,
                fat: 77,
                carbs: 389,
            }
        );
    }

    #[test]
    fn test_quick_targets_lose() {
        let profile = PhysicalProfile {
            goal: Some(Goal::LoseWeight),
            ..reference_profile()
        };
        let upload = quick_targets(&profile);
        assert_eq!(upload.cals, 2207);
        assert_eq!(upload.protein, 128);
        assert_eq!(upload.fat, 61);
        assert_eq!(upload.carbs, 286);
    }

    #[test]
    fn test_quick_activity_table() {
        // bmr 1780 for the reference body
        let cases = [
            (Some(ActivityLevel::Sedentary), 2136),
            (Some(ActivityLevel::LightlyActive), 2759),
            (Some(ActivityLevel::ModeratelyActive), 2759),
            (Some(ActivityLevel::VeryActive), 3382),
            (Some(ActivityLevel::ExtraActive), 2759),
            (None, 2759),
        ];
        for (level, cals) in cases {
            let profile = PhysicalProfile {
                activity_level: level,
                ..reference_profile()
            };
            assert_eq!(quick_targets(&profile).cals, cals, "{:?}", level);
        }
    }

    #[test]
    fn test_huge_weight_is_clamped() {
        let profile = PhysicalProfile {
            weight_kg: Some(1e9),
            ..reference_profile()
        };

        let targets = compute_targets(&profile);
        assert_eq!(targets.target_calories as f64, MAX_TARGET_CALORIES);
        assert!(targets.macro_calories().abs_diff(targets.target_calories as u64) <= 9);

        let upload = quick_targets(&profile);
        assert_eq!(upload.cals as f64, MAX_TARGET_CALORIES);
        assert_eq!(upload.carbs, 0);
    }

    #[test]
    fn test_quick_defaults_differ_from_profile_defaults() {
        let empty = PhysicalProfile::default();
        let profile = TargetStrategy::ProfileBased.compute(&empty);
        let quick = TargetStrategy::BodyweightQuick.compute(&empty);
        assert_ne!(profile, quick);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "quick".parse::<TargetStrategy>().unwrap(),
            TargetStrategy::BodyweightQuick
        );
        assert!("magic".parse::<TargetStrategy>().is_err());
    }
}
