use crate::models::{ActivityLevel, Goal};

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Pounds per kilogram.
pub const LBS_PER_KG: f64 = 2.20462;

/// Imperial heights below this are taken to be inches.
pub const IMPERIAL_HEIGHT_INCH_LIMIT: f64 = 100.0;

/// Imperial weights above this are taken to be pounds.
pub const IMPERIAL_WEIGHT_LBS_LIMIT: f64 = 140.0;

// ─────────────────────────────────────────────────────────────────────────────
// Profile defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_AGE: u32 = 25;
pub const DEFAULT_HEIGHT_CM: f64 = 175.0;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// The bodyweight-based quick targets assume an older default user.
pub const QUICK_DEFAULT_AGE: u32 = 30;

/// Multiplier for a missing or unknown activity level.
pub const DEFAULT_ACTIVITY_MULT: f64 = 1.2;

/// Quick targets assume moderate activity when none is known.
pub const QUICK_DEFAULT_ACTIVITY_MULT: f64 = 1.55;

// ─────────────────────────────────────────────────────────────────────────────
// Mifflin-St Jeor
// ─────────────────────────────────────────────────────────────────────────────

pub const BMR_WEIGHT_COEF: f64 = 10.0;
pub const BMR_HEIGHT_COEF: f64 = 6.25;
pub const BMR_AGE_COEF: f64 = 5.0;
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

// ─────────────────────────────────────────────────────────────────────────────
// Energy
// ─────────────────────────────────────────────────────────────────────────────

/// Atwater factors, kcal per gram.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Lowest calorie target ever returned.
pub const MIN_TARGET_CALORIES: f64 = 1.0;

/// Highest calorie target ever returned. Gram targets derived from it stay
/// far inside `u32`.
pub const MAX_TARGET_CALORIES: f64 = 100_000.0;

/// Quick targets: protein grams per kg of bodyweight.
pub const QUICK_PROTEIN_G_PER_KG: f64 = 1.6;

/// Quick targets: share of calories from fat.
pub const QUICK_FAT_SHARE: f64 = 0.25;

// ─────────────────────────────────────────────────────────────────────────────
// Remote defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_API_BASE: &str = "https://backend-production-28e8.up.railway.app";

/// Dining hall requested when the profile names none.
pub const DEFAULT_HALL: &str = "Earhart";

/// Days fetched by a full recommendation sync.
pub const DEFAULT_SYNC_DAYS: u32 = 6;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Minimum Jaro-Winkler similarity for a search suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.7;

// ─────────────────────────────────────────────────────────────────────────────
// Onboarding choices
// ─────────────────────────────────────────────────────────────────────────────

pub const DINING_HALLS: [&str; 4] = ["Earhart", "Ford", "Wiley", "Windsor"];

pub const ALLERGEN_OPTIONS: [&str; 8] = [
    "peanuts",
    "tree-nuts",
    "dairy",
    "eggs",
    "fish",
    "shellfish",
    "soy",
    "gluten",
];

pub const DIETARY_OPTIONS: [&str; 5] = ["vegetarian", "vegan", "pescatarian", "keto", "paleo"];

/// Activity multiplier applied to BMR.
pub fn activity_multiplier(level: Option<ActivityLevel>) -> f64 {
    match level {
        Some(ActivityLevel::Sedentary) => 1.2,
        Some(ActivityLevel::LightlyActive) => 1.375,
        Some(ActivityLevel::ModeratelyActive) => 1.55,
        Some(ActivityLevel::VeryActive) => 1.725,
        Some(ActivityLevel::ExtraActive) => 1.9,
        None => DEFAULT_ACTIVITY_MULT,
    }
}

/// Activity multiplier used by the quick macro upload.
///
/// The upload table is keyed `sedentary`, `light`, `moderate`, `active`,
/// `very_active`; of the stored activity ids only `sedentary` and
/// `very_active` appear in it, everything else reads as moderate.
pub fn quick_activity_multiplier(level: Option<ActivityLevel>) -> f64 {
    match level {
        Some(ActivityLevel::Sedentary) => 1.2,
        Some(ActivityLevel::VeryActive) => 1.9,
        _ => QUICK_DEFAULT_ACTIVITY_MULT,
    }
}

/// Calorie adjustment applied to TDEE for a goal.
pub fn goal_factor(goal: Goal) -> f64 {
    match goal {
        Goal::LoseWeight => 0.8,
        Goal::Maintain => 1.0,
        Goal::GainMuscle => 1.15,
    }
}

/// Share of calories from (protein, carbs, fat) for a goal.
pub fn macro_split(goal: Goal) -> (f64, f64, f64) {
    match goal {
        Goal::LoseWeight => (0.40, 0.30, 0.30),
        Goal::Maintain => (0.30, 0.40, 0.30),
        Goal::GainMuscle => (0.30, 0.45, 0.25),
    }
}
