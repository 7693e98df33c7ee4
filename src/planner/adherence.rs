use crate::models::{NutritionTargets, NutritionTotals};

/// `1 - |actual - target| / target`, or 0 without a target. May be negative.
fn closeness(actual: u32, target: u32) -> f64 {
    if target == 0 {
        return 0.0;
    }
    1.0 - (actual as f64 - target as f64).abs() / target as f64
}

/// Protein surplus is not penalized.
fn protein_fill(actual: u32, target: u32) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (actual as f64 / target as f64).min(1.0)
}

/// How closely a day's totals match the targets, in `[0, 1]`.
///
/// Average of four sub-scores (calories, protein, carbs, fat). Returns 0 when
/// either side is missing.
pub fn score(totals: Option<&NutritionTotals>, targets: Option<&NutritionTargets>) -> f64 {
    let (Some(totals), Some(targets)) = (totals, targets) else {
        return 0.0;
    };

    let calorie = closeness(totals.calories, targets.target_calories);
    let protein = protein_fill(totals.protein, targets.target_protein);
    let carbs = closeness(totals.carbs, targets.target_carbs);
    let fat = closeness(totals.fat, targets.target_fat);

    ((calorie + protein + carbs + fat) / 4.0).clamp(0.0, 1.0)
}
