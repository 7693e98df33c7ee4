use serde::{Deserialize, Serialize};

use crate::models::Meals;

/// Summed nutrition of a day's meals, rounded to whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// Daily calorie and macro targets derived from a physical profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    pub target_calories: u32,
    pub target_protein: u32,
    pub target_carbs: u32,
    pub target_fat: u32,
}

impl NutritionTargets {
    /// Calories implied by the macro grams (4/4/9 kcal per gram).
    pub fn macro_calories(&self) -> u64 {
        u64::from(self.target_protein) * 4
            + u64::from(self.target_carbs) * 4
            + u64::from(self.target_fat) * 9
    }
}

/// A fully assembled day: meals plus nutrition summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,

    pub meals: Meals,

    pub total_nutrition: NutritionTotals,

    pub targets: NutritionTargets,

    pub adherence_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,
}
