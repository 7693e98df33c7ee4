pub mod food;
pub mod meal;
pub mod plan;
pub mod profile;
pub mod recommendations;

pub use food::FoodItem;
pub use meal::{MealBundle, MealSlot, MealType, Meals};
pub use plan::{DayPlan, NutritionTargets, NutritionTotals};
pub use profile::{ActivityLevel, Goal, PhysicalProfile, Sex, UnitSystem, UserProfile};
pub use recommendations::{canonical_day_key, RecommendationStore};

use serde_json::Value;

/// Read a JSON value as a strictly positive, finite number.
///
/// Numeric strings are accepted; anything else reads as absent.
pub(crate) fn positive_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.is_finite() && n > 0.0).then_some(n)
}
