use serde_json::Value;

use crate::models::{FoodItem, MealSlot, Meals, NutritionTotals};
use crate::planner::targets::round_half_up;

/// Unrounded running sums.
#[derive(Debug, Clone, Copy, Default)]
struct RawTotals {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

impl RawTotals {
    fn add(&mut self, food: &FoodItem) {
        self.calories += food.calories;
        self.protein += food.protein;
        self.carbs += food.carbs;
        self.fat += food.fat;
    }

    fn rounded(self) -> NutritionTotals {
        let whole = |x: f64| round_half_up(x).max(0.0) as u32;
        NutritionTotals {
            calories: whole(self.calories),
            protein: whole(self.protein),
            carbs: whole(self.carbs),
            fat: whole(self.fat),
        }
    }
}

/// Sum calories and macros over every food in the given slots.
pub fn aggregate_slots<'a>(slots: impl IntoIterator<Item = &'a MealSlot>) -> NutritionTotals {
    let mut raw = RawTotals::default();
    for food in slots.into_iter().flat_map(MealSlot::foods) {
        raw.add(food);
    }
    raw.rounded()
}

/// Total nutrition of a day's breakfast, lunch and dinner.
pub fn aggregate(meals: &Meals) -> NutritionTotals {
    aggregate_slots(meals.iter().map(|(_, slot)| slot))
}

/// Total nutrition straight from raw JSON.
///
/// Accepts `null`, a meal-type keyed object, or anything a single slot may
/// look like; every value of an object is read as a slot. Never fails.
pub fn aggregate_value(value: &Value) -> NutritionTotals {
    match value {
        Value::Object(obj) if !obj.contains_key("foods") && !looks_like_food(obj) => {
            let slots: Vec<MealSlot> = obj.values().map(MealSlot::from_value).collect();
            aggregate_slots(&slots)
        }
        other => aggregate_slots([&MealSlot::from_value(other)]),
    }
}

fn looks_like_food(obj: &serde_json::Map<String, Value>) -> bool {
    ["name", "calories", "cal", "protein", "pro", "carbs", "carb", "fat"]
        .iter()
        .any(|k| obj.contains_key(*k))
}
