use crate::models::{DayPlan, FoodItem, NutritionTargets, UnitSystem, UserProfile};
use crate::planner::units::normalize_height_weight;
use crate::planner::{cm_to_feet_inches, kg_to_lbs, MacroUpload};

/// Display one day's plan with per-meal nutrition and the day summary.
pub fn display_day_plan(plan: &DayPlan) {
    println!();
    match &plan.hall {
        Some(hall) => println!("=== Day {} Meal Plan ({}) ===", plan.day, hall),
        None => println!("=== Day {} Meal Plan ===", plan.day),
    }
    println!();

    for (meal, slot) in plan.meals.iter() {
        let hall = slot.hall().map(|h| format!(" @ {}", h)).unwrap_or_default();
        println!("{:<10} {}{}", format!("{}:", meal), slot.title(), hall);

        for food in slot.foods() {
            println!(
                "    - {} - {:.0} cal | P:{:.0} C:{:.0} F:{:.0}",
                food.name, food.calories, food.protein, food.carbs, food.fat
            );
        }
    }

    let totals = &plan.total_nutrition;
    let targets = &plan.targets;

    println!();
    println!("--- Summary ---");
    println!(
        "Calories: {:>5} / {:<5} kcal",
        totals.calories, targets.target_calories
    );
    println!("Protein:  {:>5} / {:<5} g", totals.protein, targets.target_protein);
    println!("Carbs:    {:>5} / {:<5} g", totals.carbs, targets.target_carbs);
    println!("Fat:      {:>5} / {:<5} g", totals.fat, targets.target_fat);
    println!("Adherence: {:.0}%", plan.adherence_score * 100.0);
    println!();
}

/// Display daily targets.
pub fn display_targets(targets: &NutritionTargets) {
    println!();
    println!("=== Daily Targets ===");
    println!();
    println!("Calories: {} kcal", targets.target_calories);
    println!("Protein:  {} g", targets.target_protein);
    println!("Carbs:    {} g", targets.target_carbs);
    println!("Fat:      {} g", targets.target_fat);
    println!();
    println!("Macros add up to {} kcal", targets.macro_calories());
    println!();
}

/// Display the quick macros as they are sent to the server.
pub fn display_macro_upload(macros: &MacroUpload) {
    println!();
    println!("=== Quick Macros ===");
    println!();
    println!("Calories: {} kcal", macros.cals);
    println!("Protein:  {} g", macros.protein);
    println!("Fat:      {} g", macros.fat);
    println!("Carbs:    {} g", macros.carbs);
    println!();
}

/// Display the stored profile in the user's own units.
pub fn display_profile(profile: &UserProfile) {
    let physical = &profile.physical;

    println!();
    println!("=== Profile ===");
    println!();

    if let Some(sex) = physical.sex {
        println!("Sex: {:?}", sex);
    }
    if let Some(age) = physical.age {
        println!("Age: {}", age);
    }

    if let (Some(h), Some(w)) = (physical.height_cm, physical.weight_kg) {
        let (height_cm, weight_kg) = normalize_height_weight(h, w, physical.unit_system);
        match physical.unit_system {
            UnitSystem::Imperial => {
                let fi = cm_to_feet_inches(height_cm);
                println!("Height: {}'{}\"", fi.feet, fi.inches);
                println!("Weight: {:.0} lbs", kg_to_lbs(weight_kg));
            }
            UnitSystem::Metric => {
                println!("Height: {:.0} cm", height_cm);
                println!("Weight: {:.1} kg", weight_kg);
            }
        }
    }

    if let Some(level) = physical.activity_level {
        println!("Activity: {}", level.label());
    }
    if let Some(goal) = physical.goal {
        println!("Goal: {}", goal.label());
    }
    if !profile.allergies.is_empty() {
        println!("Allergies: {}", profile.allergies.join(", "));
    }
    if !profile.dietary_preferences.is_empty() {
        println!("Dietary: {}", profile.dietary_preferences.join(", "));
    }
    if let Some(hall) = &profile.hall {
        println!("Dining court: {}", hall);
    }
    println!();
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&FoodItem], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        let court = food.dining_court.as_deref().unwrap_or("-");
        let category = food.category.as_deref().unwrap_or("-");
        println!(
            "  {} [{} / {}] - {:.0} cal, P:{:.0} C:{:.0} F:{:.0}",
            food.name, category, court, food.calories, food.protein, food.carbs, food.fat
        );
        if !food.allergens.is_empty() {
            println!("      allergens: {}", food.allergens.join(", "));
        }
    }

    println!();
}
