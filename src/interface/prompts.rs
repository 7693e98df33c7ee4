use std::str::FromStr;

use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{PlanError, Result};
use crate::models::{ActivityLevel, Goal, PhysicalProfile, Sex, UnitSystem, UserProfile};
use crate::planner::constants::{ALLERGEN_OPTIONS, DIETARY_OPTIONS, DINING_HALLS};

/// Prompt for a number; unparsable input is `InvalidInput`.
fn prompt_number<T: FromStr>(prompt: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid number: {}", input.trim())))
}

pub fn prompt_sex() -> Result<Sex> {
    let options = ["Male", "Female", "Other"];
    let selection = Select::new()
        .with_prompt("Sex")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(Sex::from(options[selection]))
}

pub fn prompt_age() -> Result<u32> {
    let age: u32 = prompt_number("Age", "25")?;
    if age == 0 {
        return Err(PlanError::InvalidInput("Age must be positive".to_string()));
    }
    Ok(age)
}

pub fn prompt_unit_system() -> Result<UnitSystem> {
    let selection = Select::new()
        .with_prompt("Units")
        .items(&["Metric (cm, kg)", "Imperial (ft/in, lbs)"])
        .default(0)
        .interact()?;

    Ok(if selection == 1 {
        UnitSystem::Imperial
    } else {
        UnitSystem::Metric
    })
}

/// Feet and inches as a total inch count.
fn total_inches(feet: u32, inches: u32) -> Result<u32> {
    if inches >= 12 {
        return Err(PlanError::InvalidInput("Inches must be below 12".to_string()));
    }
    feet.checked_mul(12)
        .and_then(|i| i.checked_add(inches))
        .ok_or_else(|| {
            PlanError::InvalidInput(format!("Height out of range: {}'{}\"", feet, inches))
        })
}

/// Prompt for height and weight in the chosen units.
///
/// Values are returned as entered (total inches and pounds for imperial);
/// target calculation normalizes them.
pub fn prompt_height_weight(units: UnitSystem) -> Result<(f64, f64)> {
    match units {
        UnitSystem::Metric => {
            let height: f64 = prompt_number("Height (cm)", "175")?;
            let weight: f64 = prompt_number("Weight (kg)", "70")?;
            Ok((height, weight))
        }
        UnitSystem::Imperial => {
            let feet: u32 = prompt_number("Height (feet)", "5")?;
            let inches: u32 = prompt_number("Height (inches)", "9")?;
            let height = total_inches(feet, inches)?;
            let weight: f64 = prompt_number("Weight (lbs)", "155")?;
            Ok((f64::from(height), weight))
        }
    }
}

pub fn prompt_activity_level() -> Result<ActivityLevel> {
    let labels: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(ActivityLevel::ALL[selection])
}

pub fn prompt_goal() -> Result<Goal> {
    let labels: Vec<&str> = Goal::ALL.iter().map(|g| g.label()).collect();
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&labels)
        .default(1)
        .interact()?;

    Ok(Goal::ALL[selection])
}

/// Pick any number of entries from `options`.
fn prompt_tags(prompt: &str, options: &[&str], current: &[String]) -> Result<Vec<String>> {
    let defaults: Vec<bool> = options
        .iter()
        .map(|o| current.iter().any(|c| c.eq_ignore_ascii_case(o)))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt(prompt)
        .items(options)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| options[i].to_string()).collect())
}

pub fn prompt_hall(current: Option<&str>) -> Result<String> {
    let default = current
        .and_then(|c| DINING_HALLS.iter().position(|h| h.eq_ignore_ascii_case(c)))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Dining court")
        .items(&DINING_HALLS)
        .default(default)
        .interact()?;

    Ok(DINING_HALLS[selection].to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Run the whole onboarding flow, starting from an existing profile if any.
pub fn run_onboarding(existing: Option<&UserProfile>) -> Result<UserProfile> {
    let sex = prompt_sex()?;
    let age = prompt_age()?;
    let unit_system = prompt_unit_system()?;
    let (height, weight) = prompt_height_weight(unit_system)?;
    let activity_level = prompt_activity_level()?;
    let goal = prompt_goal()?;

    let no_tags = Vec::new();
    let allergies = prompt_tags(
        "Allergies (space to toggle)",
        &ALLERGEN_OPTIONS,
        existing.map(|p| &p.allergies).unwrap_or(&no_tags),
    )?;
    let dietary_preferences = prompt_tags(
        "Dietary preferences (space to toggle)",
        &DIETARY_OPTIONS,
        existing.map(|p| &p.dietary_preferences).unwrap_or(&no_tags),
    )?;
    let hall = prompt_hall(existing.and_then(|p| p.hall.as_deref()))?;

    Ok(UserProfile {
        physical: PhysicalProfile {
            sex: Some(sex),
            age: Some(age),
            height_cm: Some(height),
            weight_kg: Some(weight),
            activity_level: Some(activity_level),
            goal: Some(goal),
            unit_system,
        },
        allergies,
        dietary_preferences,
        hall: Some(hall),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_inches() {
        assert_eq!(total_inches(5, 9).unwrap(), 69);
        assert_eq!(total_inches(0, 11).unwrap(), 11);
    }

    #[test]
    fn test_total_inches_rejects_bad_input() {
        assert!(matches!(total_inches(5, 12), Err(PlanError::InvalidInput(_))));
        assert!(matches!(total_inches(u32::MAX, 0), Err(PlanError::InvalidInput(_))));
        assert!(matches!(
            total_inches(u32::MAX / 12, 11),
            Err(PlanError::InvalidInput(_))
        ));
    }
}
