use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::positive_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl From<&str> for Sex {
    fn from(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        if lowered.starts_with('m') {
            Sex::Male
        } else if lowered.starts_with('f') {
            Sex::Female
        } else {
            Sex::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Parse an activity id. Unrecognized ids yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let id = raw.trim().to_lowercase().replace(['-', ' '], "_");
        match id.as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "lightly_active" => Some(ActivityLevel::LightlyActive),
            "moderately_active" => Some(ActivityLevel::ModeratelyActive),
            "very_active" => Some(ActivityLevel::VeryActive),
            "extra_active" => Some(ActivityLevel::ExtraActive),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little to no exercise)",
            ActivityLevel::LightlyActive => "Lightly active (1-3 days/week)",
            ActivityLevel::ModeratelyActive => "Moderately active (3-5 days/week)",
            ActivityLevel::VeryActive => "Very active (6-7 days/week)",
            ActivityLevel::ExtraActive => "Extra active (physical job)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Goal {
    #[serde(rename = "loseWeight")]
    LoseWeight,
    #[serde(rename = "maintain")]
    Maintain,
    #[serde(rename = "gainMuscle")]
    GainMuscle,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::LoseWeight, Goal::Maintain, Goal::GainMuscle];

    pub fn label(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose weight",
            Goal::Maintain => "Maintain weight",
            Goal::GainMuscle => "Gain muscle",
        }
    }
}

/// Unrecognized goals fall back to `Maintain`.
impl From<&str> for Goal {
    fn from(raw: &str) -> Self {
        let id = raw.trim().to_lowercase().replace(['-', ' ', '_'], "");
        match id.as_str() {
            "loseweight" | "lose" | "cut" => Goal::LoseWeight,
            "gainmuscle" | "gain" | "bulk" => Goal::GainMuscle,
            _ => Goal::Maintain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl From<&str> for UnitSystem {
    fn from(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("imperial") {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }
}

/// Physical and activity profile of the current user.
///
/// Every field is optional: target calculation substitutes defaults for
/// anything missing. Height and weight are stored as entered; with
/// `UnitSystem::Imperial` they may or may not already be metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct PhysicalProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,

    pub unit_system: UnitSystem,
}

impl PhysicalProfile {
    /// Decode a profile from loosely shaped JSON. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let field = |keys: &[&str]| keys.iter().find_map(|k| value.get(*k));
        let text = |keys: &[&str]| field(keys).and_then(Value::as_str);

        Self {
            sex: text(&["sex"]).filter(|s| !s.trim().is_empty()).map(Sex::from),
            age: field(&["age"])
                .and_then(positive_number)
                .map(|a| a.round() as u32),
            height_cm: field(&["heightCm", "height"]).and_then(positive_number),
            weight_kg: field(&["weightKg", "weight"]).and_then(positive_number),
            activity_level: text(&["activityLevel", "activity"]).and_then(ActivityLevel::parse),
            goal: text(&["goal"]).map(Goal::from),
            unit_system: text(&["unitSystem"]).map(UnitSystem::from).unwrap_or_default(),
        }
    }
}

impl From<Value> for PhysicalProfile {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Stored onboarding result: the physical profile plus dining preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct UserProfile {
    #[serde(flatten)]
    pub physical: PhysicalProfile,

    pub allergies: Vec<String>,

    pub dietary_preferences: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,
}

impl From<Value> for UserProfile {
    fn from(value: Value) -> Self {
        let strings = |key: &str| -> Vec<String> {
            value
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };

        Self {
            physical: PhysicalProfile::from_value(&value),
            allergies: strings("allergies"),
            dietary_preferences: strings("dietaryPreferences"),
            hall: value
                .get("hall")
                .and_then(Value::as_str)
                .filter(|h| !h.trim().is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sex_from_prefix() {
        assert_eq!(Sex::from("Male"), Sex::Male);
        assert_eq!(Sex::from("m"), Sex::Male);
        assert_eq!(Sex::from("female"), Sex::Female);
        assert_eq!(Sex::from("nonbinary"), Sex::Other);
    }

    #[test]
    fn test_goal_unknown_is_maintain() {
        assert_eq!(Goal::from("loseWeight"), Goal::LoseWeight);
        assert_eq!(Goal::from("gain_muscle"), Goal::GainMuscle);
        assert_eq!(Goal::from("shred everything"), Goal::Maintain);
    }

    #[test]
    fn test_profile_from_loose_json() {
        let profile: PhysicalProfile = serde_json::from_value(json!({
            "sex": "female",
            "age": 29.6,
            "height": 165,
            "weightKg": "58",
            "activityLevel": "very_active",
            "goal": "gainMuscle",
            "unitSystem": "imperial"
        }))
        .unwrap();

        assert_eq!(profile.sex, Some(Sex::Female));
        assert_eq!(profile.age, Some(30));
        assert_eq!(profile.height_cm, Some(165.0));
        assert_eq!(profile.weight_kg, Some(58.0));
        assert_eq!(profile.activity_level, Some(ActivityLevel::VeryActive));
        assert_eq!(profile.goal, Some(Goal::GainMuscle));
        assert_eq!(profile.unit_system, UnitSystem::Imperial);
    }

    #[test]
    fn test_profile_bad_fields_read_as_missing() {
        let profile: PhysicalProfile = serde_json::from_value(json!({
            "sex": 7,
            "age": "old",
            "heightCm": -3,
            "activityLevel": "couch potato"
        }))
        .unwrap();

        assert_eq!(profile, PhysicalProfile::default());
    }

    #[test]
    fn test_user_profile_serializes_flat() {
        let user = UserProfile {
            physical: PhysicalProfile {
                age: Some(22),
                goal: Some(Goal::LoseWeight),
                ..Default::default()
            },
            allergies: vec!["dairy".to_string()],
            dietary_preferences: vec![],
            hall: Some("Earhart".to_string()),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["age"], json!(22));
        assert_eq!(value["goal"], json!("loseWeight"));
        assert_eq!(value["unitSystem"], json!("metric"));
        assert_eq!(value["allergies"], json!(["dairy"]));

        let back: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(back, user);
    }
}
