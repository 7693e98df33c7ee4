use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::positive_number;

/// Keys consumed by `FoodItem::from_object`; anything else is kept in `extra`.
const KNOWN_KEYS: &[&str] = &[
    "id",
    "name",
    "calories",
    "cal",
    "protein",
    "pro",
    "carbs",
    "carb",
    "fat",
    "category",
    "diningCourt",
    "hall",
    "dietary",
    "allergens",
];

/// A single menu entry with its macronutrients.
///
/// Decoding never fails: missing or malformed numbers read as 0 and the
/// `cal`/`pro`/`carb` aliases are honored when the canonical key is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct FoodItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    pub calories: f64,

    pub protein: f64,

    pub carbs: f64,

    pub fat: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dining_court: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,

    /// Unrecognized upstream fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodItem {
    pub fn new(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            name: name.to_string(),
            calories,
            protein,
            carbs,
            fat,
            ..Default::default()
        }
    }

    pub fn from_object(obj: &Map<String, Value>) -> Self {
        let number = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| obj.get(*k).and_then(positive_number))
                .unwrap_or(0.0)
        };
        let text = |keys: &[&str]| {
            keys.iter().find_map(|k| match obj.get(*k) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
        };
        let tags = |key: &str| {
            obj.get(key)
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

        let extra = obj
            .iter()
            .filter(|(k, _)| !KNOWN_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            id: text(&["id"]),
            name: text(&["name"]).unwrap_or_default(),
            calories: number(&["calories", "cal"]),
            protein: number(&["protein", "pro"]),
            carbs: number(&["carbs", "carb"]),
            fat: number(&["fat"]),
            category: text(&["category"]),
            dining_court: text(&["diningCourt", "hall"]),
            dietary: tags("dietary"),
            allergens: tags("allergens"),
            extra,
        }
    }

    /// Identity used when excluding the current meal from a swap.
    pub fn identity(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => self.name.to_lowercase(),
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: {} cal, P:{} C:{} F:{}",
            self.name, self.calories, self.protein, self.carbs, self.fat
        )
    }
}

impl From<Value> for FoodItem {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(obj) => Self::from_object(&obj),
            _ => Self::default(),
        }
    }
}
