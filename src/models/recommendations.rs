use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::models::{MealSlot, MealType, Meals};

/// Canonical form of a day key: `0`, `"0"`, `" 0 "` and `"0.0"` all map to `"0"`.
pub fn canonical_day_key(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return n.to_string();
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => (f as u64).to_string(),
        _ => trimmed.to_string(),
    }
}

/// Cached server recommendations: day → meal type → slot.
///
/// Day keys are canonicalized on the way in, so numeric and string lookups
/// hit the same record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RecommendationStore {
    days: BTreeMap<String, Meals>,
}

impl RecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode from a day-keyed object or a day-indexed array. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let days = match value {
            Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| (canonical_day_key(k), Meals::from_value(v)))
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), Meals::from_value(v)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Self { days }
    }

    pub fn day(&self, day: u32) -> Option<&Meals> {
        self.days.get(&day.to_string())
    }

    pub fn day_by_key(&self, key: &str) -> Option<&Meals> {
        self.days.get(&canonical_day_key(key))
    }

    pub fn insert(&mut self, day: u32, meal: MealType, slot: MealSlot) {
        self.days.entry(day.to_string()).or_default().set(meal, slot);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Serialize for RecommendationStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

impl From<Value> for RecommendationStore {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}
