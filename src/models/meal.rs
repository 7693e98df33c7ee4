use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::PlanError;
use crate::models::FoodItem;

/// Name given to the placeholder slot when no data exists for a meal.
pub const NO_DATA_NAME: &str = "No data";

/// Hall given to the placeholder slot when no data exists for a meal.
pub const UNKNOWN_HALL: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            _ => Err(PlanError::UnknownMealType(s.to_string())),
        }
    }
}

/// A meal made of several foods, usually served by one dining hall.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub foods: Vec<FoodItem>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One breakfast/lunch/dinner entry.
///
/// Upstream payloads carry a slot as `null`, a bare food object, an array of
/// foods, or a `{ hall, foods: [...] }` wrapper. `MealSlot::from_value` folds
/// all of them into this union; arrays become a hall-less bundle.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum MealSlot {
    #[default]
    Empty,
    Flat(FoodItem),
    Wrapped(MealBundle),
}

impl MealSlot {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => MealSlot::Wrapped(MealBundle {
                foods: flatten_foods(items),
                ..Default::default()
            }),
            Value::Object(obj) => match obj.get("foods") {
                Some(Value::Array(foods)) => MealSlot::Wrapped(MealBundle {
                    hall: non_empty_str(obj.get("hall")),
                    name: non_empty_str(obj.get("name")),
                    foods: flatten_foods(foods),
                    extra: obj
                        .iter()
                        .filter(|(k, _)| !matches!(k.as_str(), "hall" | "name" | "foods"))
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                }),
                _ => MealSlot::Flat(FoodItem::from_object(obj)),
            },
            _ => MealSlot::Empty,
        }
    }

    /// Placeholder used when neither the recommendation store nor the catalog
    /// has anything for a meal.
    pub fn no_data() -> Self {
        MealSlot::Wrapped(MealBundle {
            hall: Some(UNKNOWN_HALL.to_string()),
            name: Some(NO_DATA_NAME.to_string()),
            foods: Vec::new(),
            extra: Map::new(),
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MealSlot::Empty)
    }

    pub fn is_no_data(&self) -> bool {
        match self {
            MealSlot::Wrapped(bundle) => {
                bundle.foods.is_empty() && bundle.name.as_deref() == Some(NO_DATA_NAME)
            }
            _ => false,
        }
    }

    pub fn foods(&self) -> &[FoodItem] {
        match self {
            MealSlot::Empty => &[],
            MealSlot::Flat(food) => std::slice::from_ref(food),
            MealSlot::Wrapped(bundle) => &bundle.foods,
        }
    }

    pub fn hall(&self) -> Option<&str> {
        match self {
            MealSlot::Empty => None,
            MealSlot::Flat(food) => food.dining_court.as_deref(),
            MealSlot::Wrapped(bundle) => bundle.hall.as_deref(),
        }
    }

    /// Display title: the bundle name, else the joined food names.
    pub fn title(&self) -> String {
        match self {
            MealSlot::Empty => NO_DATA_NAME.to_string(),
            MealSlot::Flat(food) => food.name.clone(),
            MealSlot::Wrapped(bundle) => match &bundle.name {
                Some(name) => name.clone(),
                None if bundle.foods.is_empty() => NO_DATA_NAME.to_string(),
                None => bundle
                    .foods
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            },
        }
    }

    /// Identities of every food in the slot.
    pub fn identities(&self) -> Vec<String> {
        self.foods().iter().map(FoodItem::identity).collect()
    }

    /// Tag the slot with the hall it was requested for.
    pub fn with_hall(self, hall: &str) -> Self {
        match self {
            MealSlot::Empty => MealSlot::Empty,
            MealSlot::Flat(mut food) => {
                food.dining_court = Some(hall.to_string());
                MealSlot::Flat(food)
            }
            MealSlot::Wrapped(mut bundle) => {
                bundle.hall = Some(hall.to_string());
                MealSlot::Wrapped(bundle)
            }
        }
    }
}

impl From<Value> for MealSlot {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<FoodItem> for MealSlot {
    fn from(food: FoodItem) -> Self {
        MealSlot::Flat(food)
    }
}

impl Serialize for MealSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MealSlot::Empty => serializer.serialize_none(),
            MealSlot::Flat(food) => food.serialize(serializer),
            MealSlot::Wrapped(bundle) => bundle.serialize(serializer),
        }
    }
}

/// Flatten a list of foods one level: nested arrays and `{ foods }` wrappers
/// contribute their elements, plain objects contribute themselves.
fn flatten_foods(items: &[Value]) -> Vec<FoodItem> {
    let mut foods = Vec::new();
    for item in items {
        match item {
            Value::Object(obj) => match obj.get("foods") {
                Some(Value::Array(inner)) => foods.extend(
                    inner
                        .iter()
                        .filter_map(Value::as_object)
                        .map(FoodItem::from_object),
                ),
                _ => foods.push(FoodItem::from_object(obj)),
            },
            Value::Array(inner) => foods.extend(
                inner
                    .iter()
                    .filter_map(Value::as_object)
                    .map(FoodItem::from_object),
            ),
            _ => {}
        }
    }
    foods
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The three meal slots of one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meals {
    #[serde(default)]
    pub breakfast: MealSlot,

    #[serde(default)]
    pub lunch: MealSlot,

    #[serde(default)]
    pub dinner: MealSlot,
}

impl Meals {
    /// Read the three slots from a day object; absent keys are `Empty`.
    pub fn from_value(value: &Value) -> Self {
        let mut meals = Meals::default();
        if let Value::Object(obj) = value {
            for (key, slot) in obj {
                if let Ok(meal) = key.parse::<MealType>() {
                    meals.set(meal, MealSlot::from_value(slot));
                }
            }
        }
        meals
    }

    pub fn get(&self, meal: MealType) -> &MealSlot {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    pub fn set(&mut self, meal: MealType, slot: MealSlot) {
        match meal {
            MealType::Breakfast => self.breakfast = slot,
            MealType::Lunch => self.lunch = slot,
            MealType::Dinner => self.dinner = slot,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MealType, &MealSlot)> {
        MealType::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// True when all three slots carry something.
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, slot)| !slot.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slot_shapes() {
        assert_eq!(MealSlot::from_value(&json!(null)), MealSlot::Empty);
        assert_eq!(MealSlot::from_value(&json!("oops")), MealSlot::Empty);

        let flat = MealSlot::from_value(&json!({"name": "Tacos", "calories": 420}));
        assert!(matches!(flat, MealSlot::Flat(ref f) if f.name == "Tacos"));

        let wrapped = MealSlot::from_value(&json!({
            "hall": "Windsor",
            "foods": [{"name": "Rice"}, {"name": "Beans"}]
        }));
        assert_eq!(wrapped.hall(), Some("Windsor"));
        assert_eq!(wrapped.foods().len(), 2);

        let list = MealSlot::from_value(&json!([{"name": "Rice"}, [{"name": "Beans"}, 3]]));
        assert_eq!(list.foods().len(), 2);
        assert_eq!(list.hall(), None);
    }

    #[test]
    fn test_foods_key_not_array_is_flat() {
        let slot = MealSlot::from_value(&json!({"name": "Soup", "foods": null, "calories": 90}));
        assert!(matches!(slot, MealSlot::Flat(ref f) if f.calories == 90.0));
    }

    #[test]
    fn test_no_data_stub() {
        let stub = MealSlot::no_data();
        assert!(stub.is_no_data());
        assert!(!stub.is_empty());
        assert_eq!(stub.hall(), Some(UNKNOWN_HALL));

        let value = serde_json::to_value(&stub).unwrap();
        assert_eq!(value, json!({"hall": "Unknown", "name": "No data", "foods": []}));
    }

    #[test]
    fn test_wrapper_extra_keys_round_trip() {
        let raw = json!({"hall": "Ford", "foods": [], "score": 0.8});
        let slot = MealSlot::from_value(&raw);
        assert_eq!(serde_json::to_value(&slot).unwrap(), raw);
    }

    #[test]
    fn test_with_hall_overwrites() {
        let slot = MealSlot::from_value(&json!({"hall": "Ford", "foods": []})).with_hall("Wiley");
        assert_eq!(slot.hall(), Some("Wiley"));
        assert_eq!(MealSlot::Empty.with_hall("Wiley"), MealSlot::Empty);
    }

    #[test]
    fn test_meals_from_value_ignores_unknown_keys() {
        let meals = Meals::from_value(&json!({
            "Breakfast": {"name": "Oatmeal"},
            "dinner": null,
            "hall": "Earhart"
        }));
        assert_eq!(meals.breakfast.title(), "Oatmeal");
        assert!(meals.lunch.is_empty());
        assert!(meals.dinner.is_empty());
        assert!(!meals.is_complete());
    }

    #[test]
    fn test_meal_type_parse() {
        assert_eq!("Lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert!("brunch".parse::<MealType>().is_err());
    }
}
