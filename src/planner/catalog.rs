use std::path::Path;

use serde::Deserialize;
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::{FoodItem, MealType};
use crate::planner::constants::SUGGESTION_THRESHOLD;

/// Filters for `Catalog::search`. Empty fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub dining_court: Option<String>,
    /// Items carrying any of these allergens are dropped.
    pub allergies: Vec<String>,
    /// Items must advertise at least one of these tags.
    pub dietary: Vec<String>,
}

/// Static local food catalog: offline fallback and "browse menus" listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<FoodItem>,
}

/// One CSV row. List columns are `;`-separated.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default)]
    id: Option<String>,
    name: String,
    category: String,
    #[serde(alias = "diningCourt")]
    dining_court: String,
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    carbs: f64,
    #[serde(default)]
    fat: f64,
    #[serde(default)]
    allergens: String,
    #[serde(default)]
    dietary: String,
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<CatalogRow> for FoodItem {
    fn from(row: CatalogRow) -> Self {
        FoodItem {
            id: row.id.filter(|id| !id.is_empty()),
            name: row.name,
            calories: row.calories.max(0.0),
            protein: row.protein.max(0.0),
            carbs: row.carbs.max(0.0),
            fat: row.fat.max(0.0),
            category: Some(row.category),
            dining_court: Some(row.dining_court),
            dietary: split_tags(&row.dietary),
            allergens: split_tags(&row.allergens),
            ..Default::default()
        }
    }
}

#[allow(clippy::too_many_arguments)]
/// `macros` is calories, protein, carbs, fat.
fn menu_item(
    id: &str,
    name: &str,
    category: MealType,
    court: &str,
    macros: [f64; 4],
    allergens: &[&str],
    dietary: &[&str],
) -> FoodItem {
    let [calories, protein, carbs, fat] = macros;
    FoodItem {
        id: Some(id.to_string()),
        category: Some(category.to_string()),
        dining_court: Some(court.to_string()),
        allergens: allergens.iter().map(|s| s.to_string()).collect(),
        dietary: dietary.iter().map(|s| s.to_string()).collect(),
        ..FoodItem::new(name, calories, protein, carbs, fat)
    }
}

impl Catalog {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    /// The bundled dining-court menu.
    pub fn builtin() -> Self {
        use MealType::*;
        let veg = &["vegetarian"][..];
        let vegan = &["vegan", "vegetarian"][..];

        Self::new(vec![
            menu_item(
                "b1",
                "Greek Yogurt Parfait",
                Breakfast,
                "earhart",
                [180.0, 15.0, 22.0, 3.0],
                &["dairy"],
                veg,
            ),
            menu_item(
                "b2",
                "Steel Cut Oatmeal",
                Breakfast,
                "earhart",
                [160.0, 6.0, 30.0, 3.0],
                &[],
                vegan,
            ),
            menu_item(
                "b3",
                "Scrambled Eggs",
                Breakfast,
                "ford",
                [140.0, 12.0, 2.0, 10.0],
                &["eggs"],
                veg,
            ),
            menu_item(
                "b4",
                "Avocado Toast",
                Breakfast,
                "wiley",
                [220.0, 8.0, 25.0, 12.0],
                &["gluten"],
                vegan,
            ),
            menu_item(
                "l1",
                "Grilled Chicken Breast",
                Lunch,
                "earhart",
                [250.0, 46.0, 0.0, 6.0],
                &[],
                &[],
            ),
            menu_item(
                "l2",
                "Quinoa Power Bowl",
                Lunch,
                "ford",
                [320.0, 14.0, 58.0, 8.0],
                &[],
                vegan,
            ),
            menu_item(
                "l3",
                "Turkey & Swiss Sandwich",
                Lunch,
                "wiley",
                [380.0, 28.0, 35.0, 15.0],
                &["gluten", "dairy"],
                &[],
            ),
            menu_item(
                "l4",
                "Mediterranean Salad",
                Lunch,
                "windsor",
                [290.0, 12.0, 18.0, 20.0],
                &["dairy"],
                veg,
            ),
            menu_item(
                "d1",
                "Baked Salmon",
                Dinner,
                "earhart",
                [340.0, 39.0, 0.0, 19.0],
                &["fish"],
                &[],
            ),
            menu_item(
                "d2",
                "Vegetable Stir Fry",
                Dinner,
                "ford",
                [220.0, 8.0, 35.0, 7.0],
                &[],
                vegan,
            ),
            menu_item(
                "d3",
                "Beef Tacos",
                Dinner,
                "wiley",
                [420.0, 32.0, 28.0, 22.0],
                &["gluten", "dairy"],
                &[],
            ),
            menu_item(
                "d4",
                "Lentil Curry",
                Dinner,
                "windsor",
                [280.0, 18.0, 45.0, 6.0],
                &[],
                vegan,
            ),
        ])
    }

    /// Load a catalog from CSV with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        let mut items = Vec::new();
        for row in reader.deserialize::<CatalogRow>() {
            items.push(FoodItem::from(row?));
        }
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filter the catalog, preserving catalog order.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<&FoodItem> {
        let term = query.trim().to_lowercase();

        self.items
            .iter()
            .filter(|item| {
                term.is_empty()
                    || item.name.to_lowercase().contains(&term)
                    || item
                        .dining_court
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&term))
            })
            .filter(|item| matches_field(item.category.as_deref(), filters.category.as_deref()))
            .filter(|item| {
                matches_field(item.dining_court.as_deref(), filters.dining_court.as_deref())
            })
            .filter(|item| {
                filters.allergies.is_empty() || !shares_tag(&item.allergens, &filters.allergies)
            })
            .filter(|item| {
                filters.dietary.is_empty() || shares_tag(&item.dietary, &filters.dietary)
            })
            .collect()
    }

    /// First catalog item for a meal, optionally restricted to one hall.
    pub fn first_for(&self, meal: MealType, hall: Option<&str>) -> Option<&FoodItem> {
        let filters = SearchFilters {
            category: Some(meal.to_string()),
            dining_court: hall.map(str::to_string),
            ..Default::default()
        };
        self.search("", &filters).into_iter().next()
    }

    /// Catalog names resembling `query`, best match first.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(&str, f64)> = self
            .items
            .iter()
            .map(|f| (f.name.as_str(), jaro_winkler(&f.name.to_lowercase(), &term)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(limit).map(|(name, _)| name).collect()
    }
}

/// An unset filter matches everything; a set filter needs a case-insensitive match.
fn matches_field(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => value.is_some_and(|v| v.eq_ignore_ascii_case(w)),
    }
}

fn shares_tag(tags: &[String], wanted: &[String]) -> bool {
    tags.iter()
        .any(|t| wanted.iter().any(|w| w.eq_ignore_ascii_case(t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn names(items: Vec<&FoodItem>) -> Vec<&str> {
        items.into_iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_query_matches_name_or_court() {
        let catalog = Catalog::builtin();
        assert_eq!(
            names(catalog.search("salmon", &SearchFilters::default())),
            vec!["Baked Salmon"]
        );
        assert_eq!(catalog.search("WINDSOR", &SearchFilters::default()).len(), 2);
        assert_eq!(catalog.search("", &SearchFilters::default()).len(), 12);
    }

    #[test]
    fn test_allergy_excludes_even_on_name_match() {
        let catalog = Catalog::builtin();
        let filters = SearchFilters {
            allergies: vec!["dairy".to_string()],
            ..Default::default()
        };
        let results = names(catalog.search("s", &filters));
        assert!(!results.contains(&"Turkey & Swiss Sandwich"));
        assert!(!results.contains(&"Mediterranean Salad"));
        assert!(results.contains(&"Baked Salmon"));
    }

    #[test]
    fn test_dietary_requires_advertised_tag() {
        let catalog = Catalog::builtin();
        let filters = SearchFilters {
            category: Some("lunch".to_string()),
            dietary: vec!["vegan".to_string()],
            ..Default::default()
        };
        assert_eq!(names(catalog.search("", &filters)), vec!["Quinoa Power Bowl"]);
    }

    #[test]
    fn test_order_preserved() {
        let catalog = Catalog::builtin();
        let filters = SearchFilters {
            dining_court: Some("Earhart".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(catalog.search("", &filters)),
            vec![
                "Greek Yogurt Parfait",
                "Steel Cut Oatmeal",
                "Grilled Chicken Breast",
                "Baked Salmon"
            ]
        );
    }

    #[test]
    fn test_first_for() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.first_for(MealType::Dinner, Some("ford")).map(|f| f.name.as_str()),
            Some("Vegetable Stir Fry")
        );
        assert!(catalog.first_for(MealType::Dinner, Some("nowhere")).is_none());
    }

    #[test]
    fn test_suggest() {
        let catalog = Catalog::builtin();
        let suggestions = catalog.suggest("lentil cury", 3);
        assert_eq!(suggestions.first(), Some(&"Lentil Curry"));
        assert!(catalog.suggest("", 3).is_empty());
    }

    #[test]
    fn test_from_csv() {
        let csv = "id,name,category,dining_court,calories,protein,carbs,fat,allergens,dietary\n\
                   x1,Tofu Scramble,breakfast,hillenbrand,210,18,8,12,soy,vegan; vegetarian\n\
                   x2,Plain Bagel,breakfast,hillenbrand,270,10,53,2,gluten,\n";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let catalog = Catalog::from_csv(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        let tofu = &catalog.items()[0];
        assert_eq!(tofu.id.as_deref(), Some("x1"));
        assert_eq!(tofu.dietary, vec!["vegan", "vegetarian"]);
        assert_eq!(tofu.allergens, vec!["soy"]);
        assert!(catalog.items()[1].dietary.is_empty());
    }
}
