use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::models::{
    DayPlan, FoodItem, MealSlot, MealType, Meals, NutritionTargets, PhysicalProfile,
    RecommendationStore,
};
use crate::planner::adherence;
use crate::planner::aggregate::aggregate;
use crate::planner::catalog::{Catalog, SearchFilters};
use crate::planner::targets::TargetStrategy;

/// Where a swap looks for a replacement meal.
pub trait AlternativeSource {
    /// A replacement for `meal` on `day`, avoiding foods whose identity is in
    /// `exclude`. `None` when nothing suitable exists.
    fn alternative(
        &mut self,
        day: u32,
        meal: MealType,
        hall: Option<&str>,
        exclude: &[String],
    ) -> Option<MealSlot>;
}

/// Swap alternatives drawn at random from the local catalog.
pub struct CatalogAlternatives<'a> {
    catalog: &'a Catalog,
    rng: StdRng,
}

impl<'a> CatalogAlternatives<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(catalog: &'a Catalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// Catalog items for `meal` at `hall`, minus the excluded identities.
fn catalog_candidates<'c>(
    catalog: &'c Catalog,
    meal: MealType,
    hall: Option<&str>,
    exclude: &[String],
) -> Vec<&'c FoodItem> {
    let filters = SearchFilters {
        category: Some(meal.to_string()),
        dining_court: hall.map(str::to_string),
        ..Default::default()
    };
    catalog
        .search("", &filters)
        .into_iter()
        .filter(|f| !exclude.contains(&f.identity()))
        .collect()
}

/// Prefers the given hall and widens to every hall when it has nothing else.
impl AlternativeSource for CatalogAlternatives<'_> {
    fn alternative(
        &mut self,
        _day: u32,
        meal: MealType,
        hall: Option<&str>,
        exclude: &[String],
    ) -> Option<MealSlot> {
        let mut candidates = catalog_candidates(self.catalog, meal, hall, exclude);
        if candidates.is_empty() && hall.is_some() {
            log::debug!("no other {} at {:?}; trying every hall", meal, hall);
            candidates = catalog_candidates(self.catalog, meal, None, exclude);
        }

        let food = candidates.choose(&mut self.rng)?;
        Some(MealSlot::Flat((*food).clone()))
    }
}

/// Builds day plans from cached recommendations, the local catalog and the
/// user's targets.
pub struct MealPlanAssembler<'a> {
    store: Option<&'a RecommendationStore>,
    catalog: &'a Catalog,
    hall: Option<String>,
    strategy: TargetStrategy,
}

impl<'a> MealPlanAssembler<'a> {
    pub fn new(store: Option<&'a RecommendationStore>, catalog: &'a Catalog) -> Self {
        Self {
            store,
            catalog,
            hall: None,
            strategy: TargetStrategy::default(),
        }
    }

    /// Restrict catalog fallback to one dining hall.
    pub fn with_hall(mut self, hall: Option<&str>) -> Self {
        self.hall = hall.map(str::to_string);
        self
    }

    pub fn with_strategy(mut self, strategy: TargetStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolve the three meal slots for `day`.
    ///
    /// A day with all three meals stored is used as-is. Otherwise stored
    /// meals are kept and each missing one falls back to the first matching
    /// catalog item, then to the "No data" placeholder.
    pub fn resolve_meals(&self, day: u32) -> Meals {
        let stored = self.store.and_then(|s| s.day(day));

        if let Some(meals) = stored.filter(|m| m.is_complete()) {
            log::debug!("day {}: using stored recommendations", day);
            return meals.clone();
        }

        let mut meals = stored.cloned().unwrap_or_default();
        for meal in MealType::ALL {
            if !meals.get(meal).is_empty() {
                continue;
            }
            let slot = match self.catalog.first_for(meal, self.hall.as_deref()) {
                Some(food) => {
                    log::info!(
                        "day {}: {} from local catalog ({})",
                        day,
                        meal,
                        food.debug_string()
                    );
                    MealSlot::Flat(food.clone())
                }
                None => {
                    log::warn!("day {}: no data for {}", day, meal);
                    MealSlot::no_data()
                }
            };
            meals.set(meal, slot);
        }
        meals
    }

    pub fn assemble(&self, profile: &PhysicalProfile, day: u32) -> DayPlan {
        let meals = self.resolve_meals(day);
        let targets = self.strategy.compute(profile);
        let hall = resolve_hall(&meals).or_else(|| self.hall.clone());
        build_plan(day, meals, targets, hall)
    }

    /// Replace one meal and recompute the plan's totals and score.
    ///
    /// The input plan is left untouched. If the source has no alternative the
    /// returned plan carries the same meals.
    pub fn swap(
        &self,
        plan: &DayPlan,
        meal: MealType,
        source: &mut dyn AlternativeSource,
    ) -> DayPlan {
        let current = plan.meals.get(meal);
        let exclude = current.identities();
        let hall = current
            .hall()
            .filter(|_| !current.is_no_data())
            .or(plan.hall.as_deref())
            .or(self.hall.as_deref());

        let mut meals = plan.meals.clone();
        match source.alternative(plan.day, meal, hall, &exclude) {
            Some(slot) => {
                log::info!("day {}: swapped {} for {}", plan.day, meal, slot.title());
                meals.set(meal, slot);
            }
            None => log::warn!("day {}: no alternative found for {}", plan.day, meal),
        }

        build_plan(plan.day, meals, plan.targets, plan.hall.clone())
    }
}

fn build_plan(day: u32, meals: Meals, targets: NutritionTargets, hall: Option<String>) -> DayPlan {
    let total_nutrition = aggregate(&meals);
    let adherence_score = adherence::score(Some(&total_nutrition), Some(&targets));
    DayPlan {
        day,
        meals,
        total_nutrition,
        targets,
        adherence_score,
        hall,
    }
}

/// First hall named by a real (non-placeholder) slot.
fn resolve_hall(meals: &Meals) -> Option<String> {
    meals
        .iter()
        .filter(|(_, slot)| !slot.is_no_data())
        .find_map(|(_, slot)| slot.hall())
        .map(str::to_string)
}
