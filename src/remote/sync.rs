use crate::models::{MealSlot, MealType, RecommendationStore};
use crate::planner::AlternativeSource;
use crate::remote::client::RecommendationService;

/// Fetch every (day, meal) recommendation for `days` days, one at a time.
///
/// A failed fetch leaves that slot empty; the assembler's fallback covers it.
pub fn sync_recommendations(
    service: &dyn RecommendationService,
    hall: &str,
    days: u32,
) -> RecommendationStore {
    let mut store = RecommendationStore::new();
    for day in 0..days {
        for meal in MealType::ALL {
            let slot = match service.recommend(day, hall, meal) {
                Ok(slot) => slot,
                Err(e) => {
                    log::warn!("recommend day {} {} failed: {}", day, meal, e);
                    MealSlot::Empty
                }
            };
            store.insert(day, meal, slot);
        }
    }
    log::info!("synced {} day(s) of recommendations for {}", days, hall);
    store
}

/// Swap alternatives requested from the recommendation service.
pub struct RemoteAlternatives<'a> {
    service: &'a dyn RecommendationService,
    default_hall: String,
}

impl<'a> RemoteAlternatives<'a> {
    pub fn new(service: &'a dyn RecommendationService, default_hall: &str) -> Self {
        Self {
            service,
            default_hall: default_hall.to_string(),
        }
    }
}

impl AlternativeSource for RemoteAlternatives<'_> {
    fn alternative(
        &mut self,
        day: u32,
        meal: MealType,
        hall: Option<&str>,
        exclude: &[String],
    ) -> Option<MealSlot> {
        let hall = hall.unwrap_or(&self.default_hall);
        let slot = match self.service.recommend(day, hall, meal) {
            Ok(slot) => slot,
            Err(e) => {
                log::warn!("alternative for day {} {} failed: {}", day, meal, e);
                return None;
            }
        };

        let identities = slot.identities();
        let same_meal = !identities.is_empty() && identities.iter().all(|id| exclude.contains(id));
        if slot.is_empty() || same_meal {
            return None;
        }
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlanError, Result};
    use crate::models::FoodItem;
    use std::cell::RefCell;

    /// Serves "<meal> <day>" foods and fails for one configured call.
    struct FakeService {
        calls: RefCell<Vec<(u32, MealType)>>,
        fail_on: Option<(u32, MealType)>,
    }

    impl FakeService {
        fn new(fail_on: Option<(u32, MealType)>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl RecommendationService for FakeService {
        fn recommend(&self, day: u32, hall: &str, meal: MealType) -> Result<MealSlot> {
            self.calls.borrow_mut().push((day, meal));
            if self.fail_on == Some((day, meal)) {
                return Err(PlanError::RemoteStatus {
                    endpoint: "recommend".to_string(),
                    status: 500,
                });
            }
            let food = FoodItem::new(&format!("{} {}", meal, day), 100.0, 5.0, 10.0, 2.0);
            Ok(MealSlot::Flat(food).with_hall(hall))
        }
    }

    #[test]
    fn test_sync_is_sequential_and_complete() {
        let service = FakeService::new(None);
        let store = sync_recommendations(&service, "Ford", 2);

        assert_eq!(
            *service.calls.borrow(),
            vec![
                (0, MealType::Breakfast),
                (0, MealType::Lunch),
                (0, MealType::Dinner),
                (1, MealType::Breakfast),
                (1, MealType::Lunch),
                (1, MealType::Dinner),
            ]
        );
        assert_eq!(store.len(), 2);
        let day1 = store.day(1).unwrap();
        assert_eq!(day1.dinner.title(), "dinner 1");
        assert_eq!(day1.dinner.hall(), Some("Ford"));
    }

    #[test]
    fn test_sync_failure_leaves_slot_empty() {
        let service = FakeService::new(Some((0, MealType::Lunch)));
        let store = sync_recommendations(&service, "Ford", 1);

        let day0 = store.day(0).unwrap();
        assert!(day0.lunch.is_empty());
        assert!(!day0.breakfast.is_empty());
        assert!(!day0.is_complete());
    }

    #[test]
    fn test_remote_alternative_rejects_same_meal() {
        let service = FakeService::new(None);
        let mut source = RemoteAlternatives::new(&service, "Earhart");

        let same = vec!["lunch 0".to_string()];
        assert!(source.alternative(0, MealType::Lunch, None, &same).is_none());

        let other = vec!["something else".to_string()];
        let slot = source.alternative(0, MealType::Lunch, Some("Wiley"), &other).unwrap();
        assert_eq!(slot.hall(), Some("Wiley"));
    }

    #[test]
    fn test_remote_alternative_failure_is_none() {
        let service = FakeService::new(Some((3, MealType::Dinner)));
        let mut source = RemoteAlternatives::new(&service, "Earhart");
        assert!(source.alternative(3, MealType::Dinner, None, &[]).is_none());
    }
}
