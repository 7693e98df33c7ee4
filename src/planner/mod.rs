pub mod adherence;
pub mod aggregate;
pub mod assembler;
pub mod catalog;
pub mod constants;
pub mod targets;
pub mod units;

pub use adherence::score;
pub use aggregate::{aggregate, aggregate_slots, aggregate_value};
pub use assembler::{AlternativeSource, CatalogAlternatives, MealPlanAssembler};
pub use catalog::{Catalog, SearchFilters};
pub use constants::*;
pub use targets::{compute_targets, quick_targets, MacroUpload, TargetStrategy};
pub use units::{cm_to_feet_inches, feet_inches_to_cm, kg_to_lbs, lbs_to_kg, FeetInches};
