pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_activity_level, prompt_age, prompt_goal, prompt_hall, prompt_height_weight,
    prompt_sex, prompt_unit_system, prompt_yes_no, run_onboarding,
};
pub use render::{
    display_day_plan, display_food_list, display_macro_upload, display_profile, display_targets,
};
