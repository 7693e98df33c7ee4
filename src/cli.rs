use clap::{Parser, Subcommand};

use crate::planner::constants::{DEFAULT_API_BASE, DEFAULT_SYNC_DAYS, DEFAULT_TIMEOUT_SECS};

/// MealPlanner: derives nutrition targets and assembles daily dining-court meal plans.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the profile JSON file.
    #[arg(short, long, default_value = "profile.json")]
    pub profile: String,

    /// Path to the cached recommendations JSON file.
    #[arg(short, long, default_value = "recommendations.json")]
    pub recommendations: String,

    /// CSV catalog to use instead of the built-in one.
    #[arg(short, long)]
    pub catalog: Option<String>,

    /// Base URL of the recommendation backend.
    #[arg(long, env = "MEAL_PLANNER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the daily calorie and macro targets for the stored profile.
    Targets {
        /// Target strategy: "profile" or "quick".
        #[arg(short, long, default_value = "profile")]
        strategy: String,
    },

    /// Show the bodyweight-based quick macros sent to the server.
    QuickTargets,

    /// Show the stored profile.
    Profile,

    /// Assemble and show the meal plan for one day.
    Plan {
        /// Day index, 0 = first synced day.
        #[arg(short, long, default_value_t = 0)]
        day: u32,

        /// Dining court to plan for (defaults to the profile's).
        #[arg(long)]
        hall: Option<String>,

        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,

        /// Target strategy: "profile" or "quick".
        #[arg(short, long, default_value = "profile")]
        strategy: String,
    },

    /// Replace one meal of a day's plan with an alternative.
    Swap {
        /// Meal to replace: breakfast, lunch or dinner.
        meal: String,

        #[arg(short, long, default_value_t = 0)]
        day: u32,

        #[arg(long)]
        hall: Option<String>,

        /// Ask the recommendation backend instead of the local catalog.
        #[arg(long)]
        remote: bool,

        /// Seed for the catalog pick.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Search the food catalog.
    Search {
        /// Text matched against food and dining court names.
        #[arg(default_value = "")]
        query: String,

        /// breakfast, lunch or dinner.
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        court: Option<String>,

        /// Exclude foods with this allergen (repeatable).
        #[arg(long = "allergy")]
        allergies: Vec<String>,

        /// Require one of these dietary tags (repeatable).
        #[arg(long)]
        dietary: Vec<String>,

        /// Do not apply the profile's allergies and dietary preferences.
        #[arg(long)]
        ignore_profile: bool,
    },

    /// Run the onboarding questionnaire and store the profile.
    Onboard,

    /// Fetch recommendations for the coming days and cache them.
    Sync {
        #[arg(long, default_value_t = DEFAULT_SYNC_DAYS)]
        days: u32,

        #[arg(long)]
        hall: Option<String>,
    },

    /// Open a session with the recommendation backend.
    Register,

    /// Upload the quick macros to the recommendation backend.
    UploadMacros,

    /// Delete stored state.
    Reset {
        /// Delete the stored profile.
        #[arg(long)]
        profile: bool,

        /// Delete the cached recommendations.
        #[arg(long)]
        recommendations: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            day: 0,
            hall: None,
            json: false,
            strategy: "profile".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let cli = Cli::parse_from(["meal_planner"]);
        assert_eq!(cli.profile, "profile.json");
        assert_eq!(cli.recommendations, "recommendations.json");
        assert!(cli.catalog.is_none());
        assert_eq!(cli.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_repeatable_filters() {
        let cli = Cli::parse_from([
            "meal_planner",
            "search",
            "chicken",
            "--allergy",
            "dairy",
            "--allergy",
            "gluten",
        ]);
        match cli.command {
            Some(Command::Search {
                query, allergies, ..
            }) => {
                assert_eq!(query, "chicken");
                assert_eq!(allergies, vec!["dairy", "gluten"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_swap_args() {
        let cli = Cli::parse_from(["meal_planner", "swap", "lunch", "--day", "2", "--seed", "7"]);
        match cli.command {
            Some(Command::Swap {
                meal,
                day,
                seed,
                remote,
                ..
            }) => {
                assert_eq!(meal, "lunch");
                assert_eq!(day, 2);
                assert_eq!(seed, Some(7));
                assert!(!remote);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_reset_flags() {
        let cli = Cli::parse_from([
            "meal_planner",
            "--profile",
            "me.json",
            "reset",
            "--recommendations",
        ]);
        assert_eq!(cli.profile, "me.json");
        match cli.command {
            Some(Command::Reset {
                profile,
                recommendations,
            }) => {
                assert!(!profile);
                assert!(recommendations);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
