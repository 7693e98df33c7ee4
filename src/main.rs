use clap::Parser;
use std::time::Duration;

use meal_planner_rs::cli::{Cli, Command};
use meal_planner_rs::error::Result;
use meal_planner_rs::interface::{
    display_day_plan, display_food_list, display_macro_upload, display_profile, display_targets,
    prompt_yes_no, run_onboarding,
};
use meal_planner_rs::models::{MealType, RecommendationStore, UserProfile};
use meal_planner_rs::planner::{
    compute_targets, quick_targets, Catalog, CatalogAlternatives, MealPlanAssembler,
    SearchFilters, TargetStrategy, DEFAULT_HALL,
};
use meal_planner_rs::remote::{sync_recommendations, RemoteAlternatives, RemoteClient};
use meal_planner_rs::state::{
    clear_profile, clear_recommendations, load_profile, load_recommendations_or_none,
    save_profile, save_recommendations,
};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or_default();

    match command {
        Command::Targets { strategy } => cmd_targets(&cli, &strategy),
        Command::QuickTargets => cmd_quick_targets(&cli),
        Command::Profile => cmd_profile(&cli),
        Command::Plan {
            day,
            hall,
            json,
            strategy,
        } => cmd_plan(&cli, day, hall, json, &strategy),
        Command::Swap {
            meal,
            day,
            hall,
            remote,
            seed,
        } => cmd_swap(&cli, &meal, day, hall, remote, seed),
        Command::Search {
            query,
            category,
            court,
            allergies,
            dietary,
            ignore_profile,
        } => {
            let filters = SearchFilters {
                category,
                dining_court: court,
                allergies,
                dietary,
            };
            cmd_search(&cli, &query, filters, ignore_profile)
        }
        Command::Onboard => cmd_onboard(&cli),
        Command::Sync { days, hall } => cmd_sync(&cli, days, hall),
        Command::Register => cmd_register(&cli),
        Command::UploadMacros => cmd_upload_macros(&cli),
        Command::Reset {
            profile,
            recommendations,
        } => cmd_reset(&cli, profile, recommendations),
    }
}

/// Load the stored profile, falling back to an all-defaults profile.
fn load_user_profile(cli: &Cli) -> Result<UserProfile> {
    match load_profile(&cli.profile)? {
        Some(profile) => Ok(profile),
        None => {
            eprintln!(
                "No profile found at {}; using defaults. Run 'onboard' to create one.",
                cli.profile
            );
            Ok(UserProfile::default())
        }
    }
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    match &cli.catalog {
        Some(path) => {
            let catalog = Catalog::from_csv(path)?;
            log::info!("loaded {} catalog items from {}", catalog.len(), path);
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

fn remote_client(cli: &Cli) -> Result<RemoteClient> {
    RemoteClient::new(&cli.api_base, Duration::from_secs(cli.timeout_secs))
}

/// Show daily targets using the chosen strategy.
fn cmd_targets(cli: &Cli, strategy: &str) -> Result<()> {
    let strategy: TargetStrategy = strategy.parse()?;
    let profile = load_user_profile(cli)?;
    display_targets(&strategy.compute(&profile.physical));
    Ok(())
}

fn cmd_quick_targets(cli: &Cli) -> Result<()> {
    let profile = load_user_profile(cli)?;
    display_macro_upload(&quick_targets(&profile.physical));
    Ok(())
}

fn cmd_profile(cli: &Cli) -> Result<()> {
    let profile = load_user_profile(cli)?;
    display_profile(&profile);
    display_targets(&compute_targets(&profile.physical));
    Ok(())
}

/// Assemble and display one day's plan.
fn cmd_plan(
    cli: &Cli,
    day: u32,
    hall: Option<String>,
    json: bool,
    strategy: &str,
) -> Result<()> {
    let strategy: TargetStrategy = strategy.parse()?;
    let profile = load_user_profile(cli)?;
    let store = load_recommendations_or_none(&cli.recommendations);
    let catalog = load_catalog(cli)?;

    let hall = hall.or(profile.hall.clone());
    let assembler = MealPlanAssembler::new(store.as_ref(), &catalog)
        .with_hall(hall.as_deref())
        .with_strategy(strategy);
    let plan = assembler.assemble(&profile.physical, day);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_day_plan(&plan);
    }

    Ok(())
}

/// Swap one meal and optionally persist the replacement.
fn cmd_swap(
    cli: &Cli,
    meal: &str,
    day: u32,
    hall: Option<String>,
    remote: bool,
    seed: Option<u64>,
) -> Result<()> {
    let meal: MealType = meal.parse()?;
    let profile = load_user_profile(cli)?;
    let store = load_recommendations_or_none(&cli.recommendations);
    let catalog = load_catalog(cli)?;

    let hall = hall.or(profile.hall.clone());
    let assembler = MealPlanAssembler::new(store.as_ref(), &catalog).with_hall(hall.as_deref());
    let plan = assembler.assemble(&profile.physical, day);

    let swapped = if remote {
        let client = remote_client(cli)?;
        let default_hall = hall.as_deref().unwrap_or(DEFAULT_HALL);
        let mut source = RemoteAlternatives::new(&client, default_hall);
        assembler.swap(&plan, meal, &mut source)
    } else {
        let mut source = match seed {
            Some(seed) => CatalogAlternatives::with_seed(&catalog, seed),
            None => CatalogAlternatives::new(&catalog),
        };
        assembler.swap(&plan, meal, &mut source)
    };

    if swapped.meals == plan.meals {
        println!("No alternative found for {}; plan unchanged.", meal);
        display_day_plan(&swapped);
        return Ok(());
    }

    display_day_plan(&swapped);

    if prompt_yes_no("Keep this meal in the cached recommendations?", false)? {
        let mut updated = store.unwrap_or_else(RecommendationStore::new);
        updated.insert(day, meal, swapped.meals.get(meal).clone());
        save_recommendations(&cli.recommendations, &updated)?;
        println!("Recommendations saved.");
    }

    Ok(())
}

/// Search the catalog, suggesting names when nothing matches.
fn cmd_search(
    cli: &Cli,
    query: &str,
    mut filters: SearchFilters,
    ignore_profile: bool,
) -> Result<()> {
    let catalog = load_catalog(cli)?;

    if !ignore_profile {
        if let Some(profile) = load_profile(&cli.profile)? {
            filters.allergies.extend(profile.allergies);
            filters.dietary.extend(profile.dietary_preferences);
        }
    }

    let results = catalog.search(query, &filters);
    if results.is_empty() {
        println!("No foods match '{}'.", query);
        let suggestions = catalog.suggest(query, 3);
        if !suggestions.is_empty() {
            println!("Did you mean: {}?", suggestions.join(", "));
        }
        return Ok(());
    }

    display_food_list(&results, "Search Results");
    Ok(())
}

/// Run onboarding, save the profile and offer the macro upload.
fn cmd_onboard(cli: &Cli) -> Result<()> {
    let existing = load_profile(&cli.profile)?;
    let profile = run_onboarding(existing.as_ref())?;

    display_profile(&profile);
    display_targets(&compute_targets(&profile.physical));

    if !prompt_yes_no("Save profile?", true)? {
        return Ok(());
    }
    save_profile(&cli.profile, &profile)?;
    println!("Profile saved to {}.", cli.profile);

    if prompt_yes_no("Upload quick macros to the server now?", false)? {
        upload_macros(cli, &profile)?;
    }

    Ok(())
}

/// Fetch and cache recommendations for the coming days.
fn cmd_sync(cli: &Cli, days: u32, hall: Option<String>) -> Result<()> {
    let profile = load_user_profile(cli)?;
    let hall = hall
        .or(profile.hall)
        .unwrap_or_else(|| DEFAULT_HALL.to_string());

    let client = remote_client(cli)?;
    match client.register() {
        Ok(true) => log::info!("session registered"),
        Ok(false) => log::warn!("register was not accepted; continuing"),
        Err(e) => log::warn!("register failed: {}", e),
    }

    println!("Syncing {} day(s) for {}...", days, hall);
    let store = sync_recommendations(&client, &hall, days);

    let received = (0..days)
        .filter_map(|d| store.day(d))
        .any(|meals| meals.iter().any(|(_, slot)| !slot.is_empty()));
    if !received {
        println!("No recommendations received; keeping the existing cache.");
        return Ok(());
    }

    let complete = (0..days)
        .filter_map(|d| store.day(d))
        .filter(|meals| meals.is_complete())
        .count();

    save_recommendations(&cli.recommendations, &store)?;
    println!(
        "Saved {} day(s) to {} ({} complete).",
        store.len(),
        cli.recommendations,
        complete
    );

    Ok(())
}

fn cmd_register(cli: &Cli) -> Result<()> {
    let client = remote_client(cli)?;
    if client.register()? {
        println!("Registered with {}.", cli.api_base);
    } else {
        println!("Server did not accept the registration.");
    }
    Ok(())
}

fn cmd_upload_macros(cli: &Cli) -> Result<()> {
    let profile = load_user_profile(cli)?;
    upload_macros(cli, &profile)
}

/// Send the quick macros. Failures are reported, never fatal.
fn upload_macros(cli: &Cli, profile: &UserProfile) -> Result<()> {
    let macros = quick_targets(&profile.physical);
    display_macro_upload(&macros);

    let client = remote_client(cli)?;
    if let Err(e) = client.register() {
        log::warn!("register failed: {}", e);
    }

    match client.upload_macros(&macros) {
        Ok(()) => println!("Macros uploaded."),
        Err(e) => {
            log::warn!("macro upload failed: {}", e);
            eprintln!("Macro upload failed: {}", e);
        }
    }

    Ok(())
}

/// Delete stored state after confirmation.
fn cmd_reset(cli: &Cli, profile: bool, recommendations: bool) -> Result<()> {
    if !profile && !recommendations {
        println!("Please specify at least one reset option:");
        println!("  --profile          Delete the stored profile");
        println!("  --recommendations  Delete the cached recommendations");
        return Ok(());
    }

    if !prompt_yes_no("This cannot be undone. Continue?", false)? {
        return Ok(());
    }

    if profile {
        if clear_profile(&cli.profile)? {
            println!("Deleted {}.", cli.profile);
        } else {
            println!("No profile at {}.", cli.profile);
        }
    }

    if recommendations {
        if clear_recommendations(&cli.recommendations)? {
            println!("Deleted {}.", cli.recommendations);
        } else {
            println!("No recommendations at {}.", cli.recommendations);
        }
    }

    Ok(())
}
