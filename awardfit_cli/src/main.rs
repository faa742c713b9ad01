use awardfit_core::*;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "awardfit")]
#[command(about = "Calorie and fitness tracking system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User the daily logs belong to
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log or remove meals
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },

    /// Log or remove exercises
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },

    /// Set the day's water intake in milliliters
    Water {
        amount_ml: u32,

        /// Date of the log (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record a weigh-in
    Weight {
        weight_kg: f64,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the daily log
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Manage the user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Record fitness quiz answers and refresh the calorie goal
    Quiz {
        /// lose-weight, gain-muscle, maintain or improve-health
        #[arg(long)]
        goal: String,

        /// beginner, intermediate or advanced
        #[arg(long)]
        experience: String,

        /// Workout days per week, e.g. 2-3
        #[arg(long)]
        frequency: String,

        /// omnivore, vegetarian, vegan, keto or paleo
        #[arg(long)]
        diet: String,

        #[arg(long, default_value = "")]
        motivation: String,

        /// Comma-separated list, e.g. time,motivation
        #[arg(long, value_delimiter = ',')]
        challenges: Vec<String>,
    },

    /// Activate the premium subscription
    Premium,

    /// Export daily summaries to CSV
    Export {
        /// Output file
        #[arg(long, default_value = "awardfit_summary.csv")]
        out: PathBuf,

        /// How many days back to include
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Add a meal to the day's log
    Add {
        name: String,

        #[arg(long)]
        calories: u32,

        /// Protein grams
        #[arg(long, default_value_t = 0)]
        protein: u32,

        /// Carb grams
        #[arg(long, default_value_t = 0)]
        carbs: u32,

        /// Fat grams
        #[arg(long, default_value_t = 0)]
        fat: u32,

        /// breakfast, lunch, dinner or snack
        #[arg(long, default_value = "snack")]
        meal_type: String,

        /// Time-of-day label (defaults to now)
        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        /// Explicit meal id (defaults to a random UUID)
        #[arg(long)]
        id: Option<String>,
    },

    /// Remove a meal by id
    Rm {
        id: String,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Add an exercise to the day's log
    Add {
        name: String,

        #[arg(long)]
        calories_burned: u32,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,

        /// cardio, strength, flexibility or sports
        #[arg(long, default_value = "cardio")]
        exercise_type: String,

        /// Time-of-day label (defaults to now)
        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        /// Explicit exercise id (defaults to a random UUID)
        #[arg(long)]
        id: Option<String>,
    },

    /// Remove an exercise by id
    Rm {
        id: String,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Create or update the profile and recompute the calorie goal
    Set {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Current weight in kg
        #[arg(long)]
        weight: f64,

        /// Target weight in kg (defaults to current weight)
        #[arg(long)]
        target_weight: Option<f64>,

        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// male, female or other
        #[arg(long)]
        sex: String,

        /// sedentary, light, moderate, active or very-active
        #[arg(long, default_value = "sedentary")]
        activity: String,
    },

    /// Show the saved profile
    Show,

    /// Delete the saved profile
    Clear,
}

fn main() -> Result<()> {
    awardfit_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let user = cli.user.unwrap_or_else(|| config.user.default_user.clone());

    let store = DailyLogStore::open(&data_dir);
    let profile_file = profile::profile_path(&data_dir);

    match cli.command {
        Commands::Meal { command } => cmd_meal(&store, &user, command),
        Commands::Exercise { command } => cmd_exercise(&store, &user, command),
        Commands::Water { amount_ml, date } => {
            let log = store.set_water(&user, date.unwrap_or_else(today), amount_ml)?;
            println!("✓ Water set to {} ml for {}", log.water_ml, log.date);
            Ok(())
        }
        Commands::Weight { weight_kg, date } => {
            let log = store.set_weight(&user, date.unwrap_or_else(today), weight_kg)?;
            println!("✓ Weigh-in recorded: {} kg on {}", weight_kg, log.date);
            Ok(())
        }
        Commands::Show { date } => cmd_show(&store, &user, date, &profile_file, &config),
        Commands::Profile { command } => cmd_profile(&profile_file, &user, command),
        Commands::Quiz {
            goal,
            experience,
            frequency,
            diet,
            motivation,
            challenges,
        } => cmd_quiz(
            &profile_file,
            goal,
            experience,
            frequency,
            diet,
            motivation,
            challenges,
        ),
        Commands::Premium => cmd_premium(&profile_file),
        Commands::Export { out, days } => {
            let count = export_summary(&store, &user, today(), days, &out)?;
            println!("✓ Exported {} daily summaries", count);
            println!("  CSV: {}", out.display());
            Ok(())
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn time_label(time: Option<String>) -> String {
    time.unwrap_or_else(|| Local::now().format("%H:%M").to_string())
}

fn cmd_meal(store: &DailyLogStore, user: &str, command: MealCommands) -> Result<()> {
    match command {
        MealCommands::Add {
            name,
            calories,
            protein,
            carbs,
            fat,
            meal_type,
            time,
            date,
            id,
        } => {
            let date = date.unwrap_or_else(today);
            let meal = Meal {
                id: id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                name,
                calories,
                protein_g: protein,
                carbs_g: carbs,
                fat_g: fat,
                time: time_label(time),
                meal_type: parse_meal_type(&meal_type)?,
                date,
            };

            let log = store.add_meal(user, date, meal.clone())?;
            println!("✓ Meal logged: {} ({} kcal)", meal.name, meal.calories);
            println!("  id: {}", meal.id);
            print_totals(&log);
        }
        MealCommands::Rm { id, date } => {
            let log = store.delete_meal(user, date.unwrap_or_else(today), &id)?;
            println!("✓ Meal removed");
            print_totals(&log);
        }
    }
    Ok(())
}

fn cmd_exercise(store: &DailyLogStore, user: &str, command: ExerciseCommands) -> Result<()> {
    match command {
        ExerciseCommands::Add {
            name,
            calories_burned,
            duration,
            exercise_type,
            time,
            date,
            id,
        } => {
            let date = date.unwrap_or_else(today);
            let exercise = Exercise {
                id: id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                name,
                calories_burned,
                duration_minutes: duration,
                time: time_label(time),
                exercise_type: parse_exercise_type(&exercise_type)?,
                date,
            };

            let log = store.add_exercise(user, date, exercise.clone())?;
            println!(
                "✓ Exercise logged: {} ({} kcal, {} min)",
                exercise.name, exercise.calories_burned, exercise.duration_minutes
            );
            println!("  id: {}", exercise.id);
            print_totals(&log);
        }
        ExerciseCommands::Rm { id, date } => {
            let log = store.delete_exercise(user, date.unwrap_or_else(today), &id)?;
            println!("✓ Exercise removed");
            print_totals(&log);
        }
    }
    Ok(())
}

fn cmd_show(
    store: &DailyLogStore,
    user: &str,
    date: Option<NaiveDate>,
    profile_file: &std::path::Path,
    config: &Config,
) -> Result<()> {
    let date = date.unwrap_or_else(today);
    let log = store.get_or_default(user, date)?;
    let profile = UserProfile::load(profile_file)?;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DAILY LOG  {}", log.date);
    println!("╰─────────────────────────────────────────╯");
    println!();

    if log.meals.is_empty() {
        println!("  No meals logged.");
    } else {
        println!("  Meals:");
        for m in &log.meals {
            println!(
                "    {} · {} kcal · P{}g C{}g F{}g · {} [{}]",
                m.name, m.calories, m.protein_g, m.carbs_g, m.fat_g, m.time, m.id
            );
        }
    }

    println!();
    if log.exercises.is_empty() {
        println!("  No exercises logged.");
    } else {
        println!("  Exercises:");
        for e in &log.exercises {
            println!(
                "    {} · {} kcal · {} min · {} [{}]",
                e.name, e.calories_burned, e.duration_minutes, e.time, e.id
            );
        }
    }

    println!();
    println!("  Consumed: {} kcal", log.total_calories_consumed);
    println!("  Burned:   {} kcal", log.total_calories_burned);
    println!("  Net:      {} kcal", log.net_calories);
    println!(
        "  Water:    {} / {} ml",
        log.water_ml, config.targets.water_target_ml
    );

    if let Some(weight) = log.weight_kg {
        println!("  Weigh-in: {} kg", weight);
    }

    if let Some(profile) = profile {
        let remaining = i64::from(profile.daily_calorie_goal) - log.net_calories;
        println!();
        println!(
            "  Goal:     {} kcal ({} remaining)",
            profile.daily_calorie_goal, remaining
        );
    }

    println!();
    Ok(())
}

fn cmd_profile(
    profile_file: &std::path::Path,
    user: &str,
    command: ProfileCommands,
) -> Result<()> {
    match command {
        ProfileCommands::Set {
            name,
            email,
            weight,
            target_weight,
            height,
            age,
            sex,
            activity,
        } => {
            // Keep quiz answers and premium status across profile edits
            let previous = UserProfile::load(profile_file)?;

            let mut profile = UserProfile {
                id: user.to_string(),
                name,
                email,
                current_weight_kg: weight,
                target_weight_kg: target_weight.unwrap_or(weight),
                height_cm: height,
                age_years: age,
                sex: Sex::parse(&sex),
                activity_level: ActivityLevel::parse(&activity),
                daily_calorie_goal: 0,
                is_premium: previous.as_ref().is_some_and(|p| p.is_premium),
                quiz_completed: previous.as_ref().is_some_and(|p| p.quiz_completed),
                fitness_profile: previous.and_then(|p| p.fitness_profile),
            };
            profile.daily_calorie_goal = daily_calorie_goal(&profile);
            profile.save(profile_file)?;

            println!("✓ Profile saved for {}", profile.name);
            println!("  Daily calorie goal: {} kcal", profile.daily_calorie_goal);
        }
        ProfileCommands::Show => match UserProfile::load(profile_file)? {
            Some(profile) => {
                println!("  Name:     {}", profile.name);
                println!("  Email:    {}", profile.email);
                println!(
                    "  Weight:   {} kg (target {} kg)",
                    profile.current_weight_kg, profile.target_weight_kg
                );
                println!("  Height:   {} cm", profile.height_cm);
                println!("  Age:      {}", profile.age_years);
                println!("  Activity: {:?}", profile.activity_level);
                println!("  Goal:     {} kcal/day", profile.daily_calorie_goal);
                println!(
                    "  Premium:  {}",
                    if profile.is_premium { "active" } else { "free plan" }
                );
                if let Some(fitness) = &profile.fitness_profile {
                    println!("  Quiz:     {:?}, {:?}", fitness.goal, fitness.experience);
                }
            }
            None => println!("No profile saved. Run 'awardfit profile set' first."),
        },
        ProfileCommands::Clear => {
            UserProfile::clear(profile_file)?;
            println!("✓ Profile cleared");
        }
    }
    Ok(())
}

fn cmd_quiz(
    profile_file: &std::path::Path,
    goal: String,
    experience: String,
    frequency: String,
    diet: String,
    motivation: String,
    challenges: Vec<String>,
) -> Result<()> {
    let Some(mut profile) = UserProfile::load(profile_file)? else {
        return Err(Error::Other(
            "No profile saved. Run 'awardfit profile set' first.".into(),
        ));
    };

    profile.fitness_profile = Some(FitnessProfile {
        goal: parse_fitness_goal(&goal)?,
        experience: parse_experience(&experience)?,
        workout_frequency: frequency,
        diet_preference: parse_diet(&diet)?,
        motivation,
        challenges: challenges.into_iter().filter(|c| !c.is_empty()).collect(),
    });
    profile.quiz_completed = true;
    profile.daily_calorie_goal = daily_calorie_goal(&profile);
    profile.save(profile_file)?;

    println!("✓ Quiz saved");
    println!("  Daily calorie goal: {} kcal", profile.daily_calorie_goal);
    Ok(())
}

fn cmd_premium(profile_file: &std::path::Path) -> Result<()> {
    let Some(mut profile) = UserProfile::load(profile_file)? else {
        return Err(Error::Other(
            "No profile saved. Run 'awardfit profile set' first.".into(),
        ));
    };

    // No payment processing: activation is immediate
    profile.is_premium = true;
    profile.save(profile_file)?;

    println!("✓ Premium activated for {}", profile.name);
    Ok(())
}

fn print_totals(log: &DailyLog) {
    println!(
        "  {} · consumed {} kcal · burned {} kcal · net {} kcal",
        log.date, log.total_calories_consumed, log.total_calories_burned, log.net_calories
    );
}

fn parse_meal_type(s: &str) -> Result<MealType> {
    match s.to_lowercase().as_str() {
        "breakfast" => Ok(MealType::Breakfast),
        "lunch" => Ok(MealType::Lunch),
        "dinner" => Ok(MealType::Dinner),
        "snack" => Ok(MealType::Snack),
        other => Err(Error::Other(format!("Unknown meal type: {}", other))),
    }
}

fn parse_exercise_type(s: &str) -> Result<ExerciseType> {
    match s.to_lowercase().as_str() {
        "cardio" => Ok(ExerciseType::Cardio),
        "strength" => Ok(ExerciseType::Strength),
        "flexibility" => Ok(ExerciseType::Flexibility),
        "sports" => Ok(ExerciseType::Sports),
        other => Err(Error::Other(format!("Unknown exercise type: {}", other))),
    }
}

fn parse_fitness_goal(s: &str) -> Result<FitnessGoal> {
    match s.to_lowercase().as_str() {
        "lose-weight" | "lose_weight" => Ok(FitnessGoal::LoseWeight),
        "gain-muscle" | "gain_muscle" => Ok(FitnessGoal::GainMuscle),
        "maintain" => Ok(FitnessGoal::Maintain),
        "improve-health" | "improve_health" => Ok(FitnessGoal::ImproveHealth),
        other => Err(Error::Other(format!("Unknown goal: {}", other))),
    }
}

fn parse_experience(s: &str) -> Result<Experience> {
    match s.to_lowercase().as_str() {
        "beginner" => Ok(Experience::Beginner),
        "intermediate" => Ok(Experience::Intermediate),
        "advanced" => Ok(Experience::Advanced),
        other => Err(Error::Other(format!("Unknown experience level: {}", other))),
    }
}

fn parse_diet(s: &str) -> Result<DietPreference> {
    match s.to_lowercase().as_str() {
        "omnivore" => Ok(DietPreference::Omnivore),
        "vegetarian" => Ok(DietPreference::Vegetarian),
        "vegan" => Ok(DietPreference::Vegan),
        "keto" => Ok(DietPreference::Keto),
        "paleo" => Ok(DietPreference::Paleo),
        other => Err(Error::Other(format!("Unknown diet preference: {}", other))),
    }
}
