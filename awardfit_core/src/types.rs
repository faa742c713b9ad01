//! Core domain types for the AwardFit calorie tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Meals and exercises with their nutrition/effort figures
//! - Daily logs and their derived calorie totals
//! - User profiles and biometrics
//! - Fitness quiz results

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Meal and Exercise Types
// ============================================================================

/// Slot of the day a meal belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Category of a logged exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Cardio,
    Strength,
    Flexibility,
    Sports,
}

/// A logged meal. Immutable once stored; removal is the only lifecycle event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    /// Time-of-day label, e.g. "08:30". Display only.
    pub time: String,
    pub meal_type: MealType,
    pub date: NaiveDate,
}

/// A logged exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub calories_burned: u32,
    pub duration_minutes: u32,
    pub time: String,
    pub exercise_type: ExerciseType,
    pub date: NaiveDate,
}

// ============================================================================
// Daily Log
// ============================================================================

/// One date's aggregate record of meals, exercises and water.
///
/// The three calorie totals are derived values: they are recomputed by the
/// constructors below on every mutation and are never accepted from callers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
    pub total_calories_consumed: u32,
    pub total_calories_burned: u32,
    pub net_calories: i64,
    pub water_ml: u32,
    /// Optional morning weigh-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

impl DailyLog {
    /// Zero-valued log for a date that has never been written
    pub fn empty(date: NaiveDate) -> Self {
        Self::rebuilt(date, Vec::new(), Vec::new(), 0, None)
    }

    /// Build a log from its parts, recomputing every derived total
    fn rebuilt(
        date: NaiveDate,
        meals: Vec<Meal>,
        exercises: Vec<Exercise>,
        water_ml: u32,
        weight_kg: Option<f64>,
    ) -> Self {
        let consumed: u32 = meals.iter().map(|m| m.calories).sum();
        let burned: u32 = exercises.iter().map(|e| e.calories_burned).sum();

        Self {
            date,
            meals,
            exercises,
            total_calories_consumed: consumed,
            total_calories_burned: burned,
            net_calories: i64::from(consumed) - i64::from(burned),
            water_ml,
            weight_kg,
        }
    }

    /// New log with `meal` appended.
    ///
    /// Rejects a meal whose id is already present rather than silently
    /// overwriting the stored one.
    pub fn with_meal(self, meal: Meal) -> Result<Self> {
        if self.meals.iter().any(|m| m.id == meal.id) {
            return Err(Error::DuplicateId {
                kind: "meal",
                id: meal.id,
                date: self.date,
            });
        }

        let mut meals = self.meals;
        meals.push(meal);
        Ok(Self::rebuilt(
            self.date,
            meals,
            self.exercises,
            self.water_ml,
            self.weight_kg,
        ))
    }

    /// New log with `exercise` appended. Same id discipline as [`Self::with_meal`].
    pub fn with_exercise(self, exercise: Exercise) -> Result<Self> {
        if self.exercises.iter().any(|e| e.id == exercise.id) {
            return Err(Error::DuplicateId {
                kind: "exercise",
                id: exercise.id,
                date: self.date,
            });
        }

        let mut exercises = self.exercises;
        exercises.push(exercise);
        Ok(Self::rebuilt(
            self.date,
            self.meals,
            exercises,
            self.water_ml,
            self.weight_kg,
        ))
    }

    /// New log without the meal of that id. A no-op if the id is absent.
    pub fn without_meal(self, meal_id: &str) -> Self {
        let mut meals = self.meals;
        meals.retain(|m| m.id != meal_id);
        Self::rebuilt(
            self.date,
            meals,
            self.exercises,
            self.water_ml,
            self.weight_kg,
        )
    }

    /// New log without the exercise of that id. A no-op if the id is absent.
    pub fn without_exercise(self, exercise_id: &str) -> Self {
        let mut exercises = self.exercises;
        exercises.retain(|e| e.id != exercise_id);
        Self::rebuilt(
            self.date,
            self.meals,
            exercises,
            self.water_ml,
            self.weight_kg,
        )
    }

    /// New log with the water volume overwritten. Calorie totals are untouched;
    /// no clamping to a daily target happens here.
    pub fn with_water(self, water_ml: u32) -> Self {
        Self {
            water_ml,
            ..self
        }
    }

    /// New log with the weigh-in recorded
    pub fn with_weight(self, weight_kg: f64) -> Self {
        Self {
            weight_kg: Some(weight_kg),
            ..self
        }
    }
}

// ============================================================================
// User Profile Types
// ============================================================================

/// Sex used by the BMR formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    /// Parse a sex string, defaulting unknown values to `Other`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" | "m" => Sex::Male,
            "female" | "f" => Sex::Female,
            _ => Sex::Other,
        }
    }
}

/// Activity level scaling BMR into TDEE
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
    Other(String),
}

impl ActivityLevel {
    /// Parse an activity level string into the enum
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very-active" | "very_active" | "veryactive" => ActivityLevel::VeryActive,
            other => ActivityLevel::Other(other.to_string()),
        }
    }

    /// TDEE multiplier. Unrecognized levels fall back to the sedentary factor.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
            ActivityLevel::Other(_) => 1.2,
        }
    }
}

/// Primary goal from the fitness quiz
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    LoseWeight,
    GainMuscle,
    Maintain,
    ImproveHealth,
}

/// Training experience from the fitness quiz
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

/// Diet preference from the fitness quiz
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietPreference {
    Omnivore,
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
}

/// Result of the fitness-profile quiz
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FitnessProfile {
    pub goal: FitnessGoal,
    pub experience: Experience,
    /// Workout days per week, e.g. "2-3"
    pub workout_frequency: String,
    pub diet_preference: DietPreference,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub challenges: Vec<String>,
}

/// A user's profile: identity, biometrics and goal context.
///
/// The store only ever sees the `id`; everything else is input to the
/// calorie math or display context for the presentation layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub daily_calorie_goal: u32,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub quiz_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_profile: Option<FitnessProfile>,
}
