//! Calorie math: BMR, TDEE and the daily calorie goal.
//!
//! Pure functions over biometrics. Inputs are taken at face value; supplying
//! physiologically sane numbers is the caller's job.

use crate::{ActivityLevel, FitnessGoal, Sex, UserProfile};

/// Basal Metabolic Rate (kcal/day) via the Mifflin-St Jeor equation.
///
/// Male: `10w + 6.25h - 5a + 5`. Female and any other value:
/// `10w + 6.25h - 5a - 161`.
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female | Sex::Other => base - 161.0,
    }
}

/// Total Daily Energy Expenditure (kcal/day): BMR scaled by the activity
/// multiplier. Unrecognized activity levels use the sedentary factor.
pub fn tdee(bmr: f64, activity_level: &ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Daily calorie goal for a profile: TDEE adjusted by the quiz goal.
///
/// Lose-weight runs a 500 kcal deficit, gain-muscle a 300 kcal surplus;
/// everything else eats at maintenance. Rounded to a whole kcal.
pub fn daily_calorie_goal(profile: &UserProfile) -> u32 {
    let bmr = bmr(
        profile.current_weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.sex,
    );
    let tdee = tdee(bmr, &profile.activity_level);

    let adjusted = match profile.fitness_profile.as_ref().map(|f| f.goal) {
        Some(FitnessGoal::LoseWeight) => tdee - 500.0,
        Some(FitnessGoal::GainMuscle) => tdee + 300.0,
        _ => tdee,
    };

    adjusted.round().max(0.0) as u32
}
