#![forbid(unsafe_code)]

//! Core domain model and business logic for the AwardFit calorie tracker.
//!
//! This crate provides:
//! - Domain types (meals, exercises, daily logs, user profiles)
//! - The daily log store with derived-total bookkeeping
//! - Calorie math (BMR/TDEE)
//! - Profile persistence
//! - CSV summary export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod goals;
pub mod store;
pub mod profile;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use goals::{bmr, daily_calorie_goal, tdee};
pub use store::DailyLogStore;
pub use export::export_summary;
