//! CSV export of daily summaries.
//!
//! Writes one row per logged date with the aggregate figures, newest window
//! first by date order. Meant for spreadsheets and external analysis.

use crate::{DailyLogStore, Result};
use chrono::{Duration, NaiveDate};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct SummaryRow {
    date: String,
    meals: usize,
    exercises: usize,
    calories_consumed: u32,
    calories_burned: u32,
    net_calories: i64,
    water_ml: u32,
}

/// Export the user's last `days` days of logged dates to `out` as CSV.
///
/// Only dates with a stored log produce a row; untouched dates are not
/// synthesized. Returns the number of rows written.
pub fn export_summary(
    store: &DailyLogStore,
    user_id: &str,
    today: NaiveDate,
    days: i64,
    out: &Path,
) -> Result<usize> {
    let cutoff = today - Duration::days(days);

    let dates: Vec<NaiveDate> = store
        .dates(user_id)?
        .into_iter()
        .filter(|d| *d > cutoff && *d <= today)
        .collect();

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Write the header up front so an empty window still yields a valid file
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(out)?;
    writer.write_record([
        "date",
        "meals",
        "exercises",
        "calories_consumed",
        "calories_burned",
        "net_calories",
        "water_ml",
    ])?;
    let mut count = 0;

    for date in &dates {
        // dates() only returns stored entries, so the log must exist
        let Some(log) = store.get(user_id, *date)? else {
            continue;
        };

        writer.serialize(SummaryRow {
            date: date.to_string(),
            meals: log.meals.len(),
            exercises: log.exercises.len(),
            calories_consumed: log.total_calories_consumed,
            calories_burned: log.total_calories_burned,
            net_calories: log.net_calories,
            water_ml: log.water_ml,
        })?;
        count += 1;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} daily summaries to {:?}", count, out);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Meal, MealType};

    fn meal(id: &str, calories: u32, d: NaiveDate) -> Meal {
        Meal {
            id: id.into(),
            name: "Salad".into(),
            calories,
            protein_g: 5,
            carbs_g: 20,
            fat_g: 10,
            time: "13:00".into(),
            meal_type: MealType::Lunch,
            date: d,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_export_writes_one_row_per_logged_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyLogStore::open(dir.path());
        let today = date("2024-01-10");

        let d1 = date("2024-01-09");
        let d2 = date("2024-01-10");
        store.add_meal("alice", d1, meal("a", 400, d1)).unwrap();
        store.add_meal("alice", d2, meal("b", 650, d2)).unwrap();
        store.set_water("alice", d2, 2000).unwrap();

        let out = dir.path().join("summary.csv");
        let count = export_summary(&store, "alice", today, 30, &out).unwrap();
        assert_eq!(count, 2);

        let contents = std::fs::read_to_string(&out).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,meals,exercises,calories_consumed,calories_burned,net_calories,water_ml"
        );
        assert_eq!(lines.next().unwrap(), "2024-01-09,1,0,400,0,400,0");
        assert_eq!(lines.next().unwrap(), "2024-01-10,1,0,650,0,650,2000");
    }

    #[test]
    fn test_export_respects_window() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyLogStore::open(dir.path());
        let today = date("2024-02-01");

        let recent = date("2024-01-30");
        let old = date("2023-11-01");
        store
            .add_meal("alice", recent, meal("a", 300, recent))
            .unwrap();
        store.add_meal("alice", old, meal("b", 300, old)).unwrap();

        let out = dir.path().join("summary.csv");
        let count = export_summary(&store, "alice", today, 7, &out).unwrap();
        assert_eq!(count, 1);

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.contains("2024-01-30"));
        assert!(!contents.contains("2023-11-01"));
    }

    #[test]
    fn test_export_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyLogStore::open(dir.path());

        let out = dir.path().join("summary.csv");
        let count = export_summary(&store, "alice", date("2024-01-01"), 30, &out).unwrap();
        assert_eq!(count, 0);

        // Header-only file
        let contents = std::fs::read_to_string(&out).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
