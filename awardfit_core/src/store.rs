//! Daily log persistence with file locking.
//!
//! [`DailyLogStore`] owns the mapping from (user, date) to [`DailyLog`] and is
//! the only writer of the derived calorie totals. Every mutation is a
//! read-modify-write of one date's log: load the book, build a fresh log value
//! with recomputed totals, save the book back atomically.

use crate::{DailyLog, Error, Exercise, Meal, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The persisted document: all daily logs, keyed by user then date.
///
/// Logs are scoped per user so that two users sharing one data directory can
/// never see each other's entries for the same date.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
struct LogBook {
    logs: HashMap<String, HashMap<NaiveDate, DailyLog>>,
}

impl LogBook {
    fn get(&self, user_id: &str, date: NaiveDate) -> Option<&DailyLog> {
        self.logs.get(user_id).and_then(|by_date| by_date.get(&date))
    }

    fn insert(&mut self, user_id: &str, log: DailyLog) {
        self.logs
            .entry(user_id.to_string())
            .or_default()
            .insert(log.date, log);
    }
}

/// Store of per-date daily logs backed by a single JSON file
pub struct DailyLogStore {
    path: PathBuf,
}

impl DailyLogStore {
    /// Store backed by `daily_logs.json` inside `data_dir`
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("daily_logs.json"),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored log for a date, or `None` if that date was never written.
    ///
    /// Reads have no side effect: a missing log is not created.
    pub fn get(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyLog>> {
        let book = self.load_book()?;
        Ok(book.get(user_id, date).cloned())
    }

    /// Like [`Self::get`], but synthesizes a zero-valued log for absent dates.
    /// The synthesized default is not persisted.
    pub fn get_or_default(&self, user_id: &str, date: NaiveDate) -> Result<DailyLog> {
        Ok(self
            .get(user_id, date)?
            .unwrap_or_else(|| DailyLog::empty(date)))
    }

    /// All dates with a stored log for this user, oldest first
    pub fn dates(&self, user_id: &str) -> Result<Vec<NaiveDate>> {
        let book = self.load_book()?;
        let mut dates: Vec<NaiveDate> = book
            .logs
            .get(user_id)
            .map(|by_date| by_date.keys().copied().collect())
            .unwrap_or_default();
        dates.sort();
        Ok(dates)
    }

    /// Append a meal to the date's log, creating the log if absent.
    ///
    /// Fails with [`Error::DuplicateId`] if the log already holds a meal with
    /// that id. Returns the updated log.
    pub fn add_meal(&self, user_id: &str, date: NaiveDate, meal: Meal) -> Result<DailyLog> {
        self.mutate(user_id, date, |log| log.with_meal(meal))
    }

    /// Append an exercise to the date's log, creating the log if absent
    pub fn add_exercise(
        &self,
        user_id: &str,
        date: NaiveDate,
        exercise: Exercise,
    ) -> Result<DailyLog> {
        self.mutate(user_id, date, |log| log.with_exercise(exercise))
    }

    /// Remove the meal with that id. A no-op, not an error, if absent.
    pub fn delete_meal(&self, user_id: &str, date: NaiveDate, meal_id: &str) -> Result<DailyLog> {
        self.mutate(user_id, date, |log| Ok(log.without_meal(meal_id)))
    }

    /// Remove the exercise with that id. A no-op, not an error, if absent.
    pub fn delete_exercise(
        &self,
        user_id: &str,
        date: NaiveDate,
        exercise_id: &str,
    ) -> Result<DailyLog> {
        self.mutate(user_id, date, |log| Ok(log.without_exercise(exercise_id)))
    }

    /// Overwrite the water volume for the date's log. Any non-negative amount
    /// is accepted; clamping to a target is a presentation concern.
    pub fn set_water(&self, user_id: &str, date: NaiveDate, water_ml: u32) -> Result<DailyLog> {
        self.mutate(user_id, date, |log| Ok(log.with_water(water_ml)))
    }

    /// Record a weigh-in on the date's log
    pub fn set_weight(&self, user_id: &str, date: NaiveDate, weight_kg: f64) -> Result<DailyLog> {
        self.mutate(user_id, date, |log| Ok(log.with_weight(weight_kg)))
    }

    /// Load-modify-save for one date's log.
    ///
    /// The closure receives the stored log (or a zero-valued default) and
    /// returns the replacement value to persist.
    fn mutate<F>(&self, user_id: &str, date: NaiveDate, f: F) -> Result<DailyLog>
    where
        F: FnOnce(DailyLog) -> Result<DailyLog>,
    {
        let mut book = self.load_book()?;
        let current = book
            .get(user_id, date)
            .cloned()
            .unwrap_or_else(|| DailyLog::empty(date));

        let updated = f(current)?;
        book.insert(user_id, updated.clone());
        self.save_book(&book)?;

        tracing::debug!(
            user = user_id,
            %date,
            consumed = updated.total_calories_consumed,
            burned = updated.total_calories_burned,
            net = updated.net_calories,
            "Saved daily log"
        );
        Ok(updated)
    }

    /// Load the log book with shared locking.
    ///
    /// A missing file is an empty book. An unreadable or unparsable file is a
    /// [`Error::Storage`] fault, surfaced rather than silently defaulted so a
    /// mutation can never clobber data it failed to read.
    fn load_book(&self) -> Result<LogBook> {
        if !self.path.exists() {
            return Ok(LogBook::default());
        }

        let file = File::open(&self.path)
            .map_err(|e| Error::Storage(format!("cannot open {:?}: {}", self.path, e)))?;

        file.lock_shared()
            .map_err(|e| Error::Storage(format!("cannot lock {:?}: {}", self.path, e)))?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        let _ = file.unlock();
        read_result.map_err(|e| Error::Storage(format!("cannot read {:?}: {}", self.path, e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| Error::Storage(format!("corrupt log book {:?}: {}", self.path, e)))
    }

    /// Save the log book with exclusive locking.
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save_book(&self, book: &LogBook) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
        })?)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(book)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExerciseType, MealType};

    fn store() -> (tempfile::TempDir, DailyLogStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyLogStore::open(dir.path());
        (dir, store)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn meal(id: &str, calories: u32, d: NaiveDate) -> Meal {
        Meal {
            id: id.into(),
            name: "Grilled chicken".into(),
            calories,
            protein_g: 35,
            carbs_g: 0,
            fat_g: 8,
            time: "12:30".into(),
            meal_type: MealType::Lunch,
            date: d,
        }
    }

    fn exercise(id: &str, burned: u32, d: NaiveDate) -> Exercise {
        Exercise {
            id: id.into(),
            name: "Cycling".into(),
            calories_burned: burned,
            duration_minutes: 45,
            time: "07:00".into(),
            exercise_type: ExerciseType::Cardio,
            date: d,
        }
    }

    #[test]
    fn test_get_unwritten_date_is_none() {
        let (_dir, store) = store();
        let d = date("2024-01-01");

        assert_eq!(store.get("alice", d).unwrap(), None);

        let log = store.get_or_default("alice", d).unwrap();
        assert_eq!(log, DailyLog::empty(d));
    }

    #[test]
    fn test_get_has_no_persisted_side_effect() {
        let (_dir, store) = store();
        let untouched = date("2024-01-01");
        let written = date("2024-01-02");

        // Read the untouched date, then write somewhere else
        store.get_or_default("alice", untouched).unwrap();
        store
            .add_meal("alice", written, meal("a", 100, written))
            .unwrap();

        assert_eq!(store.get("alice", untouched).unwrap(), None);
        assert_eq!(store.dates("alice").unwrap(), vec![written]);
    }

    #[test]
    fn test_add_meal_roundtrip() {
        let (_dir, store) = store();
        let d = date("2024-01-01");
        let m = meal("a", 350, d);

        store.add_meal("alice", d, m.clone()).unwrap();

        let log = store.get("alice", d).unwrap().unwrap();
        assert_eq!(log.meals, vec![m]);
        assert_eq!(log.total_calories_consumed, 350);

        store.delete_meal("alice", d, "a").unwrap();
        let log = store.get("alice", d).unwrap().unwrap();
        assert!(log.meals.is_empty());
        assert_eq!(log.total_calories_consumed, 0);
    }

    #[test]
    fn test_scenario_totals() {
        let (_dir, store) = store();
        let d = date("2024-01-01");

        store.add_meal("alice", d, meal("m1", 350, d)).unwrap();
        store.add_meal("alice", d, meal("m2", 200, d)).unwrap();
        let log = store
            .add_exercise("alice", d, exercise("e1", 150, d))
            .unwrap();

        assert_eq!(log.total_calories_consumed, 550);
        assert_eq!(log.total_calories_burned, 150);
        assert_eq!(log.net_calories, 400);
    }

    #[test]
    fn test_totals_invariant_after_each_call() {
        let (_dir, store) = store();
        let d = date("2024-01-01");

        for (i, calories) in [120, 80, 450, 300].iter().enumerate() {
            let log = store
                .add_meal("alice", d, meal(&format!("m{}", i), *calories, d))
                .unwrap();
            let expected: u32 = log.meals.iter().map(|m| m.calories).sum();
            assert_eq!(log.total_calories_consumed, expected);
            assert_eq!(
                log.net_calories,
                i64::from(log.total_calories_consumed) - i64::from(log.total_calories_burned)
            );
        }
    }

    #[test]
    fn test_duplicate_meal_id_rejected_and_log_unchanged() {
        let (_dir, store) = store();
        let d = date("2024-01-01");

        store.add_meal("alice", d, meal("a", 100, d)).unwrap();
        let err = store.add_meal("alice", d, meal("a", 999, d)).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));

        let log = store.get("alice", d).unwrap().unwrap();
        assert_eq!(log.meals.len(), 1);
        assert_eq!(log.total_calories_consumed, 100);
    }

    #[test]
    fn test_delete_absent_ids_are_noops() {
        let (_dir, store) = store();
        let d = date("2024-01-01");

        store.add_meal("alice", d, meal("a", 100, d)).unwrap();
        store.delete_meal("alice", d, "ghost").unwrap();
        store.delete_exercise("alice", d, "ghost").unwrap();

        let log = store.get("alice", d).unwrap().unwrap();
        assert_eq!(log.meals.len(), 1);
        assert_eq!(log.total_calories_consumed, 100);
    }

    #[test]
    fn test_set_water_creates_log_and_keeps_totals() {
        let (_dir, store) = store();
        let d = date("2024-01-01");

        let log = store.set_water("alice", d, 1750).unwrap();
        assert_eq!(log.water_ml, 1750);
        assert_eq!(log.total_calories_consumed, 0);

        store.add_meal("alice", d, meal("a", 100, d)).unwrap();
        let log = store.set_water("alice", d, 2250).unwrap();
        assert_eq!(log.water_ml, 2250);
        assert_eq!(log.total_calories_consumed, 100);
    }

    #[test]
    fn test_logs_are_scoped_per_user() {
        let (_dir, store) = store();
        let d = date("2024-01-01");

        store.add_meal("alice", d, meal("a", 100, d)).unwrap();
        store.add_meal("bob", d, meal("a", 700, d)).unwrap();

        let alice = store.get("alice", d).unwrap().unwrap();
        let bob = store.get("bob", d).unwrap().unwrap();
        assert_eq!(alice.total_calories_consumed, 100);
        assert_eq!(bob.total_calories_consumed, 700);
    }

    #[test]
    fn test_corrupt_book_surfaces_storage_error() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ not json }").unwrap();

        let err = store.get("alice", date("2024-01-01")).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));

        // Mutations must refuse to clobber the unreadable file
        let d = date("2024-01-01");
        let err = store.add_meal("alice", d, meal("a", 100, d)).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "{ not json }");
    }

    #[test]
    fn test_persists_across_store_instances() {
        let (dir, store) = store();
        let d = date("2024-01-01");
        store.add_meal("alice", d, meal("a", 100, d)).unwrap();
        drop(store);

        let reopened = DailyLogStore::open(dir.path());
        let log = reopened.get("alice", d).unwrap().unwrap();
        assert_eq!(log.total_calories_consumed, 100);
    }
}
