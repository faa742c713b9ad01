//! User profile persistence with file locking.
//!
//! One profile per data directory. Saved with the same atomic
//! write-temp-then-rename discipline as the daily log store.

use crate::{Error, Result, UserProfile};
use fs2::FileExt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Path of the profile file inside a data directory
pub fn profile_path(data_dir: &Path) -> PathBuf {
    data_dir.join("profile.json")
}

impl UserProfile {
    /// Load the profile from a file with shared locking.
    ///
    /// Returns `None` if no profile has been saved yet. An unreadable or
    /// unparsable file is a storage fault.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!("No profile file at {:?}", path);
            return Ok(None);
        }

        let file = std::fs::File::open(path)
            .map_err(|e| Error::Storage(format!("cannot open {:?}: {}", path, e)))?;
        file.lock_shared()
            .map_err(|e| Error::Storage(format!("cannot lock {:?}: {}", path, e)))?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        let _ = file.unlock();
        read_result.map_err(|e| Error::Storage(format!("cannot read {:?}: {}", path, e)))?;

        let profile = serde_json::from_str(&contents)
            .map_err(|e| Error::Storage(format!("corrupt profile {:?}: {}", path, e)))?;
        tracing::debug!("Loaded profile from {:?}", path);
        Ok(Some(profile))
    }

    /// Save the profile to a file with exclusive locking and atomic rename
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }

    /// Delete the saved profile, if any
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
            tracing::info!("Cleared profile at {:?}", path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityLevel, Sex};

    fn sample() -> UserProfile {
        UserProfile {
            id: "alice".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            current_weight_kg: 70.0,
            target_weight_kg: 65.0,
            height_cm: 175.0,
            age_years: 30,
            sex: Sex::Female,
            activity_level: ActivityLevel::Light,
            daily_calorie_goal: 1900,
            is_premium: false,
            quiz_completed: false,
            fitness_profile: None,
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = profile_path(temp_dir.path());

        let profile = sample();
        profile.save(&path).unwrap();

        let loaded = UserProfile::load(&path).unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_load_missing_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = profile_path(temp_dir.path());

        assert!(UserProfile::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_profile_is_storage_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = profile_path(temp_dir.path());
        std::fs::write(&path, "{ invalid json }").unwrap();

        let err = UserProfile::load(&path).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_clear_removes_profile() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = profile_path(temp_dir.path());

        sample().save(&path).unwrap();
        assert!(path.exists());

        UserProfile::clear(&path).unwrap();
        assert!(!path.exists());

        // Clearing again is fine
        UserProfile::clear(&path).unwrap();
    }

    #[test]
    fn test_premium_flag_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = profile_path(temp_dir.path());

        let mut profile = sample();
        profile.is_premium = true;
        profile.save(&path).unwrap();

        let loaded = UserProfile::load(&path).unwrap().unwrap();
        assert!(loaded.is_premium);
    }
}
