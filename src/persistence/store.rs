//! Durable integer preferences.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading or writing preferences.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read preferences '{path}': {details}")]
    Read { path: String, details: String },

    #[error("Failed to parse preferences '{path}': {details}")]
    Parse { path: String, details: String },

    #[error("Failed to write preferences '{path}': {details}")]
    Write { path: String, details: String },
}

/// Minimal integer key-value store.
pub trait PreferenceStore: Send + Sync {
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn set_int(&mut self, key: &str, value: i32);
    /// Flush pending writes to durable storage.
    fn save(&mut self) -> Result<(), PersistenceError>;
}

/// Preferences kept in a RON map on disk.
#[derive(Debug)]
pub struct RonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, i32>,
}

impl RonPreferenceStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let display = path.display().to_string();
        let contents = fs::read_to_string(&path).map_err(|e| PersistenceError::Read {
            path: display.clone(),
            details: e.to_string(),
        })?;
        let values = ron::from_str(&contents).map_err(|e| PersistenceError::Parse {
            path: display,
            details: e.to_string(),
        })?;

        Ok(Self { path, values })
    }

    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            values: BTreeMap::new(),
        }
    }
}

impl PreferenceStore for RonPreferenceStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<(), PersistenceError> {
        let write_error = |details: String| PersistenceError::Write {
            path: self.path.display().to_string(),
            details,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let contents = ron::ser::to_string_pretty(&self.values, ron::ser::PrettyConfig::default())
            .map_err(|e| write_error(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| write_error(e.to_string()))
    }
}

/// Non-durable store, used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    pub values: BTreeMap<String, i32>,
    pub save_count: usize,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<(), PersistenceError> {
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_store_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!(
            "stage_brawler_prefs_{}.ron",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut store = RonPreferenceStore::open(&path).expect("missing file opens empty");
        assert_eq!(store.get_int("ClearedStage", 0), 0);
        store.set_int("ClearedStage", 2);
        store.save().expect("save should succeed");

        let reopened = RonPreferenceStore::open(&path).expect("saved file should parse");
        assert_eq!(reopened.get_int("ClearedStage", 0), 2);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_reports_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "stage_brawler_corrupt_{}.ron",
            std::process::id()
        ));
        fs::write(&path, "not ron at all {").expect("temp write");

        let result = RonPreferenceStore::open(&path);
        assert!(matches!(result, Err(PersistenceError::Parse { .. })));

        let _ = fs::remove_file(&path);
    }
}
