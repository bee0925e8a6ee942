mod config;
pub mod database;

pub use config::{CatalogConfig, Config, ReportConfig};
pub use database::Database;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::scoring::ScoreResult;

/// Storage key holding the last submitted [`ScoreResult`].
pub const RESULT_KEY: &str = "assessmentResults";

/// Returns the data directory, creating it if needed.
///
/// `CAREERFIT_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/careerfit[-dev]/`, with `CAREERFIT_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("CAREERFIT_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CAREERFIT_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("careerfit-dev")
            } else {
                base_dir.join("careerfit")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Read/write capability over a string key-value slot store.
///
/// The session only ever writes [`RESULT_KEY`]; the results view only reads it.
pub trait ResultStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Returns whether a value was present.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Non-persistent store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.slots.borrow_mut().remove(key).is_some())
    }
}

/// Persist a result under [`RESULT_KEY`], replacing any earlier one.
pub fn save_result(store: &dyn ResultStore, result: &ScoreResult) -> Result<(), StorageError> {
    let json = serde_json::to_string(result).map_err(|e| StorageError::Corrupt {
        key: RESULT_KEY.to_string(),
        message: e.to_string(),
    })?;
    store.set(RESULT_KEY, &json)?;
    tracing::info!(overall = result.overall, recommendation = %result.recommendation, "stored assessment result");
    Ok(())
}

/// Load the stored result, if any.
///
/// # Errors
/// Returns [`StorageError::Corrupt`] if the slot holds something that
/// isn't a `ScoreResult`.
pub fn load_result(store: &dyn ResultStore) -> Result<Option<ScoreResult>, StorageError> {
    let Some(json) = store.get(RESULT_KEY)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| StorageError::Corrupt {
            key: RESULT_KEY.to_string(),
            message: e.to_string(),
        })
}

/// Remove the stored result. Returns whether one existed.
pub fn clear_result(store: &dyn ResultStore) -> Result<bool, StorageError> {
    store.remove(RESULT_KEY)
}
