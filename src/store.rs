//! Persistent key/value session storage.
//!
//! Mirrors the browser's `localStorage`: string values under fixed keys, kept in a
//! single JSON object on disk.

use crate::auth::SessionUser;
use crate::consts::cli_consts::storage::{SELECTED_DESIGNATION_KEY, USER_KEY};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let buf = fs::read(&self.path)?;
        if buf.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        Ok(serde_json::from_slice(&buf)?)
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    /// Deletes the storage file. Succeeds when there is nothing to delete.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The signed-in user, stored as a JSON string like the browser did.
    ///
    /// A value that no longer deserializes is treated as signed out.
    pub fn load_user(&self) -> Result<Option<SessionUser>, StoreError> {
        let Some(raw) = self.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("Ignoring unreadable stored user: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save_user(&self, user: &SessionUser) -> Result<(), StoreError> {
        self.set(USER_KEY, &serde_json::to_string(user)?)
    }

    pub fn selected_designation(&self) -> Result<Option<String>, StoreError> {
        self.get(SELECTED_DESIGNATION_KEY)
    }

    pub fn set_selected_designation(&self, designation: &str) -> Result<(), StoreError> {
        self.set(SELECTED_DESIGNATION_KEY, designation)
    }

    /// Removes the session keys, leaving any other stored values in place.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.remove(USER_KEY)?;
        self.remove(SELECTED_DESIGNATION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_user() -> SessionUser {
        SessionUser {
            username: "Asha".to_string(),
            name: "Asha".to_string(),
            designation: "Sales, Ops".to_string(),
            role: "admin".to_string(),
            designations: vec!["Sales".to_string(), "Ops".to_string()],
            image: None,
            performance: None,
            has_performance_data: false,
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(store.load_user().unwrap().is_none());
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested").join("storage.json"));

        store.set("theme", "dark").unwrap();
        store.set_selected_designation("Sales, Ops").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            store.selected_designation().unwrap().as_deref(),
            Some("Sales, Ops")
        );

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_user_round_trips_through_json_string() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("storage.json"));
        let user = sample_user();

        store.save_user(&user).unwrap();

        let raw = store.get(USER_KEY).unwrap().unwrap();
        assert!(raw.contains("\"hasPerformanceData\":false"));
        assert_eq!(store.load_user().unwrap(), Some(user));
    }

    #[test]
    fn test_logout_keeps_unrelated_keys() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("storage.json"));
        store.save_user(&sample_user()).unwrap();
        store.set_selected_designation("Sales").unwrap();
        store.set("theme", "dark").unwrap();

        store.logout().unwrap();

        assert!(store.load_user().unwrap().is_none());
        assert_eq!(store.selected_designation().unwrap(), None);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("storage.json"));
        store.set("a", "b").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_user_is_signed_out() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("storage.json"));
        store.set(USER_KEY, "{not json").unwrap();
        assert!(store.load_user().unwrap().is_none());
    }
}
