//! Application configuration.

use crate::consts::cli_consts::{sheets, storage};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Which spreadsheets and sheets the dashboard reads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Spreadsheet with the performance and history sheets.
    pub records_spreadsheet_id: String,
    /// Spreadsheet with the credentials sheet.
    pub auth_spreadsheet_id: String,
    pub master_sheet: String,
    pub performance_sheet: String,
    pub history_sheet: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            records_spreadsheet_id: sheets::RECORDS_SPREADSHEET_ID.to_string(),
            auth_spreadsheet_id: sheets::AUTH_SPREADSHEET_ID.to_string(),
            master_sheet: sheets::MASTER_SHEET.to_string(),
            performance_sheet: sheets::PERFORMANCE_SHEET.to_string(),
            history_sheet: sheets::HISTORY_SHEET.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file at the given path.
    ///
    /// Fields missing from the file take their default values.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let settings: Settings = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }

    /// Loads settings if the file exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the settings to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Applies command-line overrides on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        records_spreadsheet_id: Option<String>,
        auth_spreadsheet_id: Option<String>,
    ) -> Self {
        if let Some(id) = records_spreadsheet_id {
            self.records_spreadsheet_id = id;
        }
        if let Some(id) = auth_spreadsheet_id {
            self.auth_spreadsheet_id = id;
        }
        self
    }
}

/// Directory holding the dashboard's files, `~/.kpi-dashboard`.
pub fn get_app_dir() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(storage::APP_DIR))
}

/// Path of the settings file.
pub fn get_settings_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_app_dir()?.join(storage::SETTINGS_FILE))
}

/// Path of the session storage file.
pub fn get_storage_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_app_dir()?.join(storage::STORAGE_FILE))
}
