//! User settings for my-expenses
//!
//! Manages display preferences: currency symbol and date format.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol appended to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Check that `format` renders a calendar date.
///
/// Time specifiers such as `%H` parse fine but fail when applied to a date,
/// so the format is also tried against a sample date.
pub fn validate_date_format(format: &str) -> Result<(), ExpenseError> {
    let invalid = || ExpenseError::Config(format!("Invalid date format: '{}'", format));

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let sample = NaiveDate::from_ymd_opt(2025, 1, 31).ok_or_else(invalid)?;
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).map_err(|_| invalid())?;
    Ok(())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Replace the date format after checking it
    pub fn set_date_format(&mut self, format: impl Into<String>) -> Result<(), ExpenseError> {
        let format = format.into();
        validate_date_format(&format)?;
        self.date_format = format;
        Ok(())
    }

    /// Render a date with the configured format.
    ///
    /// A settings file edited by hand may still hold a bad format; those dates
    /// fall back to `%Y-%m-%d`.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut rendered = String::new();
        match write!(rendered, "{}", date.format(&self.date_format)) {
            Ok(()) => rendered,
            Err(_) => date.format(DEFAULT_DATE_FORMAT).to_string(),
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ExpenseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "$".to_string(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert!(paths.is_initialized());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"schema_version": 1}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_time_only_date_format_is_rejected() {
        let mut settings = Settings::default();

        for format in ["%H:%M", "%Y-%m-%d %S", "%Q"] {
            let err = settings.set_date_format(format).unwrap_err();
            assert!(matches!(err, ExpenseError::Config(_)));
            assert!(err.to_string().contains(format));
        }
        assert_eq!(settings.date_format, "%Y-%m-%d");

        settings.set_date_format("%d/%m/%Y").unwrap();
        assert_eq!(settings.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_format_date_falls_back_on_bad_format() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let settings: Settings =
            serde_json::from_str(r#"{"schema_version": 1, "date_format": "%H:%M"}"#).unwrap();

        assert_eq!(settings.format_date(date), "2025-04-01");

        let settings = Settings {
            date_format: "%d.%m.%Y".into(),
            ..Settings::default()
        };
        assert_eq!(settings.format_date(date), "01.04.2025");
    }

    #[test]
    fn test_load_without_file_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert!(!paths.settings_file().exists());
    }
}
