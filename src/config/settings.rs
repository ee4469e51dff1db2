//! User settings
//!
//! Stored as JSON in `config.json` next to the ledger.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// What a ledger scan does with a line it cannot parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Fail the whole scan (default)
    #[default]
    Fail,
    /// Skip the line and count it
    Skip,
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Handling of malformed ledger lines
    #[serde(default)]
    pub malformed_lines: MalformedLinePolicy,

    /// Currency symbol shown in front of amounts
    #[serde(default)]
    pub currency_symbol: String,

    /// Default CSV export destination
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    /// Ledger file location, overriding the one in the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_export_file() -> PathBuf {
    PathBuf::from("expenses.csv")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            malformed_lines: MalformedLinePolicy::default(),
            currency_symbol: String::new(),
            export_file: default_export_file(),
            ledger_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Config(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Config(format!("Failed to write settings file: {}", e)))
    }

    /// Ledger file to use: the configured override or the default location
    pub fn ledger_path(&self, paths: &LedgerPaths) -> PathBuf {
        self.ledger_file
            .clone()
            .unwrap_or_else(|| paths.ledger_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.malformed_lines, MalformedLinePolicy::Fail);
        assert_eq!(settings.export_file, PathBuf::from("expenses.csv"));
        assert!(settings.ledger_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            malformed_lines: MalformedLinePolicy::Skip,
            currency_symbol: "$".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.malformed_lines, MalformedLinePolicy::Skip);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"malformed_lines": "skip"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.malformed_lines, MalformedLinePolicy::Skip);
        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.export_file, PathBuf::from("expenses.csv"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_ledger_path_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        assert_eq!(settings.ledger_path(&paths), paths.ledger_file());

        settings.ledger_file = Some(temp_dir.path().join("other.txt"));
        assert_eq!(settings.ledger_path(&paths), temp_dir.path().join("other.txt"));
    }
}
