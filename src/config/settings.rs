//! User settings for passbook
//!
//! Holds the default account and currency, the per-currency formatting
//! table, and report/backup preferences.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paths::PassbookPaths;
use crate::error::PassbookError;
use crate::models::CurrencyFormat;

/// Image format for generated reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Png,
    Svg,
}

impl ReportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Png => "png",
            ReportFormat::Svg => "svg",
        }
    }
}

/// Pixel size of generated report images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ReportSize {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
        }
    }
}

/// User settings for passbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Account used when none is given
    #[serde(default = "default_account")]
    pub default_account: String,

    /// Currency used when none is given
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Formatting rules per currency code
    #[serde(default = "default_currencies")]
    pub currencies: BTreeMap<String, CurrencyFormat>,

    /// Suffix appended to the ledger path for its backup copy
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,

    /// Number of entries shown by `view`
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    #[serde(default)]
    pub report_format: ReportFormat,

    #[serde(default)]
    pub report_size: ReportSize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_account() -> String {
    "testing".to_string()
}

fn default_currency() -> String {
    "won".to_string()
}

fn default_currencies() -> BTreeMap<String, CurrencyFormat> {
    let mut currencies = BTreeMap::new();
    currencies.insert("won".to_string(), CurrencyFormat::won());
    currencies.insert("usd".to_string(), CurrencyFormat::usd());
    currencies.insert("eur".to_string(), CurrencyFormat::eur());
    currencies
}

fn default_backup_suffix() -> String {
    ".bak".to_string()
}

fn default_recent_count() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_account: default_account(),
            default_currency: default_currency(),
            currencies: default_currencies(),
            backup_suffix: default_backup_suffix(),
            recent_count: default_recent_count(),
            report_format: ReportFormat::default(),
            report_size: ReportSize::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PassbookPaths) -> Result<Self, PassbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PassbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PassbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PassbookPaths) -> Result<(), PassbookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PassbookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PassbookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Look up the formatting rules for a currency code
    pub fn currency(&self, code: &str) -> Result<&CurrencyFormat, PassbookError> {
        self.currencies.get(&code.to_lowercase()).ok_or_else(|| {
            let known: Vec<&str> = self.currencies.keys().map(String::as_str).collect();
            PassbookError::Config(format!(
                "Unknown currency '{}'. Configured currencies: {}",
                code,
                known.join(", ")
            ))
        })
    }

    fn validate(&self) -> Result<(), PassbookError> {
        if self.backup_suffix.is_empty() {
            return Err(PassbookError::Config("backup_suffix cannot be empty".into()));
        }
        for (code, format) in &self.currencies {
            format
                .validate()
                .map_err(|e| PassbookError::Config(format!("Currency '{}': {}", code, e)))?;
        }
        Ok(())
    }
}
