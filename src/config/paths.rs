//! Path management for passbook
//!
//! ## Path Resolution Order
//!
//! 1. `PASSBOOK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/passbook` on Linux,
//!    `~/Library/Application Support/passbook` on macOS,
//!    `%APPDATA%\passbook` on Windows)
//!
//! Each account gets its own directory under `accounts/`, holding one
//! ledger file per currency, its backup, and generated reports.

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::PassbookError;

/// Manages all paths used by passbook
#[derive(Debug, Clone)]
pub struct PassbookPaths {
    /// Base directory for all passbook data
    base_dir: PathBuf,
}

impl PassbookPaths {
    /// Create a new PassbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PassbookError> {
        let base_dir = if let Ok(custom) = std::env::var("PASSBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PassbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Directory holding one sub-directory per account
    pub fn accounts_dir(&self) -> PathBuf {
        self.base_dir.join("accounts")
    }

    /// Directory for one account's ledgers and reports
    pub fn account_dir(&self, account: &str) -> PathBuf {
        self.accounts_dir().join(account)
    }

    /// Ledger file for an account in a given currency
    pub fn ledger_file(&self, account: &str, currency: &str) -> PathBuf {
        self.account_dir(account)
            .join(format!("bank_account_{}_{}.csv", account, currency))
    }

    /// Ensure the base and accounts directories exist
    pub fn ensure_directories(&self) -> Result<(), PassbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PassbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.accounts_dir()).map_err(|e| {
            PassbookError::Io(format!("Failed to create accounts directory: {}", e))
        })?;

        Ok(())
    }

    /// Ensure an account's directory exists and return it
    pub fn ensure_account_dir(&self, account: &str) -> Result<PathBuf, PassbookError> {
        validate_account_name(account)?;
        let dir = self.account_dir(account);
        std::fs::create_dir_all(&dir).map_err(|e| {
            PassbookError::Io(format!("Failed to create account directory: {}", e))
        })?;
        Ok(dir)
    }
}

/// Account and currency names become path components
pub fn validate_account_name(name: &str) -> Result<(), PassbookError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(PassbookError::Validation(format!(
            "Invalid name '{}': use letters, digits, '_' or '-'",
            name
        )))
    }
}

fn resolve_default_path() -> Result<PathBuf, PassbookError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| PassbookError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("passbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PassbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.accounts_dir(), temp_dir.path().join("accounts"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ledger_file_naming() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PassbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.ledger_file("testing", "won"),
            temp_dir
                .path()
                .join("accounts")
                .join("testing")
                .join("bank_account_testing_won.csv")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PassbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();
        let account_dir = paths.ensure_account_dir("savings").unwrap();

        assert!(paths.accounts_dir().exists());
        assert!(account_dir.exists());
    }

    #[test]
    fn test_account_name_validation() {
        assert!(validate_account_name("testing").is_ok());
        assert!(validate_account_name("joint-2").is_ok());
        assert!(validate_account_name("").is_err());
        assert!(validate_account_name("../etc").is_err());
        assert!(validate_account_name("a b").is_err());
    }
}
