//! Backup manager for passbook
//!
//! Keeps exactly one backup per ledger: a sibling file named after the
//! ledger plus a fixed suffix. Each new backup overwrites the previous one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{PassbookError, PassbookResult};

/// Metadata about a ledger's backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Full path to the backup
    pub path: PathBuf,
    /// Last modification time
    pub modified_at: Option<DateTime<Local>>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Creates and locates single-generation ledger backups
#[derive(Debug, Clone)]
pub struct BackupManager {
    suffix: String,
}

impl BackupManager {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Backup path for a ledger, e.g. `ledger.csv` -> `ledger.csv.bak`
    pub fn backup_path(&self, ledger_path: &Path) -> PathBuf {
        let mut name = ledger_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(&self.suffix);
        ledger_path.with_file_name(name)
    }

    /// Copy the ledger over its backup
    ///
    /// Returns the path to the backup file.
    pub fn create_backup(&self, ledger_path: &Path) -> PassbookResult<PathBuf> {
        let backup_path = self.backup_path(ledger_path);
        fs::copy(ledger_path, &backup_path).map_err(|e| {
            PassbookError::Io(format!(
                "Failed to back up {} to {}: {}",
                ledger_path.display(),
                backup_path.display(),
                e
            ))
        })?;
        Ok(backup_path)
    }

    /// Describe the current backup, if one exists
    pub fn info(&self, ledger_path: &Path) -> Option<BackupInfo> {
        let path = self.backup_path(ledger_path);
        let metadata = fs::metadata(&path).ok()?;
        Some(BackupInfo {
            modified_at: metadata.modified().ok().map(DateTime::<Local>::from),
            size_bytes: metadata.len(),
            path,
        })
    }
}
