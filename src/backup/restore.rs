//! Backup validation for restore
//!
//! A backup is only restored if it parses as a ledger in the account's
//! currency; the restored ledger is then saved through the normal store path.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::manager::BackupManager;
use crate::error::{PassbookError, PassbookResult};
use crate::models::{CurrencyFormat, Ledger};
use crate::storage::ledger_csv::read_ledger;

/// Summary of a validated backup
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Parsed ledger held by the backup
    pub ledger: Ledger,
    /// Whether the balance chain in the backup is consistent
    pub chain_ok: bool,
}

impl ValidationResult {
    pub fn summary(&self) -> String {
        let chain = if self.chain_ok { "consistent" } else { "inconsistent" };
        format!(
            "{} entries, balance chain {}",
            self.ledger.len(),
            chain
        )
    }
}

/// Parse the backup of `ledger_path`
pub fn validate_backup(
    manager: &BackupManager,
    ledger_path: &Path,
    currency: &CurrencyFormat,
) -> PassbookResult<ValidationResult> {
    let backup_path = manager.backup_path(ledger_path);
    if !backup_path.exists() {
        return Err(PassbookError::Storage(format!(
            "No backup found at {}",
            backup_path.display()
        )));
    }

    let file = File::open(&backup_path).map_err(|e| {
        PassbookError::Io(format!("Failed to open {}: {}", backup_path.display(), e))
    })?;
    let ledger = read_ledger(BufReader::new(file), currency)?;
    let chain_ok = ledger.verify_chain().is_ok();

    Ok(ValidationResult { ledger, chain_ok })
}
