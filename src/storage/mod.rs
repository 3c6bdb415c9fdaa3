//! Storage layer for passbook
//!
//! One CSV file per account and currency. [`LedgerStore`] loads it (backing
//! it up first), seeds a fresh ledger through the operator when no file
//! exists yet, and saves it atomically, retrying while the operator frees a
//! locked file.

pub mod file_io;
pub mod ledger_csv;

pub use file_io::write_atomic;
pub use ledger_csv::{read_ledger, write_ledger, HEADER};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::backup::BackupManager;
use crate::error::{PassbookError, PassbookResult};
use crate::models::{CurrencyFormat, Ledger};
use crate::prompt::{ask_date, ask_money, Prompter};

/// How a ledger came to be in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from an existing file
    Existing,
    /// Created by the first-run seed procedure
    Seeded,
}

/// A loaded ledger plus anything the operator should be told about
#[derive(Debug, Clone)]
pub struct LoadedLedger {
    pub ledger: Ledger,
    pub source: LoadSource,
    /// Backup written during load, if any
    pub backup: Option<PathBuf>,
    /// Non-fatal problems (e.g. the backup could not be written)
    pub warnings: Vec<String>,
}

/// Reads and writes one ledger file
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
    currency: CurrencyFormat,
    backups: BackupManager,
}

impl LedgerStore {
    pub fn new(path: PathBuf, currency: CurrencyFormat, backups: BackupManager) -> Self {
        Self {
            path,
            currency,
            backups,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Parse the ledger file without side effects
    pub fn read(&self) -> PassbookResult<Ledger> {
        let file = File::open(&self.path).map_err(|e| {
            PassbookError::Io(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        read_ledger(BufReader::new(file), &self.currency)
    }

    /// Load the ledger, or seed a new one if the file does not exist
    ///
    /// An existing file is parsed first (parse errors are fatal) and then
    /// copied to its backup; a failed backup only produces a warning.
    pub fn load(&self, prompter: &mut dyn Prompter) -> PassbookResult<LoadedLedger> {
        if !self.exists() {
            let ledger = self.seed(prompter)?;
            return Ok(LoadedLedger {
                ledger,
                source: LoadSource::Seeded,
                backup: None,
                warnings: Vec::new(),
            });
        }

        let ledger = self.read()?;
        let mut warnings = Vec::new();
        let backup = match self.backups.create_backup(&self.path) {
            Ok(path) => Some(path),
            Err(e) => {
                warnings.push(format!("warning: backup not written: {}", e));
                None
            }
        };

        Ok(LoadedLedger {
            ledger,
            source: LoadSource::Existing,
            backup,
            warnings,
        })
    }

    /// First-run procedure: ask for a start date and balance, then save
    pub fn seed(&self, prompter: &mut dyn Prompter) -> PassbookResult<Ledger> {
        prompter.say("account is empty. let's initialize it!");
        let date = ask_date(prompter, "enter the date (yy-mm-dd): ")?;
        let balance = ask_money(prompter, "enter your starting balance: ", &self.currency)?;

        let ledger = Ledger::seeded(date, balance, &self.currency)?;
        self.save(&ledger, prompter)?;
        Ok(ledger)
    }

    /// Write the ledger once; a locked destination fails with `FileLocked`
    pub fn write(&self, ledger: &Ledger) -> PassbookResult<()> {
        write_atomic(&self.path, |writer| {
            write_ledger(writer, ledger, &self.currency)
        })
    }

    /// Write the ledger, asking the operator to release a locked file
    ///
    /// Retries for as long as the operator agrees. If they give up the
    /// error is returned and the in-memory ledger is untouched, so a later
    /// save can still persist it.
    pub fn save(&self, ledger: &Ledger, prompter: &mut dyn Prompter) -> PassbookResult<()> {
        save_with_retry(&self.path, prompter, || self.write(ledger))?;
        prompter.say(&format!("account info saved at {}.", self.path.display()));
        Ok(())
    }
}

fn save_with_retry<F>(path: &Path, prompter: &mut dyn Prompter, mut attempt: F) -> PassbookResult<()>
where
    F: FnMut() -> PassbookResult<()>,
{
    loop {
        match attempt() {
            Err(PassbookError::FileLocked(locked)) => {
                let retry = prompter.confirm(&format!(
                    "{} is locked by another program. close it, then retry (y/n)? ",
                    locked.display()
                ))?;
                if !retry {
                    return Err(PassbookError::FileLocked(path.to_path_buf()));
                }
            }
            other => return other,
        }
    }
}
