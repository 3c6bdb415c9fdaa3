//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Every command
//! works on one ledger, picked by account and currency.

pub mod backup;
pub mod entry;
pub mod history;
pub mod report;
pub mod session;

pub use backup::{handle_backup_command, BackupCommands};
pub use entry::{handle_ledger_command, EntryArgs, LedgerCommands};
pub use history::show_history;
pub use report::{handle_report_command, ReportCommands};
pub use session::{run_session, select_ledger};

use crate::audit::AuditLogger;
use crate::backup::BackupManager;
use crate::config::paths::validate_account_name;
use crate::config::{PassbookPaths, Settings};
use crate::error::PassbookResult;
use crate::models::CurrencyFormat;
use crate::prompt::Prompter;
use crate::reports::ReportRenderer;
use crate::services::LedgerService;
use crate::storage::LedgerStore;

/// The ledger a command works on, plus where its files live
#[derive(Debug, Clone)]
pub struct LedgerContext {
    pub paths: PassbookPaths,
    pub settings: Settings,
    pub account: String,
    pub currency_code: String,
    pub currency: CurrencyFormat,
}

impl LedgerContext {
    /// Resolve account and currency, falling back to the settings defaults
    pub fn new(
        paths: PassbookPaths,
        settings: Settings,
        account: Option<String>,
        currency: Option<String>,
    ) -> PassbookResult<Self> {
        let account = account
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| settings.default_account.clone());
        let currency_code = currency
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| settings.default_currency.clone());

        validate_account_name(&account)?;
        validate_account_name(&currency_code)?;
        let currency = settings.currency(&currency_code)?.clone();

        Ok(Self {
            paths,
            settings,
            account,
            currency_code,
            currency,
        })
    }

    /// `account/currency`, as recorded in the audit log
    pub fn name(&self) -> String {
        format!("{}/{}", self.account, self.currency_code)
    }

    pub fn store(&self) -> PassbookResult<LedgerStore> {
        self.paths.ensure_account_dir(&self.account)?;
        Ok(LedgerStore::new(
            self.paths.ledger_file(&self.account, &self.currency_code),
            self.currency.clone(),
            BackupManager::new(self.settings.backup_suffix.clone()),
        ))
    }

    pub fn audit(&self) -> AuditLogger {
        AuditLogger::new(self.paths.audit_log())
    }

    /// Load the ledger, seeding it on first use
    pub fn open(&self, prompter: &mut dyn Prompter) -> PassbookResult<LedgerService> {
        let store = self.store()?;
        if let Some(file_name) = store.path().file_name() {
            prompter.say(&format!("reading account: {}", file_name.to_string_lossy()));
        }
        LedgerService::open(self.name(), store, self.audit(), prompter)
    }

    /// Renderer writing into the account directory
    pub fn renderer(&self) -> ReportRenderer {
        ReportRenderer::new(
            self.paths.account_dir(&self.account),
            self.currency_code.clone(),
            self.currency.clone(),
            self.settings.report_format,
            self.settings.report_size,
        )
    }
}
