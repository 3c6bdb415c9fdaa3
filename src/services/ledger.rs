//! Ledger service
//!
//! Owns one loaded ledger and applies the operator's requests to it:
//! every mutation is validated first, then persisted, then audited.

use crate::audit::{AuditEntry, AuditLogger};
use crate::backup::{validate_backup, ValidationResult};
use crate::error::{PassbookError, PassbookResult};
use crate::models::{
    Action, AppendOutcome, ChainBreak, CurrencyFormat, Entry, EntryDate, Ledger, NewEntry,
};
use crate::prompt::{ask_date, ask_positive_money, parse_positive_money, Prompter};
use crate::reports::{MonthPeriod, MonthlySummary, YearPeriod, YearlySummary};
use crate::storage::{LedgerStore, LoadSource};

/// Entry fields supplied up front; anything missing is asked for
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub tag: Option<String>,
}

/// Service for one account/currency ledger
pub struct LedgerService {
    name: String,
    store: LedgerStore,
    audit: AuditLogger,
    ledger: Ledger,
    source: LoadSource,
}

impl LedgerService {
    /// Load (or seed) the ledger behind `store`
    ///
    /// Load warnings, such as a failed backup, are passed to the operator.
    pub fn open(
        name: impl Into<String>,
        store: LedgerStore,
        audit: AuditLogger,
        prompter: &mut dyn Prompter,
    ) -> PassbookResult<Self> {
        let loaded = store.load(prompter)?;
        for warning in &loaded.warnings {
            prompter.say(warning);
        }

        Ok(Self {
            name: name.into(),
            store,
            audit,
            ledger: loaded.ledger,
            source: loaded.source,
        })
    }

    /// Ledger name as recorded in the audit log (`account/currency`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn currency(&self) -> &CurrencyFormat {
        self.store.currency()
    }

    /// Whether this session created the ledger
    pub fn was_seeded(&self) -> bool {
        self.source == LoadSource::Seeded
    }

    /// Record a deposit or withdrawal
    ///
    /// `action` is `deposit`/`withdraw` or the menu codes `1`/`2` and is
    /// checked before anything is asked. The entry is saved and audited
    /// once appended; a negative balance is reported through the outcome.
    pub fn add_entry(
        &mut self,
        action: &str,
        input: EntryInput,
        prompter: &mut dyn Prompter,
    ) -> PassbookResult<AppendOutcome> {
        let action = Action::from_code(action)?;
        let currency = self.store.currency().clone();

        let date = match input.date {
            Some(raw) => {
                EntryDate::parse(&raw).map_err(|e| PassbookError::Validation(e.to_string()))?
            }
            None => ask_date(prompter, "enter the date (yy-mm-dd): ")?,
        };
        let amount = match input.amount {
            Some(raw) => parse_positive_money(&raw, &currency)?,
            None => ask_positive_money(prompter, "enter the amount: ", &currency)?,
        };
        let tag = match input.tag {
            Some(tag) => tag,
            None => prompter.ask("enter a tag: ")?,
        };

        let outcome = self.ledger.append(
            NewEntry {
                date,
                amount,
                tag,
                action,
            },
            &currency,
        )?;

        self.store.save(&self.ledger, prompter)?;
        self.record(AuditEntry::create(&self.name, &outcome.entry), prompter);

        Ok(outcome)
    }

    /// Remove the most recent entry after confirmation
    ///
    /// Returns `None` when the operator declines. Earlier balances are not
    /// recomputed.
    pub fn remove_last(
        &mut self,
        prompter: &mut dyn Prompter,
        skip_confirm: bool,
    ) -> PassbookResult<Option<Entry>> {
        if self.ledger.len() <= 1 {
            return Err(PassbookError::Validation(
                "Only the seed entry is left; it cannot be removed".into(),
            ));
        }

        if !skip_confirm && !prompter.confirm("proceed with removing the last row (y/n)? ")? {
            prompter.say("no entries were removed.");
            return Ok(None);
        }

        let removed = self.ledger.remove_last()?;
        self.store.save(&self.ledger, prompter)?;
        self.record(AuditEntry::delete(&self.name, &removed), prompter);

        Ok(Some(removed))
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> &[Entry] {
        self.ledger.recent(count)
    }

    /// Distinct tags in order of first appearance
    pub fn tags(&self) -> Vec<&str> {
        self.ledger.tags()
    }

    pub fn verify(&self) -> Result<(), ChainBreak> {
        self.ledger.verify_chain()
    }

    pub fn monthly_summary(&self, period: MonthPeriod) -> PassbookResult<MonthlySummary> {
        MonthlySummary::generate(&self.ledger, period)
    }

    pub fn yearly_summary(&self, period: YearPeriod) -> PassbookResult<YearlySummary> {
        YearlySummary::generate(&self.ledger, period)
    }

    fn record(&self, entry: AuditEntry, prompter: &mut dyn Prompter) {
        if let Err(e) = self.audit.log(&entry) {
            prompter.say(&format!("warning: audit log not written: {}", e));
        }
    }
}

/// Replace a ledger file with its backup
///
/// Runs without loading the ledger first, since loading refreshes the
/// backup from the current file. The backup must parse; the current file
/// may be missing or broken.
pub fn restore_backup(
    name: &str,
    store: &LedgerStore,
    audit: &AuditLogger,
    prompter: &mut dyn Prompter,
) -> PassbookResult<ValidationResult> {
    let validated = validate_backup(store.backups(), store.path(), store.currency())?;
    let previous = store.read().ok();

    store.save(&validated.ledger, prompter)?;

    if let Some(previous) = previous {
        let entry = AuditEntry::restore(name, &previous, &validated.ledger);
        if let Err(e) = audit.log(&entry) {
            prompter.say(&format!("warning: audit log not written: {}", e));
        }
    }

    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::backup::BackupManager;
    use crate::models::Money;
    use crate::prompt::ScriptedPrompter;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> LedgerStore {
        LedgerStore::new(
            dir.path().join("bank_account_testing_usd.csv"),
            CurrencyFormat::usd(),
            BackupManager::new(".bak"),
        )
    }

    fn audit_in(dir: &TempDir) -> AuditLogger {
        AuditLogger::new(dir.path().join("audit.log"))
    }

    /// Ledger seeded on 25-01-01 with 1,000.00
    fn open_seeded(dir: &TempDir) -> LedgerService {
        let mut prompter = ScriptedPrompter::new(["25-01-01", "1000"]);
        LedgerService::open("testing/usd", store_in(dir), audit_in(dir), &mut prompter).unwrap()
    }

    fn input(date: &str, amount: &str, tag: &str) -> EntryInput {
        EntryInput {
            date: Some(date.into()),
            amount: Some(amount.into()),
            tag: Some(tag.into()),
        }
    }

    #[test]
    fn test_open_seeds_new_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let service = open_seeded(&temp_dir);

        assert!(service.was_seeded());
        assert_eq!(service.ledger().len(), 1);
        assert!(service.store().exists());
    }

    #[test]
    fn test_deposit_then_overdraw() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let mut prompter = ScriptedPrompter::default();

        let deposit = service
            .add_entry("deposit", input("25-01-05", "500", "salary"), &mut prompter)
            .unwrap();
        assert_eq!(deposit.entry.balance.cents(), 150000);
        assert!(!deposit.overdrawn);

        let withdraw = service
            .add_entry("2", input("25-01-10", "2,000", "rent"), &mut prompter)
            .unwrap();
        assert_eq!(withdraw.entry.balance.cents(), -50000);
        assert!(withdraw.overdrawn);

        let on_disk = service.store().read().unwrap();
        assert_eq!(&on_disk, service.ledger());

        let audit = audit_in(&temp_dir).read_all().unwrap();
        assert_eq!(audit.len(), 2);
        assert!(audit.iter().all(|e| e.operation == Operation::Create));
    }

    #[test]
    fn test_missing_fields_are_prompted() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let mut prompter = ScriptedPrompter::new(["25-02-01", "12.50", "coffee"]);

        let outcome = service
            .add_entry("withdraw", EntryInput::default(), &mut prompter)
            .unwrap();

        assert_eq!(
            prompter.prompts,
            vec!["enter the date (yy-mm-dd): ", "enter the amount: ", "enter a tag: "]
        );
        assert_eq!(outcome.entry.amount, Money::from_cents(1250));
        assert_eq!(outcome.entry.tag, "coffee");
    }

    #[test]
    fn test_unsupported_action_asks_nothing_and_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let before = service.ledger().clone();
        let mut prompter = ScriptedPrompter::default();

        let err = service
            .add_entry("transfer", EntryInput::default(), &mut prompter)
            .unwrap_err();

        assert!(matches!(err, PassbookError::UnsupportedAction(_)));
        assert!(prompter.prompts.is_empty());
        assert_eq!(service.ledger(), &before);
    }

    #[test]
    fn test_earlier_date_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let before = fs::read_to_string(service.store().path()).unwrap();

        let err = service
            .add_entry(
                "deposit",
                input("24-12-31", "10", "late"),
                &mut ScriptedPrompter::default(),
            )
            .unwrap_err();

        assert!(err.is_chronology());
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(fs::read_to_string(service.store().path()).unwrap(), before);
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);

        let err = service
            .add_entry(
                "deposit",
                input("25-01-02", "-5", "oops"),
                &mut ScriptedPrompter::default(),
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_remove_last_confirmed() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let mut prompter = ScriptedPrompter::new(["y"]);
        service
            .add_entry("1", input("25-01-05", "500", "salary"), &mut prompter)
            .unwrap();

        let removed = service.remove_last(&mut prompter, false).unwrap().unwrap();

        assert_eq!(removed.tag, "salary");
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(service.store().read().unwrap().len(), 1);
        let audit = audit_in(&temp_dir).read_recent(1).unwrap();
        assert_eq!(audit[0].operation, Operation::Delete);
    }

    #[test]
    fn test_remove_last_declined() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let mut prompter = ScriptedPrompter::new(["n"]);
        service
            .add_entry("1", input("25-01-05", "500", "salary"), &mut prompter)
            .unwrap();

        assert!(service.remove_last(&mut prompter, false).unwrap().is_none());
        assert_eq!(service.ledger().len(), 2);
        assert!(prompter
            .messages
            .contains(&"no entries were removed.".to_string()));
    }

    #[test]
    fn test_remove_last_keeps_seed() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let mut prompter = ScriptedPrompter::default();

        assert!(service
            .remove_last(&mut prompter, true)
            .unwrap_err()
            .is_validation());
        assert!(prompter.prompts.is_empty());
    }

    #[test]
    fn test_reopen_reads_saved_entries() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = open_seeded(&temp_dir);
        let mut prompter = ScriptedPrompter::default();
        service
            .add_entry("1", input("25-01-05", "500", "salary"), &mut prompter)
            .unwrap();
        service
            .add_entry("2", input("25-01-06", "20", "food"), &mut prompter)
            .unwrap();

        let reopened = LedgerService::open(
            "testing/usd",
            store_in(&temp_dir),
            audit_in(&temp_dir),
            &mut prompter,
        )
        .unwrap();

        assert!(!reopened.was_seeded());
        assert_eq!(reopened.ledger(), service.ledger());
        assert_eq!(reopened.tags(), vec!["init deposit", "salary", "food"]);
        assert!(reopened.verify().is_ok());
    }

    #[test]
    fn test_restore_backup() {
        let temp_dir = TempDir::new().unwrap();
        open_seeded(&temp_dir);
        let mut prompter = ScriptedPrompter::default();

        // Reopening backs up the seed-only ledger
        let mut service = LedgerService::open(
            "testing/usd",
            store_in(&temp_dir),
            audit_in(&temp_dir),
            &mut prompter,
        )
        .unwrap();
        service
            .add_entry("1", input("25-01-05", "500", "salary"), &mut prompter)
            .unwrap();
        assert_eq!(service.store().read().unwrap().len(), 2);

        let store = store_in(&temp_dir);
        let audit = audit_in(&temp_dir);
        let result = restore_backup("testing/usd", &store, &audit, &mut prompter).unwrap();

        assert_eq!(result.ledger.len(), 1);
        assert!(result.chain_ok);
        assert_eq!(store.read().unwrap().len(), 1);
        let last = audit.read_recent(1).unwrap();
        assert_eq!(last[0].operation, Operation::Restore);
    }

    #[test]
    fn test_restore_without_backup_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let err = restore_backup(
            "testing/usd",
            &store,
            &audit_in(&temp_dir),
            &mut ScriptedPrompter::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PassbookError::Storage(_)));
    }
}
