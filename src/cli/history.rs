//! Audit history command
//!
//! Prints the most recent audit log entries for the selected ledger.

use super::LedgerContext;
use crate::audit::{AuditEntry, AuditLogger};
use crate::error::PassbookResult;

/// Print the last `count` changes to the selected ledger (or every ledger)
pub fn show_history(ctx: &LedgerContext, count: usize, all: bool) -> PassbookResult<()> {
    let logger = ctx.audit();
    let name = ctx.name();
    let entries = recent_changes(&logger, (!all).then_some(name.as_str()), count)?;

    if entries.is_empty() {
        println!("No recorded changes.");
        return Ok(());
    }

    let scope = if all { "all ledgers".to_string() } else { name };
    println!(
        "Last {} change(s) for {} ({} in the audit log)",
        entries.len(),
        scope,
        logger.entry_count()?
    );
    for entry in &entries {
        println!("  {}", entry.format_human_readable());
    }
    Ok(())
}

/// The last `count` audit entries, optionally limited to one ledger
pub fn recent_changes(
    logger: &AuditLogger,
    ledger: Option<&str>,
    count: usize,
) -> PassbookResult<Vec<AuditEntry>> {
    let Some(ledger) = ledger else {
        return logger.read_recent(count);
    };

    let mut entries: Vec<AuditEntry> = logger
        .read_all()?
        .into_iter()
        .filter(|e| e.ledger == ledger)
        .collect();
    let start = entries.len().saturating_sub(count);
    Ok(entries.split_off(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, EntryDate, Money};
    use tempfile::TempDir;

    fn entry_on(day: u32) -> Entry {
        Entry::seed(EntryDate::from_ymd(25, 1, day).unwrap(), Money::from_cents(100))
    }

    #[test]
    fn test_recent_changes_filters_by_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        for day in 1..=4 {
            let ledger = if day % 2 == 0 { "testing/usd" } else { "testing/won" };
            logger.log(&AuditEntry::create(ledger, &entry_on(day))).unwrap();
        }

        let usd = recent_changes(&logger, Some("testing/usd"), 10).unwrap();
        assert_eq!(usd.len(), 2);
        assert!(usd.iter().all(|e| e.ledger == "testing/usd"));

        let last = recent_changes(&logger, Some("testing/won"), 1).unwrap();
        assert_eq!(last[0].entry_date.as_deref(), Some("25-01-03"));

        assert_eq!(recent_changes(&logger, None, 3).unwrap().len(), 3);
    }
}
