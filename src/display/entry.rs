//! Ledger entry display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{AppendOutcome, ChainBreak, CurrencyFormat, Entry, Money};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "AMT")]
    amount: String,
    #[tabled(rename = "BAL")]
    balance: String,
    #[tabled(rename = "ACTION")]
    action: String,
    #[tabled(rename = "TAG")]
    tag: String,
}

impl EntryRow {
    fn new(entry: &Entry, currency: &CurrencyFormat) -> Self {
        Self {
            date: entry.date.to_string(),
            amount: currency.format(entry.amount),
            balance: currency.format(entry.balance),
            action: entry.action.to_string(),
            tag: entry.tag.clone(),
        }
    }
}

/// Format entries as a table, oldest first
pub fn format_entry_table(entries: &[Entry], currency: &CurrencyFormat) -> String {
    if entries.is_empty() {
        return "No entries.\n".to_string();
    }

    let rows = entries.iter().map(|e| EntryRow::new(e, currency));
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Numbered list of distinct tags
pub fn format_tag_list(tags: &[&str]) -> String {
    if tags.is_empty() {
        return "No tags yet.\n".to_string();
    }

    let mut output = String::from("tags used so far:\n");
    for (i, tag) in tags.iter().enumerate() {
        output.push_str(&format!("{:>3}. {}\n", i + 1, tag));
    }
    output
}

/// One-line confirmation of an appended entry
pub fn format_append_outcome(outcome: &AppendOutcome, currency: &CurrencyFormat) -> String {
    let entry = &outcome.entry;
    format!(
        "{} {} ({}) on {}. balance: {}",
        entry.action,
        currency.format_with_symbol(entry.amount),
        entry.tag,
        entry.date,
        currency.format_with_symbol(entry.balance)
    )
}

pub fn overdraft_warning(balance: Money, currency: &CurrencyFormat) -> String {
    format!(
        "warning: balance is negative ({})",
        currency.format_with_symbol(balance)
    )
}

/// Result of a balance chain check
pub fn format_chain_check(
    result: &Result<(), ChainBreak>,
    entry_count: usize,
    currency: &CurrencyFormat,
) -> String {
    match result {
        Ok(()) => format!("balance chain consistent across {} entries", entry_count),
        Err(brk) => format!(
            "balance chain broken at entry {}: found {}, expected {}",
            brk.index,
            currency.format(brk.found),
            brk.expected
                .map(|expected| currency.format(expected))
                .unwrap_or_else(|| "an out-of-range balance".to_string())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, EntryDate};

    fn seed() -> Entry {
        Entry::seed(EntryDate::parse("25-01-01").unwrap(), Money::from_cents(100000))
    }

    #[test]
    fn test_entry_table() {
        let usd = CurrencyFormat::usd();
        let table = format_entry_table(&[seed()], &usd);

        assert!(table.contains("DATE"));
        assert!(table.contains("TAG"));
        assert!(table.contains("25-01-01"));
        assert!(table.contains("1,000.00"));
        assert!(table.contains("init deposit"));
    }

    #[test]
    fn test_entry_table_empty() {
        assert_eq!(
            format_entry_table(&[], &CurrencyFormat::usd()),
            "No entries.\n"
        );
    }

    #[test]
    fn test_tag_list() {
        let list = format_tag_list(&["init deposit", "rent"]);
        assert!(list.contains("  1. init deposit\n"));
        assert!(list.contains("  2. rent\n"));
    }

    #[test]
    fn test_append_outcome() {
        let usd = CurrencyFormat::usd();
        let outcome = AppendOutcome {
            entry: Entry {
                date: EntryDate::parse("25-01-10").unwrap(),
                amount: Money::from_cents(200000),
                balance: Money::from_cents(-50000),
                action: Action::Withdraw,
                tag: "rent".into(),
            },
            overdrawn: true,
        };

        assert_eq!(
            format_append_outcome(&outcome, &usd),
            "withdraw $2,000.00 (rent) on 25-01-10. balance: -$500.00"
        );
        assert_eq!(
            overdraft_warning(outcome.entry.balance, &usd),
            "warning: balance is negative (-$500.00)"
        );
    }

    #[test]
    fn test_chain_check() {
        let usd = CurrencyFormat::usd();
        assert_eq!(
            format_chain_check(&Ok(()), 3, &usd),
            "balance chain consistent across 3 entries"
        );
        let broken = Err(ChainBreak {
            index: 2,
            expected: Some(Money::from_cents(150000)),
            found: Money::from_cents(100),
        });
        assert_eq!(
            format_chain_check(&broken, 3, &usd),
            "balance chain broken at entry 2: found 1.00, expected 1,500.00"
        );
    }
}
