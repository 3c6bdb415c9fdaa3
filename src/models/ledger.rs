//! In-memory ledger: ordered entries plus the append/remove rules
//!
//! Entries are kept in insertion order. Appends must not go back in time
//! and carry the running balance forward; removal only ever takes the last
//! row and does not revisit earlier balances.

use std::fmt;

use super::currency::CurrencyFormat;
use super::date::EntryDate;
use super::entry::{Entry, NewEntry};
use super::money::Money;
use crate::error::{PassbookError, PassbookResult};

/// Ordered, never-empty list of ledger entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<Entry>,
}

/// Result of a successful append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// The entry that was added
    pub entry: Entry,
    /// Balance went below zero; allowed, but the operator should know
    pub overdrawn: bool,
}

/// First entry whose balance does not follow from its predecessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBreak {
    /// Index of the offending entry
    pub index: usize,
    /// `None` when the predecessor's balance plus this entry overflows
    pub expected: Option<Money>,
    pub found: Money,
}

impl fmt::Display for ChainBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected {
            Some(expected) => write!(
                f,
                "entry {} has balance {} but its predecessor implies {}",
                self.index, self.found, expected
            ),
            None => write!(
                f,
                "entry {} has balance {} but its predecessor overflows",
                self.index, self.found
            ),
        }
    }
}

impl Ledger {
    /// Start a new ledger with its seed entry
    pub fn seeded(
        date: EntryDate,
        starting_balance: Money,
        currency: &CurrencyFormat,
    ) -> PassbookResult<Self> {
        let balance = currency
            .round(starting_balance)
            .ok_or_else(|| out_of_range("Starting balance", starting_balance))?;
        Ok(Self {
            entries: vec![Entry::seed(date, balance)],
        })
    }

    /// Build a ledger from already-persisted entries
    pub fn from_entries(entries: Vec<Entry>) -> PassbookResult<Self> {
        if entries.is_empty() {
            return Err(PassbookError::Storage(
                "A ledger needs at least its seed entry".into(),
            ));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Current balance (balance of the last entry)
    pub fn balance(&self) -> Money {
        self.last().map(|e| e.balance).unwrap_or_default()
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> &[Entry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    /// Distinct tags in order of first appearance
    pub fn tags(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.tag.as_str()) {
                seen.push(entry.tag.as_str());
            }
        }
        seen
    }

    /// Entries dated within `[start, end]`, inclusive
    pub fn in_range(&self, start: EntryDate, end: EntryDate) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |e| e.date >= start && e.date <= end)
    }

    /// Append a deposit or withdrawal
    ///
    /// The amount is rounded to the currency's precision first so the
    /// stored amount and the balance chain agree. Nothing is modified when
    /// validation fails.
    pub fn append(
        &mut self,
        input: NewEntry,
        currency: &CurrencyFormat,
    ) -> PassbookResult<AppendOutcome> {
        let amount = currency
            .round(input.amount)
            .ok_or_else(|| out_of_range("Amount", input.amount))?;
        if !amount.is_positive() {
            return Err(PassbookError::Validation(format!(
                "Amount must be greater than zero, got {}",
                currency.format(input.amount)
            )));
        }

        let last = self
            .last()
            .ok_or_else(|| PassbookError::Storage("Ledger has no entries".into()))?;

        if input.date.sort_key() < last.date.sort_key() {
            return Err(PassbookError::Chronology {
                date: input.date.to_string(),
                last: last.date.to_string(),
            });
        }

        let balance = input.action.apply(last.balance, amount).ok_or_else(|| {
            PassbookError::Validation(format!(
                "A {} of {} would take the balance out of range",
                input.action,
                currency.format(amount)
            ))
        })?;
        let entry = Entry {
            date: input.date,
            amount,
            balance,
            action: input.action,
            tag: input.tag.trim().to_string(),
        };

        self.entries.push(entry.clone());

        Ok(AppendOutcome {
            overdrawn: balance.is_negative(),
            entry,
        })
    }

    /// Remove the most recent entry
    ///
    /// Balances of the remaining entries are not recomputed or checked.
    /// Removing the true last entry leaves a consistent chain; anything
    /// else is the caller's problem. The seed entry is never removed.
    pub fn remove_last(&mut self) -> PassbookResult<Entry> {
        if self.entries.len() <= 1 {
            return Err(PassbookError::Validation(
                "Only the seed entry is left; it cannot be removed".into(),
            ));
        }
        self.entries
            .pop()
            .ok_or_else(|| PassbookError::Storage("Ledger has no entries".into()))
    }

    /// Check every entry's balance against its predecessor
    pub fn verify_chain(&self) -> Result<(), ChainBreak> {
        for (index, pair) in self.entries.windows(2).enumerate() {
            let expected = pair[1].action.apply(pair[0].balance, pair[1].amount);
            if expected != Some(pair[1].balance) {
                return Err(ChainBreak {
                    index: index + 1,
                    expected,
                    found: pair[1].balance,
                });
            }
        }
        Ok(())
    }
}

fn out_of_range(what: &str, amount: Money) -> PassbookError {
    PassbookError::Validation(format!("{} {} is out of range", what, amount))
}
