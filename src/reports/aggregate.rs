//! Per-tag and per-month totals
//!
//! Aggregation partitions entries by action. Monthly summaries group by tag;
//! yearly summaries group by calendar month and always carry all twelve
//! months, zero-filled.

use std::collections::BTreeMap;

use crate::error::PassbookResult;
use crate::models::{Action, EntryDate, Ledger, Money};

use super::period::{MonthPeriod, YearPeriod};

/// Sums per key, split by action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTotals<K: Ord> {
    pub deposit: BTreeMap<K, Money>,
    pub withdraw: BTreeMap<K, Money>,
}

impl<K: Ord> ActionTotals<K> {
    pub fn new() -> Self {
        Self {
            deposit: BTreeMap::new(),
            withdraw: BTreeMap::new(),
        }
    }

    pub fn for_action(&self, action: Action) -> &BTreeMap<K, Money> {
        match action {
            Action::Deposit => &self.deposit,
            Action::Withdraw => &self.withdraw,
        }
    }

    fn for_action_mut(&mut self, action: Action) -> &mut BTreeMap<K, Money> {
        match action {
            Action::Deposit => &mut self.deposit,
            Action::Withdraw => &mut self.withdraw,
        }
    }

    /// Grand total of one partition
    pub fn total(&self, action: Action) -> Money {
        self.for_action(action).values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.deposit.is_empty() && self.withdraw.is_empty()
    }
}

/// Totals per tag
pub type TagTotals = ActionTotals<String>;

/// Sum entries dated within `[start, end]` by action and tag
///
/// Tags with no entries in the range are absent.
pub fn aggregate(ledger: &Ledger, start: EntryDate, end: EntryDate) -> TagTotals {
    let mut totals = TagTotals::new();
    for entry in ledger.in_range(start, end) {
        *totals
            .for_action_mut(entry.action)
            .entry(entry.tag.clone())
            .or_default() += entry.amount;
    }
    totals
}

/// Monthly report data: totals per tag for one calendar month
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    pub period: MonthPeriod,
    pub totals: TagTotals,
}

impl MonthlySummary {
    pub fn generate(ledger: &Ledger, period: MonthPeriod) -> PassbookResult<Self> {
        let totals = aggregate(ledger, period.start()?, period.end()?);
        Ok(Self { period, totals })
    }
}

/// Yearly report data: totals per calendar month (1-12)
#[derive(Debug, Clone)]
pub struct YearlySummary {
    pub period: YearPeriod,
    pub totals: ActionTotals<u32>,
}

impl YearlySummary {
    pub fn generate(ledger: &Ledger, period: YearPeriod) -> PassbookResult<Self> {
        let mut totals = ActionTotals::new();
        for month in 1..=12 {
            totals.deposit.insert(month, Money::zero());
            totals.withdraw.insert(month, Money::zero());
        }

        for entry in ledger.in_range(period.start()?, period.end()?) {
            *totals
                .for_action_mut(entry.action)
                .entry(entry.date.month())
                .or_default() += entry.amount;
        }

        Ok(Self { period, totals })
    }

    /// Monthly values of one partition, January first
    pub fn series(&self, action: Action) -> Vec<(u32, Money)> {
        self.totals
            .for_action(action)
            .iter()
            .map(|(month, amount)| (*month, *amount))
            .collect()
    }
}
