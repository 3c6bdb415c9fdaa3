//! Ledger entry model
//!
//! One row of the ledger file: date, amount, running balance, action, tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date::EntryDate;
use super::money::Money;
use crate::error::PassbookError;

/// Tag given to the seed entry of a new ledger
pub const SEED_TAG: &str = "init deposit";

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Deposit,
    Withdraw,
}

impl Action {
    /// Stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Deposit => "deposit",
            Action::Withdraw => "withdraw",
        }
    }

    /// Accepts the stored names and the session menu codes (`1`, `2`)
    pub fn from_code(code: &str) -> Result<Self, PassbookError> {
        match code.trim().to_lowercase().as_str() {
            "1" | "deposit" => Ok(Action::Deposit),
            "2" | "withdraw" => Ok(Action::Withdraw),
            _ => Err(PassbookError::UnsupportedAction(code.trim().to_string())),
        }
    }

    /// Apply this action's amount to a balance, `None` on overflow
    pub fn apply(&self, balance: Money, amount: Money) -> Option<Money> {
        match self {
            Action::Deposit => balance.checked_add(amount),
            Action::Withdraw => balance.checked_sub(amount),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PassbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// A single ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: EntryDate,
    /// Magnitude of the transaction (never negative)
    pub amount: Money,
    /// Running balance after this entry
    pub balance: Money,
    pub action: Action,
    pub tag: String,
}

impl Entry {
    /// The zero-amount deposit that fixes a new ledger's starting balance
    pub fn seed(date: EntryDate, balance: Money) -> Self {
        Self {
            date,
            amount: Money::zero(),
            balance,
            action: Action::Deposit,
            tag: SEED_TAG.to_string(),
        }
    }
}

/// Operator-supplied fields for a new entry; the balance is computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub date: EntryDate,
    pub amount: Money,
    pub tag: String,
    pub action: Action,
}
