//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Entry, Ledger};

/// Types of ledger changes that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// An entry was appended
    Create,
    /// The last entry was removed
    Delete,
    /// The ledger was replaced by its backup
    Restore,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Restore => write!(f, "RESTORE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change happened (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Ledger affected, as `account/currency`
    pub ledger: String,

    /// Date of the affected entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,

    /// JSON of the state before the change (deletes and restores)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON of the state after the change (creates and restores)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// An entry was appended to `ledger`
    pub fn create(ledger: impl Into<String>, entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            ledger: ledger.into(),
            entry_date: Some(entry.date.to_string()),
            before: None,
            after: serde_json::to_value(entry).ok(),
        }
    }

    /// The last entry of `ledger` was removed
    pub fn delete(ledger: impl Into<String>, entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            ledger: ledger.into(),
            entry_date: Some(entry.date.to_string()),
            before: serde_json::to_value(entry).ok(),
            after: None,
        }
    }

    /// `ledger` was restored from its backup; only the summaries are kept
    pub fn restore(ledger: impl Into<String>, before: &Ledger, after: &Ledger) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Restore,
            ledger: ledger.into(),
            entry_date: None,
            before: Some(ledger_summary(before)),
            after: Some(ledger_summary(after)),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.ledger
        );

        if let Some(date) = &self.entry_date {
            output.push_str(&format!(" ({})", date));
        }

        output
    }
}

fn ledger_summary(ledger: &Ledger) -> serde_json::Value {
    serde_json::json!({
        "entries": ledger.len(),
        "balance": ledger.balance(),
    })
}
