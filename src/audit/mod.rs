//! Audit logging for passbook
//!
//! Every change to a ledger (an appended entry, a removed entry, a restored
//! backup) is recorded in an append-only log next to the settings file.
//!
//! - `AuditEntry`: one logged change with timestamp, ledger name and the
//!   affected entry before/after the change
//! - `AuditLogger`: writes entries as line-delimited JSON (JSONL)
//!
//! # Example
//!
//! ```rust,ignore
//! use passbook::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create("testing/won", &entry))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
