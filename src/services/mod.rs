//! Service layer for passbook
//!
//! Business logic on top of the storage layer: validation, persistence
//! after each mutation, and audit logging.

pub mod ledger;

pub use ledger::{restore_backup, EntryInput, LedgerService};
