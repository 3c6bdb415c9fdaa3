//! Backup system for passbook
//!
//! Every time an existing ledger is loaded, it is copied to a sibling file
//! (`<ledger>.bak` by default) before anything else happens. There is only
//! ever one generation: the next load overwrites it.
//!
//! - `BackupManager`: names, creates and describes the backup
//! - `validate_backup`: parses a backup before it is restored
//!
//! # Example
//!
//! ```rust,ignore
//! use passbook::backup::BackupManager;
//!
//! let manager = BackupManager::new(".bak");
//! let backup_path = manager.create_backup(&ledger_path)?;
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{validate_backup, ValidationResult};
