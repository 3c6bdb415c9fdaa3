//! passbook - personal bank-account ledger
//!
//! Records deposits and withdrawals in a CSV file per account and currency,
//! keeps the running balance, and renders monthly and yearly chart reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, dates, entries, the ledger)
//! - `prompt`: Operator input boundary
//! - `storage`: CSV ledger storage
//! - `backup`: Single-generation ledger backups
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `reports`: Aggregation and chart rendering
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive session
//!
//! # Example
//!
//! ```rust,ignore
//! use passbook::config::{PassbookPaths, Settings};
//!
//! let paths = PassbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod prompt;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::PassbookError;
