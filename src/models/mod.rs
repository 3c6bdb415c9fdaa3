//! Core data models for passbook
//!
//! Entries, the ledger that orders them, and the value types they are built
//! from (money, dates, currency formatting).

pub mod currency;
pub mod date;
pub mod entry;
pub mod ledger;
pub mod money;

pub use currency::CurrencyFormat;
pub use date::{DateParseError, EntryDate};
pub use entry::{Action, Entry, NewEntry, SEED_TAG};
pub use ledger::{AppendOutcome, ChainBreak, Ledger};
pub use money::{Money, MoneyParseError};
