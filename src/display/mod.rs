//! Display formatting for terminal output
//!
//! Turns ledger entries and report summaries into text for the terminal.

pub mod entry;
pub mod report;

pub use entry::{
    format_append_outcome, format_chain_check, format_entry_table, format_tag_list,
    overdraft_warning,
};
pub use report::{format_monthly_summary, format_yearly_summary};
