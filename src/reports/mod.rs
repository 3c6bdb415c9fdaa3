//! Reports module for passbook
//!
//! Monthly reports break a calendar month down by tag; yearly reports show
//! the twelve monthly totals. Both split deposits from withdrawals and are
//! rendered as chart images.

pub mod aggregate;
pub mod period;
pub mod render;

pub use aggregate::{aggregate, ActionTotals, MonthlySummary, TagTotals, YearlySummary};
pub use period::{MonthPeriod, YearPeriod};
pub use render::{
    panel_title, pie_slices, report_file_name, PieSlice, ReportKind, ReportRenderer,
};
