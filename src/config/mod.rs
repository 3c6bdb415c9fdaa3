//! Configuration module for passbook
//!
//! This module provides configuration management including:
//! - Data directory and per-account path resolution
//! - User settings persistence (currencies, defaults, report format)

pub mod paths;
pub mod settings;

pub use paths::PassbookPaths;
pub use settings::{ReportFormat, ReportSize, Settings};
