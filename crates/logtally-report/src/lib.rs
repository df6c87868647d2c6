//! Reporting for logtally
//!
//! This crate renders level summaries and detail listings, loads the report
//! configuration, and drives a complete run over one log file.

pub mod config;
mod report;
mod table;

pub use config::{ConfigError, ReportConfig, TableConfig};
pub use report::{Report, RunSummary};
pub use table::TablePresenter;
