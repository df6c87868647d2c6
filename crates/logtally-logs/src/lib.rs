//! Log processing for logtally
//!
//! This crate provides line parsing, file loading, per-level counting and
//! level filtering.

mod counts;
mod filter;
mod loader;
mod parser;

pub use counts::{CasePolicy, LevelAggregator};
pub use filter::LevelFilter;
pub use loader::{LoadError, LoadOutcome, LogLoader};
pub use parser::LineParser;

// Re-export types used in our public API
pub use logtally_types::{LevelCounts, Record};
