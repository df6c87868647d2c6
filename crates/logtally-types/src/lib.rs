//! Shared types for logtally
//!
//! This crate contains the record and tally structures passed between the
//! logtally crates.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Log Types
// ============================================================================

/// Date and time layout used to build [`Record::timestamp`]
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single parsed log line
///
/// Fields are fixed at construction; there are no setters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    date: String,
    time: String,
    level: String,
    message: String,
}

impl Record {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            level: level.into(),
            message: message.into(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Level label exactly as it appeared in the source
    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Combine date and time into a timestamp, if both are in ISO form
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let joined = format!("{} {}", self.date, self.time);
        NaiveDateTime::parse_from_str(&joined, TIMESTAMP_FORMAT).ok()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.time, self.level, self.message
        )
    }
}

// ============================================================================
// Tally Types
// ============================================================================

/// Record counts per level label, kept in first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    /// Entries in insertion order
    entries: Vec<(String, usize)>,

    /// Label -> position in `entries`
    index: HashMap<String, usize>,
}

impl LevelCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to the count for `label`, appending it if unseen
    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.index.get(label).map(|&pos| self.entries[pos].1)
    }

    /// Iterate `(label, count)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}
