use regex::Regex;

use logtally_types::Record;

/// Selects the records of one level, optionally narrowed by a message pattern
#[derive(Clone)]
pub struct LevelFilter {
    /// Requested level, upper-cased for comparison
    level: String,

    /// Message pattern (if any)
    regex: Option<Regex>,
}

impl LevelFilter {
    /// Create a filter for `level`, compared case-insensitively
    pub fn new(level: &str) -> Self {
        Self {
            level: level.to_uppercase(),
            regex: None,
        }
    }

    /// Also require the message to match `pattern`
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.regex = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Also require the message to match `pattern`, ignoring case
    pub fn with_pattern_case_insensitive(mut self, pattern: &str) -> Result<Self, regex::Error> {
        // Prepend (?i) for case insensitive matching
        self.regex = Some(Regex::new(&format!("(?i){}", pattern))?);
        Ok(self)
    }

    /// Requested level as displayed in headers
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Check if a record matches this filter
    pub fn matches(&self, record: &Record) -> bool {
        if record.level().to_uppercase() != self.level {
            return false;
        }

        match &self.regex {
            Some(re) => re.is_match(record.message()),
            None => true,
        }
    }

    /// Matching records, in input order
    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

impl std::fmt::Debug for LevelFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelFilter")
            .field("level", &self.level)
            .field("pattern", &self.regex.as_ref().map(Regex::as_str))
            .finish()
    }
}
