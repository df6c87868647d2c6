use logtally_types::Record;

/// Log parser for splitting raw lines into records
pub struct LineParser;

impl LineParser {
    /// Parse a raw log line into a Record
    ///
    /// The line is read as `date time level message...`. Returns `None` when
    /// fewer than four whitespace-delimited tokens are present.
    pub fn parse(line: &str) -> Option<Record> {
        let (date, rest) = Self::next_token(line)?;
        let (time, rest) = Self::next_token(rest)?;
        let (level, rest) = Self::next_token(rest)?;

        let message = rest.trim();
        if message.is_empty() {
            return None;
        }

        Some(Record::new(date, time, level, message))
    }

    /// Split off the first token, returning it and the text after its
    /// terminating whitespace
    fn next_token(s: &str) -> Option<(&str, &str)> {
        let s = s.trim_start();
        let end = s.find(char::is_whitespace)?;
        Some((&s[..end], &s[end..]))
    }
}
