use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use logtally_types::Record;

use crate::parser::LineParser;

/// Failure to access the log source
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result of loading a log source
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Parsed records in source order
    pub records: Vec<Record>,

    /// Lines that did not yield a record
    pub rejected: usize,

    /// Set when the source could not be opened or fully read
    pub error: Option<LoadError>,
}

impl LoadOutcome {
    fn failed(error: LoadError) -> Self {
        Self {
            records: Vec::new(),
            rejected: 0,
            error: Some(error),
        }
    }
}

/// Reads a log source into an ordered record sequence
pub struct LogLoader;

impl LogLoader {
    /// Load and parse every line of the file at `path`
    ///
    /// Never fails outright: on an open or read error the outcome holds no
    /// records and carries the error instead.
    pub fn load(path: impl AsRef<Path>) -> LoadOutcome {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                let error = LoadError::from_io(path, e);
                warn!(error = %error, "failed to open log source");
                return LoadOutcome::failed(error);
            }
        };

        match Self::load_from(BufReader::new(file)) {
            Ok((records, rejected)) => {
                debug!(
                    path = %path.display(),
                    records = records.len(),
                    rejected,
                    "loaded log source"
                );
                Self::log_span(&records);
                LoadOutcome {
                    records,
                    rejected,
                    error: None,
                }
            }
            Err(e) => {
                let error = LoadError::from_io(path, e);
                warn!(error = %error, "failed to read log source");
                LoadOutcome::failed(error)
            }
        }
    }

    /// Parse every line from `reader`, returning the records and the number of
    /// lines dropped as malformed
    pub fn load_from<R: BufRead>(reader: R) -> io::Result<(Vec<Record>, usize)> {
        let mut records = Vec::new();
        let mut rejected = 0;

        for line in reader.lines() {
            match LineParser::parse(&line?) {
                Some(record) => records.push(record),
                None => rejected += 1,
            }
        }

        Ok((records, rejected))
    }

    /// Log the time span covered, when the first and last records carry
    /// readable timestamps
    fn log_span(records: &[Record]) {
        let first = records.first().and_then(Record::timestamp);
        let last = records.last().and_then(Record::timestamp);
        if let (Some(first), Some(last)) = (first, last) {
            debug!(%first, %last, "log source time span");
        }
    }
}
