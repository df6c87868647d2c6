use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use logtally_logs::{LevelAggregator, LevelFilter, LogLoader};

use crate::config::ReportConfig;
use crate::table::TablePresenter;

/// What a single run processed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records parsed from the source
    pub records: usize,

    /// Lines dropped as malformed
    pub rejected: usize,

    /// Records listed in the detail section (None when no level was requested)
    pub matched: Option<usize>,

    /// Whether the source failed to load
    pub load_failed: bool,
}

/// Runs the load, count, filter and render stages for one log file
pub struct Report {
    aggregator: LevelAggregator,
    presenter: TablePresenter,
}

impl Report {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            aggregator: LevelAggregator::new().with_case_policy(config.case_policy()),
            presenter: TablePresenter::new(config.table),
        }
    }

    /// Print the summary table for `path`, followed by the detail listing when
    /// a filter is given
    ///
    /// A source that cannot be loaded is reported on `out` and treated as
    /// empty. Only failures writing to `out` are returned as errors.
    pub fn run<W: Write>(
        &self,
        path: &Path,
        filter: Option<&LevelFilter>,
        out: &mut W,
    ) -> Result<RunSummary> {
        let outcome = LogLoader::load(path);

        if let Some(error) = &outcome.error {
            writeln!(out, "{}", error).context("Failed to write load error")?;
        }

        let counts = self.aggregator.aggregate(&outcome.records);
        out.write_all(self.presenter.render_summary(&counts).as_bytes())
            .context("Failed to write summary table")?;

        let mut summary = RunSummary {
            records: outcome.records.len(),
            rejected: outcome.rejected,
            matched: None,
            load_failed: outcome.error.is_some(),
        };

        if let Some(filter) = filter {
            let matched = filter.filter(&outcome.records);
            debug!(level = filter.level(), matched = matched.len(), "filtered records");

            out.write_all(self.presenter.render_detail_header(filter.level()).as_bytes())
                .context("Failed to write detail header")?;
            out.write_all(self.presenter.render_detail(matched.iter().copied()).as_bytes())
                .context("Failed to write detail listing")?;

            summary.matched = Some(matched.len());
        }

        out.flush().context("Failed to flush output")?;
        Ok(summary)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SCENARIO_A: &str = "2024-01-01 10:00:00 INFO started\n\
                              2024-01-01 10:00:01 ERROR failed\n\
                              2024-01-01 10:00:02 INFO ok\n";

    fn write_log(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run(path: &Path, filter: Option<&LevelFilter>) -> (String, RunSummary) {
        let mut out = Vec::new();
        let summary = Report::default().run(path, filter, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_summary_only() {
        let file = write_log(SCENARIO_A);
        let (out, summary) = run(file.path(), None);

        assert_eq!(
            out,
            " Level              | Count      \n\
             --------------------|------------\n \
             INFO               | 2          \n \
             ERROR              | 1          \n"
        );
        assert_eq!(summary.records, 3);
        assert_eq!(summary.matched, None);
        assert!(!summary.load_failed);
    }

    #[test]
    fn test_summary_with_detail_for_lowercase_level() {
        let file = write_log(SCENARIO_A);
        let filter = LevelFilter::new("error");
        let (out, summary) = run(file.path(), Some(&filter));

        assert!(out.ends_with(
            "\nLog details for level ERROR:\n2024-01-01 10:00:01 ERROR failed\n"
        ));
        assert_eq!(summary.matched, Some(1));
    }

    #[test]
    fn test_malformed_only_source() {
        let file = write_log("bad line\n");
        let (out, summary) = run(file.path(), None);

        assert_eq!(out.lines().count(), 2);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.rejected, 1);
        assert!(!summary.load_failed);
    }

    #[test]
    fn test_missing_source_degrades_to_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.log");
        let filter = LevelFilter::new("info");
        let (out, summary) = run(&path, Some(&filter));

        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("File '"));
        assert!(lines[0].ends_with("absent.log' not found."));
        assert_eq!(lines[1], " Level              | Count      ");
        assert_eq!(lines[2], "--------------------|------------");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Log details for level INFO:");
        assert_eq!(lines.len(), 5);
        assert!(summary.load_failed);
        assert_eq!(summary.matched, Some(0));
    }

    #[test]
    fn test_fold_case_config() {
        let file = write_log(
            "2024-01-01 10:00:00 info a\n2024-01-01 10:00:01 INFO b\n2024-01-01 10:00:02 Warn c\n",
        );
        let report = Report::new(ReportConfig {
            fold_case: true,
            ..ReportConfig::default()
        });
        let mut out = Vec::new();
        report.run(file.path(), None, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let rows: Vec<_> = out.lines().skip(2).collect();
        assert_eq!(
            rows,
            vec![" INFO               | 2          ", " WARN               | 1          "]
        );
    }

    #[test]
    fn test_grep_narrows_detail_only() {
        let file = write_log(SCENARIO_A);
        let filter = LevelFilter::new("INFO").with_pattern("^ok").unwrap();
        let (out, summary) = run(file.path(), Some(&filter));

        assert!(out.contains(" INFO               | 2          "));
        assert!(out.ends_with("Log details for level INFO:\n2024-01-01 10:00:02 INFO ok\n"));
        assert_eq!(summary.matched, Some(1));
    }
}
