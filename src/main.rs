use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use logtally_logs::LevelFilter;
use logtally_report::{Report, ReportConfig};

/// Logtally - count and filter plain-text log records by severity level
#[derive(Parser, Debug)]
#[command(name = "logtally")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log file to read (lines of `date time level message...`)
    #[arg(value_name = "LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Level to list in detail after the summary (case-insensitive)
    #[arg(value_name = "LEVEL")]
    level: Option<String>,

    /// TOML file with table layout and counting options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only list detail records whose message matches this regex
    #[arg(long, value_name = "PATTERN", requires = "level")]
    grep: Option<String>,

    /// Match the --grep pattern case-insensitively
    #[arg(short = 'i', long, requires = "grep")]
    ignore_case: bool,

    /// Count level labels case-insensitively (INFO and info share a row)
    #[arg(long)]
    fold_case: bool,

    /// Emit debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries the report
    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(io::stderr)
        .init();

    match run_app(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

impl Args {
    /// Log file to report on, or None when only usage should be printed
    fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Requested detail level; an empty argument counts as no level
    fn level(&self) -> Option<&str> {
        self.level.as_deref().filter(|level| !level.is_empty())
    }

    /// Config file (or defaults) with command-line overrides applied
    fn report_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };
        if self.fold_case {
            config.fold_case = true;
        }
        Ok(config)
    }

    fn filter(&self) -> Result<Option<LevelFilter>> {
        self.level()
            .map(|level| build_filter(level, self.grep.as_deref(), self.ignore_case))
            .transpose()
    }
}

fn run_app(args: Args) -> Result<()> {
    let Some(log_file) = args.log_file() else {
        println!("{}", Args::command().render_usage());
        return Ok(());
    };

    let config = args.report_config()?;
    let filter = args.filter()?;

    let report = Report::new(config);
    let mut out = io::stdout().lock();
    let summary = report.run(log_file, filter.as_ref(), &mut out)?;

    tracing::debug!(
        records = summary.records,
        rejected = summary.rejected,
        matched = ?summary.matched,
        load_failed = summary.load_failed,
        "run complete"
    );

    Ok(())
}

fn build_filter(level: &str, grep: Option<&str>, ignore_case: bool) -> Result<LevelFilter> {
    let filter = LevelFilter::new(level);
    let Some(pattern) = grep else {
        return Ok(filter);
    };

    let filter = if ignore_case {
        filter.with_pattern_case_insensitive(pattern)
    } else {
        filter.with_pattern(pattern)
    };
    filter.with_context(|| format!("Invalid --grep pattern '{}'", pattern))
}
