use std::num::NonZeroUsize;
use std::time::Duration;

use clap::Parser;

use super::defaults::{DEFAULT_COLLECTIONS_DIR, DEFAULT_TIMEOUT};
use super::parsers::parse_duration_arg;
use super::types::ReportFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Postman collection test runner for CI - parallel file execution, ordered per-collection results, and text/JSON/HTML/CSV reports."
)]
pub struct RunnerArgs {
    /// Directory scanned recursively for collection files (*.json)
    #[arg(long, short = 'd')]
    pub dir: Option<String>,

    /// Single collection file (takes precedence over --dir)
    #[arg(long, short = 'f')]
    pub file: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Report format
    #[arg(long, ignore_case = true)]
    pub format: Option<ReportFormat>,

    /// Number of collection files processed concurrently
    #[arg(long, short = 'p')]
    pub parallel: Option<NonZeroUsize>,

    /// Per-request timeout (supports ms/s/m/h; plain numbers are seconds)
    #[arg(long, value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Config file path (.toml or .json)
    #[arg(long)]
    pub config: Option<String>,
}

impl RunnerArgs {
    #[must_use]
    pub fn collections_dir(&self) -> &str {
        self.dir.as_deref().unwrap_or(DEFAULT_COLLECTIONS_DIR)
    }

    #[must_use]
    pub fn report_format(&self) -> ReportFormat {
        self.format.unwrap_or(ReportFormat::Text)
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.parallel.map_or(1, NonZeroUsize::get)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}
