mod csv;
mod format;
mod html;
mod json;
mod text;


pub(crate) use format::{format_secs2, success_rate_x10, totals};

use std::path::Path;

use crate::args::ReportFormat;
use crate::error::ReportError;
use crate::runner::TestSummary;

/// Renders test summaries in the configured output format.
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    #[must_use]
    pub const fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Renders the full report as one string.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or string formatting fails.
    pub fn render(&self, summaries: &[TestSummary]) -> Result<String, ReportError> {
        match self.format {
            ReportFormat::Text => text::render(summaries),
            ReportFormat::Json => json::render(summaries),
            ReportFormat::Html => html::render(summaries),
            ReportFormat::Csv => csv::render(summaries),
        }
    }

    /// Prints the report to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering fails.
    pub fn print(&self, summaries: &[TestSummary]) -> Result<(), ReportError> {
        print!("{}", self.render(summaries)?);
        Ok(())
    }

    /// Renders the report and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering or the file write fails.
    pub async fn save_to_file(
        &self,
        summaries: &[TestSummary],
        path: &Path,
    ) -> Result<(), ReportError> {
        let content = self.render(summaries)?;
        tokio::fs::write(path, content)
            .await
            .map_err(|err| ReportError::WriteOutput {
                path: path.to_path_buf(),
                source: err,
            })
    }
}
