use std::fmt::Write as _;

use super::format::format_secs2;
use crate::error::ReportError;
use crate::runner::TestSummary;

pub(super) fn render(summaries: &[TestSummary]) -> Result<String, ReportError> {
    let mut output = String::new();

    writeln!(output, "Detailed Test Results")?;
    writeln!(output, "{}", "=".repeat(51))?;
    writeln!(output)?;

    for (collection_index, summary) in summaries.iter().enumerate() {
        let ordinal = collection_index.saturating_add(1);
        writeln!(output, "[{}] {}", ordinal, summary.collection_name)?;
        writeln!(output, "File: {}", summary.file_path)?;
        writeln!(output, "Elapsed: {}s", format_secs2(summary.total_time))?;
        writeln!(
            output,
            "Results: {} passed, {} failed",
            summary.passed_tests, summary.failed_tests
        )?;
        writeln!(output, "{}", "-".repeat(31))?;

        for (result_index, result) in summary.results.iter().enumerate() {
            let status = if result.success { "PASS" } else { "FAIL" };
            writeln!(
                output,
                "  [{}.{}] {} {}",
                ordinal,
                result_index.saturating_add(1),
                status,
                result.name
            )?;
            writeln!(output, "        {} {}", result.method, result.url)?;
            writeln!(
                output,
                "        Response: HTTP {} ({}s)",
                result.status_code,
                format_secs2(result.response_time)
            )?;
            if let Some(message) = result.error_message.as_deref() {
                writeln!(output, "        Error: {}", message)?;
            }
            writeln!(output)?;
        }
        writeln!(output)?;
    }

    Ok(output)
}
