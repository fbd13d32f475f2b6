use std::fmt::Write as _;

use super::format::format_secs3;
use crate::error::ReportError;
use crate::runner::TestSummary;

const HEADER_ROW: &str =
    "Collection,FilePath,TestName,Method,URL,StatusCode,Success,ResponseTime,ErrorMessage";

pub(super) fn render(summaries: &[TestSummary]) -> Result<String, ReportError> {
    let mut output = String::new();

    // UTF-8 BOM keeps spreadsheet imports from mangling non-ASCII names.
    output.push('\u{feff}');
    writeln!(output, "{}", HEADER_ROW)?;

    for summary in summaries {
        for result in &summary.results {
            writeln!(
                output,
                "{},{},{},{},{},{},{},{},{}",
                escape_field(&summary.collection_name),
                escape_field(&summary.file_path),
                escape_field(&result.name),
                escape_field(&result.method),
                escape_field(&result.url),
                result.status_code,
                result.success,
                format_secs3(result.response_time),
                escape_field(result.error_message.as_deref().unwrap_or_default()),
            )?;
        }
    }

    Ok(output)
}

fn escape_field(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        let doubled = value.replace('"', "\"\"");
        return format!("\"{}\"", doubled);
    }
    value.to_owned()
}
