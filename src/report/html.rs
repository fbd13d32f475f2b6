use std::fmt::Write as _;

use chrono::Utc;

use super::format::{format_secs2, success_rate_x10, totals};
use crate::error::ReportError;
use crate::runner::TestSummary;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
.header { background: #f5f5f5; padding: 20px; border-radius: 5px; margin-bottom: 20px; }
.collection { border: 1px solid #ddd; margin-bottom: 20px; border-radius: 5px; }
.collection-header { background: #f8f9fa; padding: 15px; border-bottom: 1px solid #ddd; }
.collection-name { font-size: 1.2em; font-weight: bold; margin: 0; }
.collection-stats { color: #666; margin-top: 5px; }
.test-item { padding: 10px 15px; border-bottom: 1px solid #eee; }
.test-item:last-child { border-bottom: none; }
.test-passed { border-left: 4px solid #28a745; }
.test-failed { border-left: 4px solid #dc3545; }
.test-name { font-weight: bold; }
.test-details { color: #666; margin-top: 5px; }
.error-message { color: #dc3545; font-style: italic; margin-top: 5px; }
.summary { background: #e9ecef; padding: 15px; border-radius: 5px; }
.success-rate { font-size: 1.1em; font-weight: bold; }
";

pub(super) fn render(summaries: &[TestSummary]) -> Result<String, ReportError> {
    let aggregate = totals(summaries);
    let mut output = String::new();

    writeln!(output, "<!DOCTYPE html>")?;
    writeln!(output, "<html>")?;
    writeln!(output, "<head>")?;
    writeln!(output, "    <meta charset=\"UTF-8\">")?;
    writeln!(output, "    <title>Collection Test Report</title>")?;
    writeln!(output, "    <style>\n{}    </style>", STYLE)?;
    writeln!(output, "</head>")?;
    writeln!(output, "<body>")?;
    writeln!(output, "    <div class=\"header\">")?;
    writeln!(output, "        <h1>Collection Test Report</h1>")?;
    writeln!(
        output,
        "        <p>Generated: {}</p>",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(output, "    </div>")?;

    for summary in summaries {
        writeln!(output, "    <div class=\"collection\">")?;
        writeln!(output, "        <div class=\"collection-header\">")?;
        writeln!(
            output,
            "            <h2 class=\"collection-name\">{}</h2>",
            escape_html(&summary.collection_name)
        )?;
        writeln!(output, "            <div class=\"collection-stats\">")?;
        writeln!(
            output,
            "                File: {}<br>",
            escape_html(&summary.file_path)
        )?;
        writeln!(
            output,
            "                Elapsed: {}s | {} tests | {} passed | {} failed",
            format_secs2(summary.total_time),
            summary.total_tests,
            summary.passed_tests,
            summary.failed_tests
        )?;
        writeln!(output, "            </div>")?;
        writeln!(output, "        </div>")?;

        for result in &summary.results {
            let class = if result.success { "test-passed" } else { "test-failed" };
            let status = if result.success { "PASS" } else { "FAIL" };
            writeln!(output, "        <div class=\"test-item {}\">", class)?;
            writeln!(
                output,
                "            <div class=\"test-name\">{} {}</div>",
                status,
                escape_html(&result.name)
            )?;
            writeln!(
                output,
                "            <div class=\"test-details\">{} {}<br>Response: HTTP {} ({}s)</div>",
                escape_html(&result.method),
                escape_html(&result.url),
                result.status_code,
                format_secs2(result.response_time)
            )?;
            if let Some(message) = result.error_message.as_deref() {
                writeln!(
                    output,
                    "            <div class=\"error-message\">Error: {}</div>",
                    escape_html(message)
                )?;
            }
            writeln!(output, "        </div>")?;
        }
        writeln!(output, "    </div>")?;
    }

    let rate_x10 = success_rate_x10(aggregate.passed, aggregate.tests);
    writeln!(output, "    <div class=\"summary\">")?;
    writeln!(output, "        <h3>Overall Summary</h3>")?;
    writeln!(
        output,
        "        <p>{} collections, {} tests</p>",
        aggregate.collections, aggregate.tests
    )?;
    writeln!(
        output,
        "        <p class=\"success-rate\">Success rate: {}.{}% ({} passed / {} failed)</p>",
        rate_x10 / 10,
        rate_x10 % 10,
        aggregate.passed,
        aggregate.failed
    )?;
    writeln!(output, "    </div>")?;
    writeln!(output, "</body>")?;
    writeln!(output, "</html>")?;

    Ok(output)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
