use crate::error::ReportError;
use crate::runner::TestSummary;

pub(super) fn render(summaries: &[TestSummary]) -> Result<String, ReportError> {
    serde_json::to_string_pretty(summaries)
        .map_err(|err| ReportError::SerializeJson { source: err })
}
