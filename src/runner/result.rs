use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one executed leaf request. Produced exactly once per leaf
/// and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub name: String,
    pub method: String,
    pub url: String,
    pub status_code: u16,
    #[serde(rename = "response_time_ms", with = "duration_millis")]
    pub response_time: Duration,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub response_body: String,
    pub request_headers: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

/// Aggregated outcomes for one collection run.
///
/// `results` keeps the depth-first document order of the source tree;
/// the counters are derived from it once, after traversal completes.
#[derive(Debug, Clone, Serialize)]
pub struct TestSummary {
    pub collection_name: String,
    pub file_path: String,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    #[serde(rename = "total_time_ms", with = "duration_millis")]
    pub total_time: Duration,
    pub results: Vec<TestResult>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TestSummary {
    #[must_use]
    pub fn new(
        collection_name: String,
        file_path: &Path,
        results: Vec<TestResult>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        total_time: Duration,
    ) -> Self {
        let total_tests = results.len();
        let passed_tests = results.iter().filter(|result| result.success).count();
        let failed_tests = total_tests.saturating_sub(passed_tests);

        Self {
            collection_name,
            file_path: file_path.display().to_string(),
            total_tests,
            passed_tests,
            failed_tests,
            total_time,
            results,
            start_time,
            end_time,
        }
    }
}

pub(crate) mod duration_millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }
}
