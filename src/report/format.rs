use std::time::Duration;

use crate::runner::TestSummary;

/// Cross-collection aggregate counts.
pub(crate) struct Totals {
    pub(crate) collections: usize,
    pub(crate) passing_collections: usize,
    pub(crate) tests: usize,
    pub(crate) passed: usize,
    pub(crate) failed: usize,
}

pub(crate) fn totals(summaries: &[TestSummary]) -> Totals {
    let mut aggregate = Totals {
        collections: summaries.len(),
        passing_collections: 0,
        tests: 0,
        passed: 0,
        failed: 0,
    };

    for summary in summaries {
        aggregate.tests = aggregate.tests.saturating_add(summary.total_tests);
        aggregate.passed = aggregate.passed.saturating_add(summary.passed_tests);
        aggregate.failed = aggregate.failed.saturating_add(summary.failed_tests);
        if summary.failed_tests == 0 {
            aggregate.passing_collections = aggregate.passing_collections.saturating_add(1);
        }
    }

    aggregate
}

pub(crate) fn format_secs2(duration: Duration) -> String {
    let millis = clamp_millis(duration);
    format!("{}.{:02}", millis / 1000, (millis % 1000) / 10)
}

pub(crate) fn format_secs3(duration: Duration) -> String {
    let millis = clamp_millis(duration);
    format!("{}.{:03}", millis / 1000, millis % 1000)
}

fn clamp_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Success rate scaled by 10 (one decimal digit), computed in integer
/// space.
pub(crate) fn success_rate_x10(passed: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::try_from(passed)
        .unwrap_or(0)
        .saturating_mul(1000)
        .checked_div(u128::try_from(total).unwrap_or(1))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
