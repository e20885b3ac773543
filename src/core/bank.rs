//! Bank-of-hours accumulator.
//!
//! Weekday days contribute the signed delta against the daily quota;
//! weekend work carries no baseline expectation and is rewarded at 1.5×.
//! Vacation/holiday days contribute exactly 0 (both sides are zeroed by
//! the aggregator).

use crate::models::day_summary::DaySummary;
use crate::utils::date::is_weekend;

/// Signed contribution of one day, in minutes.
pub fn day_contribution(summary: &DaySummary) -> i64 {
    if is_weekend(summary.date) {
        summary.total_minutes * 3 / 2
    } else {
        summary.total_minutes - summary.expected_minutes
    }
}

/// Sum of contributions over a window. Positive = surplus, negative = deficit.
pub fn bank_minutes(summaries: &[DaySummary]) -> i64 {
    summaries.iter().map(day_contribution).sum()
}
