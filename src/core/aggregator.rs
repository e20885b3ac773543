//! Day aggregator: turns one user's punch logs into per-day summaries.
//!
//! Pure function of its inputs; no side effects. The pairing rule is
//! strict: IN/OUT logs of a day are sorted chronologically and paired at
//! even indices only (0-1, 2-3, ...). A slot pair counts only when the
//! even slot is IN and the odd slot is OUT; anything else (OUT before IN,
//! double IN, trailing open IN) contributes zero and is skipped silently.

use crate::models::date_range::{DateRange, covers};
use crate::models::day_summary::DaySummary;
use crate::models::log_type::LogType;
use crate::models::punch_log::PunchLog;
use crate::utils::date::is_weekend;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Build one summary per distinct log date, newest first.
pub fn build_day_summaries(
    logs: &[PunchLog],
    vacations: &[DateRange],
    holidays: &[DateRange],
    daily_minutes: i64,
) -> Vec<DaySummary> {
    let mut by_date: BTreeMap<NaiveDate, Vec<PunchLog>> = BTreeMap::new();
    for log in logs {
        by_date.entry(log.date).or_default().push(log.clone());
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, day_logs)| {
            let exempt = covers(vacations, date) || covers(holidays, date);
            summarize_day(date, day_logs, exempt, daily_minutes)
        })
        .collect()
}

/// Summarize a single day. `exempt` marks vacation/holiday days: those are
/// zeroed with the goal met, while the logs are retained for display and
/// audit.
pub fn summarize_day(
    date: NaiveDate,
    mut logs: Vec<PunchLog>,
    exempt: bool,
    daily_minutes: i64,
) -> DaySummary {
    logs.sort_by_key(|l| l.ts);

    if exempt {
        return DaySummary {
            date,
            total_minutes: 0,
            expected_minutes: 0,
            goal_met: true,
            logs,
        };
    }

    let total_minutes = worked_minutes(&logs) + justified_minutes(&logs);

    let weekend = is_weekend(date);
    let expected_minutes = if weekend { 0 } else { daily_minutes };
    let goal_met = weekend || total_minutes >= expected_minutes;

    DaySummary {
        date,
        total_minutes,
        expected_minutes,
        goal_met,
        logs,
    }
}

/// Minutes covered by valid IN→OUT pairs, even-index pairing.
fn worked_minutes(logs: &[PunchLog]) -> i64 {
    let punches: Vec<&PunchLog> = logs.iter().filter(|l| l.kind.is_punch()).collect();

    let mut total = 0;
    let mut i = 0;
    while i + 1 < punches.len() {
        if punches[i].kind.is_in() && punches[i + 1].kind.is_out() {
            let delta = punches[i + 1].ts - punches[i].ts;
            if delta > 0 {
                total += delta / 60_000;
            }
        }
        i += 2;
    }
    total
}

/// Minutes from JUSTIFIED logs with a valid end.
fn justified_minutes(logs: &[PunchLog]) -> i64 {
    logs.iter()
        .filter(|l| l.kind == LogType::Justified)
        .map(PunchLog::justified_minutes)
        .sum()
}
