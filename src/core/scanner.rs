//! Missing-workday scanner.
//!
//! Walks backward one calendar day at a time from the day before the
//! reference date and returns the most recent configured work day with no
//! log, skipping vacation/holiday days. The walk stops at the user's
//! account-creation day, and an explicit iteration cap bounds the loop for
//! long-tenured accounts with sparse work-day sets.

use crate::models::date_range::{DateRange, covers};
use crate::models::user::WorkDays;
use chrono::{Days, NaiveDate};
use std::collections::HashSet;

/// Hard bound on the backward walk, independent of account age.
pub const MAX_SCAN_DAYS: u32 = 1830;

/// The most recent unlogged required day strictly before `now`, or None
/// when the scan reaches `created` (or the cap) without finding one.
pub fn find_missing_workday(
    now: NaiveDate,
    created: NaiveDate,
    work_days: &WorkDays,
    logged: &HashSet<NaiveDate>,
    vacations: &[DateRange],
    holidays: &[DateRange],
) -> Option<NaiveDate> {
    let mut day = now.checked_sub_days(Days::new(1))?;
    let mut steps = 0u32;

    // No justification is owed for days before the account existed.
    while day >= created && steps < MAX_SCAN_DAYS {
        let required = work_days.contains_date(day)
            && !covers(vacations, day)
            && !covers(holidays, day);

        if required && !logged.contains(&day) {
            return Some(day);
        }

        day = day.checked_sub_days(Days::new(1))?;
        steps += 1;
    }

    None
}
