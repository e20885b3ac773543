//! Time utilities: unix-millis conversions, HH:MM parsing, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

/// Convert unix millis to a local DateTime.
pub fn millis_to_local(ms: i64) -> DateTime<Local> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| Local.timestamp_millis_opt(0).unwrap())
}

/// Unix millis for a local date + HH:MM time.
pub fn local_millis(date: NaiveDate, time: NaiveTime) -> i64 {
    let naive = date.and_time(time);
    match naive.and_local_timezone(Local) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.timestamp_millis()
        }
        // DST gap: fall back to the UTC interpretation of the wall clock.
        chrono::LocalResult::None => naive.and_utc().timestamp_millis(),
    }
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_time_required(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Parse an optional `YYYY-MM-DD HH:MM` stamp into unix millis.
pub fn parse_datetime_millis(s: &str) -> AppResult<i64> {
    let (d, t) = s
        .split_once(' ')
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
    let date = crate::utils::date::parse_date(d.trim())
        .ok_or_else(|| AppError::InvalidDate(d.to_string()))?;
    let time = parse_time_required(t.trim())?;
    Ok(local_millis(date, time))
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
