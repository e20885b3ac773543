//! Punch lifecycle: clock-in/out alternation, the missing-workday check on
//! the first IN of a day, and justification of pending days.

use crate::config::Config;
use crate::core::scanner::find_missing_workday;
use crate::db::audit::audit;
use crate::db::pool::DbPool;
use crate::db::ranges::{RangeTable, load_ranges_for_user};
use crate::db::{logs, users};
use crate::errors::{AppError, AppResult};
use crate::models::log_type::{JustificationKind, LogType};
use crate::models::punch_log::PunchLog;
use crate::models::user::User;
use crate::utils::time::{local_millis, millis_to_local, now_millis};
use chrono::NaiveDate;

/// Outcome of a punch: the recorded log plus, when the first IN of the day
/// uncovered an unlogged required day, the date now awaiting explanation.
pub struct PunchOutcome {
    pub log: PunchLog,
    pub missing_day: Option<NaiveDate>,
}

pub struct PunchLogic;

impl PunchLogic {
    /// Record a punch for the user.
    ///
    /// Kind defaults to alternation: the last IN/OUT log of the day being
    /// IN makes this an OUT, anything else an IN. A pending justification
    /// rejects the punch until `justify` resolves it.
    pub fn punch(
        pool: &mut DbPool,
        cfg: &Config,
        email: &str,
        kind: Option<LogType>,
        at: Option<i64>,
    ) -> AppResult<PunchOutcome> {
        let user = users::find_by_email(&pool.conn, email)?;

        if let Some(pending) = user.pending_justification {
            return Err(AppError::PendingJustification(pending.to_string()));
        }

        let ts = at.unwrap_or_else(now_millis);
        let date = millis_to_local(ts).date_naive();

        let today_logs = logs::load_logs_for_user_date(&pool.conn, &user.id, date)?;
        let kind = match kind {
            Some(k) if k.is_punch() => k,
            Some(other) => return Err(AppError::InvalidKind(other.to_db_str().to_string())),
            None => match today_logs.iter().rev().find(|l| l.kind.is_punch()) {
                Some(last) if last.kind.is_in() => LogType::Out,
                _ => LogType::In,
            },
        };

        let first_in_of_day =
            kind.is_in() && !today_logs.iter().any(|l| l.kind.is_in());

        let log = PunchLog::punch(&user.id, kind, ts);
        logs::insert_log(&pool.conn, &log)?;
        audit(
            &pool.conn,
            "punch",
            &user.email,
            &format!("{} at {}", kind.to_db_str(), log.time_str()),
        )?;

        // The scanner runs on the first IN of a day, never while a
        // justification is already pending (checked above).
        let missing_day = if first_in_of_day {
            Self::check_missing_workday(pool, cfg, &user, date)?
        } else {
            None
        };

        Ok(PunchOutcome { log, missing_day })
    }

    fn check_missing_workday(
        pool: &mut DbPool,
        _cfg: &Config,
        user: &User,
        today: NaiveDate,
    ) -> AppResult<Option<NaiveDate>> {
        let logged = logs::logged_dates(&pool.conn, &user.id)?;
        let vacations = load_ranges_for_user(&pool.conn, RangeTable::Vacations, &user.id)?;
        let holidays = load_ranges_for_user(&pool.conn, RangeTable::Holidays, &user.id)?;
        let created = millis_to_local(user.created_at).date_naive();

        let missing = find_missing_workday(
            today,
            created,
            &user.work_days,
            &logged,
            &vacations,
            &holidays,
        );

        if let Some(day) = missing {
            users::set_pending_justification(&pool.conn, &user.id, Some(day))?;
            audit(
                &pool.conn,
                "pending_justification",
                &user.email,
                &format!("unlogged work day {}", day),
            )?;
        }

        Ok(missing)
    }

    /// Resolve a pending (or explicitly given) day with a justified
    /// interval over the configured window, then clear the pending flag.
    pub fn justify(
        pool: &mut DbPool,
        cfg: &Config,
        email: &str,
        date: Option<NaiveDate>,
        reason: &str,
        kind: JustificationKind,
    ) -> AppResult<PunchLog> {
        let user = users::find_by_email(&pool.conn, email)?;

        let day = match date.or(user.pending_justification) {
            Some(d) => d,
            None => {
                return Err(AppError::Other(format!(
                    "nothing to justify for {}: no pending day and no --date given",
                    email
                )));
            }
        };

        let (start, end) = cfg.justify_bounds()?;
        let ts = local_millis(day, start);
        let end_ts = local_millis(day, end);
        if end_ts <= ts {
            return Err(AppError::EmptyJustifiedInterval);
        }

        let log = PunchLog::justified(&user.id, ts, end_ts, reason, kind);
        logs::insert_log(&pool.conn, &log)?;

        if user.pending_justification == Some(day) {
            users::set_pending_justification(&pool.conn, &user.id, None)?;
        }

        audit(
            &pool.conn,
            "justify",
            &user.email,
            &format!("{} ({})", day, kind.to_db_str()),
        )?;

        Ok(log)
    }
}
