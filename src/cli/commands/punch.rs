use crate::cli::parser::{Commands, JustifyKind, PunchKind};
use crate::config::Config;
use crate::core::punch::PunchLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::log_type::{JustificationKind, LogType};
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date;
use crate::utils::time::parse_datetime_millis;

/// Record a punch for a user.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch { email, kind, at } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let kind = kind.as_ref().map(|k| match k {
            PunchKind::In => LogType::In,
            PunchKind::Out => LogType::Out,
        });
        let at = match at {
            Some(s) => Some(parse_datetime_millis(s)?),
            None => None,
        };

        let outcome = PunchLogic::punch(&mut pool, cfg, email, kind, at)?;

        success(format!(
            "Registered {} for <{}> at {} ({})",
            outcome.log.kind.to_db_str().to_uppercase(),
            email,
            outcome.log.time_str(),
            outcome.log.date,
        ));

        if let Some(day) = outcome.missing_day {
            warning(format!(
                "Work day {} has no punch logs. Run `rponto justify {} --reason \"...\"` before punching again.",
                day, email
            ));
        }
    }

    Ok(())
}

/// Resolve a pending (or explicit) day with a justified interval.
pub fn handle_justify(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Justify {
        email,
        date,
        reason,
        kind,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let date = match date {
            Some(s) => Some(parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?),
            None => None,
        };
        let kind = match kind {
            JustifyKind::Personal => JustificationKind::Personal,
            JustifyKind::Missed => JustificationKind::Missed,
        };

        let log = PunchLogic::justify(&mut pool, cfg, email, date, reason, kind)?;

        success(format!(
            "Justified {} for <{}> ({} - {}).",
            log.date,
            email,
            log.time_str(),
            log.end_time_str().unwrap_or_default(),
        ));
    }

    Ok(())
}
