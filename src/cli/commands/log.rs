use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::audit::audit;
use crate::db::logs;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::time::{millis_to_local, now_millis, parse_datetime_millis};

/// Admin edit/delete of recorded punch logs.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { delete, edit, at } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(id) = delete {
            let log = logs::find_log(&pool.conn, id)?
                .ok_or_else(|| AppError::Other(format!("no log with id {}", id)))?;
            logs::delete_log(&pool.conn, id)?;
            audit(
                &pool.conn,
                "log_del",
                &log.user_id,
                &format!("{} {} on {}", log.kind.to_db_str(), id, log.date),
            )?;
            success(format!("Log {} deleted.", id));
        }

        if let Some(id) = edit {
            let at = at
                .as_ref()
                .ok_or_else(|| AppError::Other("--edit requires --at".to_string()))?;
            let new_ts = parse_datetime_millis(at)?;

            let mut log = logs::find_log(&pool.conn, id)?
                .ok_or_else(|| AppError::Other(format!("no log with id {}", id)))?;

            // Justified intervals keep their length when moved.
            if let Some(end) = log.end_ts {
                log.end_ts = Some(end + (new_ts - log.ts));
            }
            log.ts = new_ts;
            // Edits re-derive the attributed day from the new instant.
            log.date = millis_to_local(new_ts).date_naive();
            log.updated_at = Some(now_millis());

            logs::update_log(&pool.conn, &log)?;
            audit(
                &pool.conn,
                "log_edit",
                &log.user_id,
                &format!("{} moved to {}", id, at),
            )?;
            success(format!("Log {} moved to {}.", id, at));
        }
    }

    Ok(())
}
