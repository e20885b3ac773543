use crate::errors::{AppError, AppResult};
use crate::models::log_type::{JustificationKind, LogType};
use crate::models::punch_log::PunchLog;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};
use std::collections::HashSet;

pub fn map_row(row: &Row) -> Result<PunchLog> {
    let kind_str: String = row.get("kind")?;
    let kind = LogType::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidKind(kind_str)),
        )
    })?;

    let date_str: String = row.get("date")?;
    let date = parse_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str)),
        )
    })?;

    let jk: Option<String> = row.get("justification_kind")?;
    let justification_kind = jk.as_deref().and_then(JustificationKind::from_db_str);

    Ok(PunchLog {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        ts: row.get("ts")?,
        end_ts: row.get("end_ts")?,
        kind,
        date,
        justification: row.get("justification")?,
        justification_kind,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_log(conn: &Connection, log: &PunchLog) -> AppResult<()> {
    conn.execute(
        "INSERT INTO punch_logs (id, user_id, ts, end_ts, kind, date, justification,
                                 justification_kind, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            log.id,
            log.user_id,
            log.ts,
            log.end_ts,
            log.kind.to_db_str(),
            log.date.to_string(),
            log.justification,
            log.justification_kind.map(|k| k.to_db_str()),
            log.created_at,
            log.updated_at,
        ],
    )?;
    Ok(())
}

/// Update all fields except id.
pub fn update_log(conn: &Connection, log: &PunchLog) -> AppResult<()> {
    conn.execute(
        "UPDATE punch_logs
         SET user_id = ?1, ts = ?2, end_ts = ?3, kind = ?4, date = ?5,
             justification = ?6, justification_kind = ?7,
             created_at = ?8, updated_at = ?9
         WHERE id = ?10",
        params![
            log.user_id,
            log.ts,
            log.end_ts,
            log.kind.to_db_str(),
            log.date.to_string(),
            log.justification,
            log.justification_kind.map(|k| k.to_db_str()),
            log.created_at,
            log.updated_at,
            log.id,
        ],
    )?;
    Ok(())
}

pub fn find_log(conn: &Connection, id: &str) -> AppResult<Option<PunchLog>> {
    use rusqlite::OptionalExtension;
    let mut stmt = conn.prepare("SELECT * FROM punch_logs WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn delete_log(conn: &Connection, id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM punch_logs WHERE id = ?1", [id])?;
    Ok(())
}

pub fn load_logs_for_user(conn: &Connection, user_id: &str) -> AppResult<Vec<PunchLog>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punch_logs
         WHERE user_id = ?1
         ORDER BY ts ASC",
    )?;
    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_logs_for_user_date(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<PunchLog>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punch_logs
         WHERE user_id = ?1 AND date = ?2
         ORDER BY ts ASC",
    )?;
    let rows = stmt.query_map(params![user_id, date.to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Distinct logged dates for a user. Backing set for the missing-workday
/// scanner, which needs O(1) date membership checks.
pub fn logged_dates(conn: &Connection, user_id: &str) -> AppResult<HashSet<NaiveDate>> {
    let mut stmt = conn.prepare("SELECT DISTINCT date FROM punch_logs WHERE user_id = ?1")?;
    let rows = stmt.query_map([user_id], |row| row.get::<_, String>(0))?;

    let mut out = HashSet::new();
    for r in rows {
        let s = r?;
        if let Some(d) = parse_date(&s) {
            out.insert(d);
        }
    }
    Ok(out)
}
