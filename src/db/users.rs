use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User, WorkDays};
use crate::utils::date::parse_date;
use crate::utils::time::now_millis;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid role: {}", role_str))),
        )
    })?;

    let wd_str: String = row.get("work_days")?;
    let work_days = WorkDays::parse(&wd_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid work_days: {}", wd_str))),
        )
    })?;

    let pending: Option<String> = row.get("pending_justification")?;
    let pending_justification = match pending {
        Some(s) if !s.is_empty() => Some(parse_date(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s)),
            )
        })?),
        _ => None,
    };

    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        cpf: row.get("cpf")?,
        pin: row.get("pin")?,
        role,
        is_master: row.get::<_, i64>("is_master")? != 0,
        daily_hours: row.get("daily_hours")?,
        work_days,
        email_verified: row.get::<_, i64>("email_verified")? != 0,
        pending_justification,
        relax_notice: row.get::<_, i64>("relax_notice")? != 0,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_user(conn: &Connection, u: &User) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, email, cpf, pin, role, is_master, daily_hours,
                            work_days, email_verified, pending_justification, relax_notice,
                            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            u.id,
            u.name,
            u.email,
            u.cpf,
            u.pin,
            u.role.to_db_str(),
            u.is_master as i64,
            u.daily_hours,
            u.work_days.to_db_str(),
            u.email_verified as i64,
            u.pending_justification.map(|d| d.to_string()),
            u.relax_notice as i64,
            u.created_at,
            u.updated_at,
        ],
    )?;
    Ok(())
}

/// Update all fields except id.
pub fn update_user(conn: &Connection, u: &User) -> AppResult<()> {
    conn.execute(
        "UPDATE users
         SET name = ?1, email = ?2, cpf = ?3, pin = ?4, role = ?5,
             is_master = ?6, daily_hours = ?7, work_days = ?8,
             email_verified = ?9, pending_justification = ?10,
             relax_notice = ?11, created_at = ?12, updated_at = ?13
         WHERE id = ?14",
        params![
            u.name,
            u.email,
            u.cpf,
            u.pin,
            u.role.to_db_str(),
            u.is_master as i64,
            u.daily_hours,
            u.work_days.to_db_str(),
            u.email_verified as i64,
            u.pending_justification.map(|d| d.to_string()),
            u.relax_notice as i64,
            u.created_at,
            u.updated_at,
            u.id,
        ],
    )?;
    Ok(())
}

pub fn load_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY created_at ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_by_email(conn: &Connection, email: &str) -> AppResult<User> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE email = ?1")?;
    stmt.query_row([email], map_row)
        .optional()?
        .ok_or_else(|| AppError::UserNotFound(email.to_string()))
}

/// Delete a user together with every record they own.
/// Runs in one transaction so a failure leaves nothing half-deleted.
pub fn delete_user_cascade(conn: &mut Connection, user_id: &str) -> AppResult<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM punch_logs WHERE user_id = ?1", [user_id])?;
    tx.execute("DELETE FROM vacations WHERE user_id = ?1", [user_id])?;
    tx.execute("DELETE FROM holidays WHERE user_id = ?1", [user_id])?;
    tx.execute("DELETE FROM users WHERE id = ?1", [user_id])?;
    tx.commit()?;
    Ok(())
}

pub fn set_pending_justification(
    conn: &Connection,
    user_id: &str,
    date: Option<NaiveDate>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET pending_justification = ?1, updated_at = ?2 WHERE id = ?3",
        params![date.map(|d| d.to_string()), now_millis(), user_id],
    )?;
    Ok(())
}

pub fn set_relax_notice(conn: &Connection, user_id: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET relax_notice = 1, updated_at = ?1 WHERE id = ?2",
        params![now_millis(), user_id],
    )?;
    Ok(())
}

/// Persist the master flag so that exactly `master_id` carries it.
pub fn apply_master_flag(conn: &Connection, master_id: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET is_master = (id = ?1)",
        params![master_id],
    )?;
    Ok(())
}
