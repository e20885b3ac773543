use crate::errors::{AppError, AppResult};
use crate::models::date_range::DateRange;
use crate::utils::date::parse_date;
use rusqlite::{Connection, Result, Row, params};

/// Vacations and holidays share the same shape; accessors are generic over
/// the backing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeTable {
    Vacations,
    Holidays,
}

impl RangeTable {
    pub fn table_name(self) -> &'static str {
        match self {
            RangeTable::Vacations => "vacations",
            RangeTable::Holidays => "holidays",
        }
    }
}

pub fn map_row(row: &Row) -> Result<DateRange> {
    let start_str: String = row.get("start_date")?;
    let end_str: String = row.get("end_date")?;

    let start_date = parse_date(&start_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(start_str)),
        )
    })?;
    let end_date = parse_date(&end_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(end_str)),
        )
    })?;

    Ok(DateRange {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        start_date,
        end_date,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_range(conn: &Connection, table: RangeTable, r: &DateRange) -> AppResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {} (id, user_id, start_date, end_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            table.table_name()
        ),
        params![
            r.id,
            r.user_id,
            r.start_date.to_string(),
            r.end_date.to_string(),
            r.created_at,
            r.updated_at,
        ],
    )?;
    Ok(())
}

pub fn delete_range(conn: &Connection, table: RangeTable, id: &str) -> AppResult<()> {
    let n = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1", table.table_name()),
        [id],
    )?;
    if n == 0 {
        return Err(AppError::RangeNotFound(id.to_string()));
    }
    Ok(())
}

pub fn load_ranges_for_user(
    conn: &Connection,
    table: RangeTable,
    user_id: &str,
) -> AppResult<Vec<DateRange>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT * FROM {} WHERE user_id = ?1 ORDER BY start_date ASC",
        table.table_name()
    ))?;
    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_ranges(conn: &Connection, table: RangeTable) -> AppResult<Vec<DateRange>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT * FROM {} ORDER BY start_date ASC",
        table.table_name()
    ))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
