//! Whole-database snapshot load/store, the local side of the sync flow.

use crate::db::ranges::RangeTable;
use crate::db::{logs, ranges, users};
use crate::errors::AppResult;
use crate::models::snapshot::Snapshot;
use rusqlite::Connection;

/// Read the four collections into a Snapshot.
pub fn load_snapshot(conn: &Connection) -> AppResult<Snapshot> {
    let users = users::load_users(conn)?;

    let mut stmt = conn.prepare("SELECT * FROM punch_logs ORDER BY ts ASC")?;
    let rows = stmt.query_map([], logs::map_row)?;
    let mut all_logs = Vec::new();
    for r in rows {
        all_logs.push(r?);
    }

    let vacations = ranges::load_all_ranges(conn, RangeTable::Vacations)?;
    let holidays = ranges::load_all_ranges(conn, RangeTable::Holidays)?;

    Ok(Snapshot {
        users,
        logs: all_logs,
        vacations,
        holidays,
    })
}

/// Replace the four collections with the snapshot's content, atomically.
pub fn store_snapshot(conn: &mut Connection, snap: &Snapshot) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM users", [])?;
    tx.execute("DELETE FROM punch_logs", [])?;
    tx.execute("DELETE FROM vacations", [])?;
    tx.execute("DELETE FROM holidays", [])?;

    for u in &snap.users {
        users::insert_user(&tx, u)?;
    }
    for l in &snap.logs {
        logs::insert_log(&tx, l)?;
    }
    for v in &snap.vacations {
        ranges::insert_range(&tx, RangeTable::Vacations, v)?;
    }
    for h in &snap.holidays {
        ranges::insert_range(&tx, RangeTable::Holidays, h)?;
    }

    tx.commit()?;
    Ok(())
}
