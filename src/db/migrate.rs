use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `audit` table exists.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create all collection tables with the current schema.
fn create_base_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id                    TEXT PRIMARY KEY,
            name                  TEXT NOT NULL,
            email                 TEXT NOT NULL UNIQUE,
            cpf                   TEXT NOT NULL DEFAULT '',
            pin                   TEXT NOT NULL,
            role                  TEXT NOT NULL DEFAULT 'user' CHECK(role IN ('user','admin')),
            is_master             INTEGER NOT NULL DEFAULT 0,
            daily_hours           REAL NOT NULL DEFAULT 8.0,
            work_days             TEXT NOT NULL DEFAULT '1,2,3,4,5',
            email_verified        INTEGER NOT NULL DEFAULT 0,
            pending_justification TEXT,
            relax_notice          INTEGER NOT NULL DEFAULT 0,
            created_at            INTEGER NOT NULL,
            updated_at            INTEGER
        );

        CREATE TABLE IF NOT EXISTS punch_logs (
            id                 TEXT PRIMARY KEY,
            user_id            TEXT NOT NULL,
            ts                 INTEGER NOT NULL,
            end_ts             INTEGER,
            kind               TEXT NOT NULL CHECK(kind IN ('in','out','justified')),
            date               TEXT NOT NULL,
            justification      TEXT,
            justification_kind TEXT CHECK(justification_kind IN ('personal','missed')),
            created_at         INTEGER NOT NULL,
            updated_at         INTEGER
        );

        CREATE TABLE IF NOT EXISTS vacations (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date   TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS holidays (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date   TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_punch_logs_user_date ON punch_logs(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_punch_logs_date ON punch_logs(date);
        "#,
    )?;
    Ok(())
}

/// Add `relax_notice` to users created by pre-0.3 schemas.
fn migrate_add_relax_notice(conn: &Connection) -> Result<()> {
    let version = "20250402_0007_add_relax_notice_flag";

    let mut chk = conn.prepare(
        "SELECT 1 FROM audit
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if !column_exists(conn, "users", "relax_notice")? {
        conn.execute(
            "ALTER TABLE users ADD COLUMN relax_notice INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
        success("Migration: added 'relax_notice' to users table");
    }

    conn.execute(
        "INSERT INTO audit (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added relax_notice flag to users')",
        [version],
    )?;

    Ok(())
}

/// Add `pending_justification` to users created by pre-0.2 schemas.
fn migrate_add_pending_justification(conn: &Connection) -> Result<()> {
    let version = "20250219_0004_add_pending_justification";

    let mut chk = conn.prepare(
        "SELECT 1 FROM audit
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if !column_exists(conn, "users", "pending_justification")? {
        conn.execute("ALTER TABLE users ADD COLUMN pending_justification TEXT;", [])?;
        success("Migration: added 'pending_justification' to users table");
    }

    conn.execute(
        "INSERT INTO audit (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added pending_justification to users')",
        [version],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Audit table first: versioned migrations record themselves there.
    ensure_audit_table(conn)?;

    // 2) Base schema.
    let fresh = !table_exists(conn, "users")?;
    create_base_tables(conn)?;

    // 3) Column migrations only apply to pre-existing databases.
    if !fresh {
        migrate_add_pending_justification(conn)?;
        migrate_add_relax_notice(conn)?;
    }

    Ok(())
}
