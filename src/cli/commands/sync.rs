use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::master::reselect_master;
use crate::core::merge::{merge_snapshots, signature};
use crate::db::audit::audit;
use crate::db::pool::DbPool;
use crate::db::snapshot::{load_snapshot, store_snapshot};
use crate::errors::{AppError, AppResult};
use crate::models::snapshot::Snapshot;
use crate::ui::messages::{info, success};
use std::fs;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync {
        file,
        export,
        import,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *export {
            export_snapshot(&pool, file)?;
        } else if *import {
            import_snapshot(&mut pool, cfg, file)?;
        } else {
            return Err(AppError::Snapshot(
                "use --export or --import with sync".to_string(),
            ));
        }
    }

    Ok(())
}

fn export_snapshot(pool: &DbPool, file: &str) -> AppResult<()> {
    let local = load_snapshot(&pool.conn)?;

    // Skip the write when the file already holds the same record versions.
    let path = Path::new(file);
    if path.exists() {
        if let Ok(existing) = read_snapshot_file(path) {
            if signature(&existing) == signature(&local) {
                info("Snapshot file already matches the local state; nothing to write.");
                return Ok(());
            }
        }
    }

    let json = serde_json::to_string_pretty(&local)
        .map_err(|e| AppError::Snapshot(format!("serialization failed: {e}")))?;
    fs::write(path, json)?;

    success(format!("Snapshot written to {}.", path.display()));
    Ok(())
}

fn import_snapshot(pool: &mut DbPool, cfg: &Config, file: &str) -> AppResult<()> {
    let remote = read_snapshot_file(Path::new(file))?;
    let local = load_snapshot(&pool.conn)?;

    let merged = merge_snapshots(&local, &remote);

    if signature(&merged) == signature(&local) {
        info("Local state already matches the snapshot; nothing to merge.");
        return Ok(());
    }

    store_snapshot(&mut pool.conn, &merged)?;

    // An import can change the user set; the master rule is re-applied.
    reselect_master(&pool.conn, &cfg.master_email)?;

    audit(
        &pool.conn,
        "sync",
        file,
        &format!(
            "merged {} users, {} logs, {} vacations, {} holidays",
            merged.users.len(),
            merged.logs.len(),
            merged.vacations.len(),
            merged.holidays.len()
        ),
    )?;

    success(format!("Merged snapshot {} into the local database.", file));
    Ok(())
}

fn read_snapshot_file(path: &Path) -> AppResult<Snapshot> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Snapshot(format!("{}: {e}", path.display())))
}
