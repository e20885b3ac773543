//! Master-admin selection.
//!
//! Exactly one user carries the master flag once any user exists. The rule
//! is a pure function re-applied after every mutation of the user set: the
//! configured master e-mail wins when present, otherwise the earliest
//! created account (ties broken by id).

use crate::db::users::{apply_master_flag, load_users};
use crate::errors::AppResult;
use crate::models::user::User;
use rusqlite::Connection;

/// Pick the master's id out of the current user set.
pub fn select_master(users: &[User], master_email: &str) -> Option<String> {
    if users.is_empty() {
        return None;
    }

    if !master_email.is_empty() {
        if let Some(u) = users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(master_email))
        {
            return Some(u.id.clone());
        }
    }

    users
        .iter()
        .min_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
        .map(|u| u.id.clone())
}

/// Re-select the master and persist the flag. Call after any user-set
/// mutation (add, delete, role change, sync import).
pub fn reselect_master(conn: &Connection, master_email: &str) -> AppResult<Option<String>> {
    let users = load_users(conn)?;
    let master = select_master(&users, master_email);
    if let Some(id) = &master {
        apply_master_flag(conn, id)?;
    }
    Ok(master)
}
