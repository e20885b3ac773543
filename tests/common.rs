#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rp() -> Command {
    cargo_bin_cmd!("rponto")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rponto.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema on a fresh DB.
pub fn init_db(db_path: &str) {
    rp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize a DB and register one regular user.
pub fn init_db_with_user(db_path: &str, name: &str, email: &str) {
    init_db(db_path);

    rp().args([
        "--db", db_path, "--test", "user", "add", "--name", name, "--email", email, "--pin",
        "1234",
    ])
    .assert()
    .success();
}

/// Insert a user directly through the library, with full control over
/// `created_at` (needed by the missing-workday scenarios).
pub fn insert_user_with_created_at(db_path: &str, email: &str, created_at_millis: i64) {
    let pool = rponto::db::pool::DbPool::new(db_path).expect("open db");
    rponto::db::initialize::init_db(&pool.conn).expect("init db");

    let mut user = rponto::models::user::User::new(
        "Test User",
        email,
        "",
        "1234",
        rponto::models::user::Role::User,
    );
    user.created_at = created_at_millis;
    rponto::db::users::insert_user(&pool.conn, &user).expect("insert user");
}
