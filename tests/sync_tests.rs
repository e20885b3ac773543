use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_user, rp, setup_test_db, temp_out};

#[test]
fn test_sync_export_writes_snapshot() {
    let db_path = setup_test_db("sync_export_writes");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    let snap = temp_out("sync_export_writes", "json");
    rp().args([
        "--db", &db_path, "--test", "sync", "--file", &snap, "--export",
    ])
    .assert()
    .success()
    .stdout(contains("Snapshot written"));

    let content = fs::read_to_string(&snap).expect("read snapshot");
    assert!(content.contains("alice@example.com"));
    assert!(content.contains("\"users\""));
    assert!(content.contains("\"logs\""));
}

#[test]
fn test_sync_export_skips_identical_file() {
    let db_path = setup_test_db("sync_export_skips");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    let snap = temp_out("sync_export_skips", "json");
    rp().args([
        "--db", &db_path, "--test", "sync", "--file", &snap, "--export",
    ])
    .assert()
    .success();

    // Nothing changed locally; the second export is a no-op.
    rp().args([
        "--db", &db_path, "--test", "sync", "--file", &snap, "--export",
    ])
    .assert()
    .success()
    .stdout(contains("already matches"));
}

#[test]
fn test_sync_import_merges_users_and_logs() {
    let db_a = setup_test_db("sync_import_merge_a");
    init_db_with_user(&db_a, "Alice", "alice@example.com");

    rp().args([
        "--db",
        &db_a,
        "--test",
        "punch",
        "alice@example.com",
        "--at",
        "2026-03-10 09:00",
    ])
    .assert()
    .success();

    let db_b = setup_test_db("sync_import_merge_b");
    init_db_with_user(&db_b, "Bob", "bob@example.com");

    let snap = temp_out("sync_import_merge", "json");
    rp().args([
        "--db", &db_a, "--test", "sync", "--file", &snap, "--export",
    ])
    .assert()
    .success();

    rp().args([
        "--db", &db_b, "--test", "sync", "--file", &snap, "--import",
    ])
    .assert()
    .success()
    .stdout(contains("Merged snapshot"));

    // The merged database holds the union of both user sets and Alice's log.
    rp().args(["--db", &db_b, "--test", "user", "list"])
        .assert()
        .success()
        .stdout(contains("alice@example.com"))
        .stdout(contains("bob@example.com"));

    rp().args([
        "--db",
        &db_b,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-10",
    ])
    .assert()
    .success()
    .stdout(contains("2026-03-10"));
}

#[test]
fn test_sync_import_is_idempotent() {
    let db_a = setup_test_db("sync_idempotent_a");
    init_db_with_user(&db_a, "Alice", "alice@example.com");

    let db_b = setup_test_db("sync_idempotent_b");
    init_db_with_user(&db_b, "Bob", "bob@example.com");

    let snap = temp_out("sync_idempotent", "json");
    rp().args([
        "--db", &db_a, "--test", "sync", "--file", &snap, "--export",
    ])
    .assert()
    .success();

    rp().args([
        "--db", &db_b, "--test", "sync", "--file", &snap, "--import",
    ])
    .assert()
    .success()
    .stdout(contains("Merged snapshot"));

    // Re-importing the same snapshot changes nothing.
    rp().args([
        "--db", &db_b, "--test", "sync", "--file", &snap, "--import",
    ])
    .assert()
    .success()
    .stdout(contains("already matches"));
}

#[test]
fn test_sync_import_newer_remote_wins() {
    let db_a = setup_test_db("sync_lww_a");
    init_db_with_user(&db_a, "Alice", "alice@example.com");

    let snap_old = temp_out("sync_lww_old", "json");
    rp().args([
        "--db", &db_a, "--test", "sync", "--file", &snap_old, "--export",
    ])
    .assert()
    .success();

    // Rename the user; the edit bumps updated_at.
    rp().args([
        "--db",
        &db_a,
        "--test",
        "user",
        "edit",
        "alice@example.com",
        "--name",
        "Alice Renamed",
    ])
    .assert()
    .success();

    let snap_new = temp_out("sync_lww_new", "json");
    rp().args([
        "--db", &db_a, "--test", "sync", "--file", &snap_new, "--export",
    ])
    .assert()
    .success();

    // A fresh installation importing old-then-new converges on the edit.
    let db_b = setup_test_db("sync_lww_b");
    common::init_db(&db_b);

    rp().args([
        "--db", &db_b, "--test", "sync", "--file", &snap_old, "--import",
    ])
    .assert()
    .success();

    rp().args([
        "--db", &db_b, "--test", "sync", "--file", &snap_new, "--import",
    ])
    .assert()
    .success();

    rp().args(["--db", &db_b, "--test", "user", "list"])
        .assert()
        .success()
        .stdout(contains("Alice Renamed"));
}

#[test]
fn test_sync_requires_direction_flag() {
    let db_path = setup_test_db("sync_requires_direction");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    let snap = temp_out("sync_requires_direction", "json");
    rp().args(["--db", &db_path, "--test", "sync", "--file", &snap])
        .assert()
        .failure()
        .stderr(contains("--export or --import"));
}
