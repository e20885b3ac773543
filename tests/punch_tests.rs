use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_db_with_user, insert_user_with_created_at, rp, setup_test_db};

#[test]
fn test_punch_alternates_in_out() {
    let db_path = setup_test_db("punch_alternates");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    rp().args([
        "--db",
        &db_path,
        "--test",
        "punch",
        "alice@example.com",
        "--at",
        "2026-03-10 09:00",
    ])
    .assert()
    .success()
    .stdout(contains("Registered IN"));

    rp().args([
        "--db",
        &db_path,
        "--test",
        "punch",
        "alice@example.com",
        "--at",
        "2026-03-10 12:00",
    ])
    .assert()
    .success()
    .stdout(contains("Registered OUT"));
}

#[test]
fn test_punch_forced_kind() {
    let db_path = setup_test_db("punch_forced_kind");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    // Two forced INs in a row; alternation is bypassed.
    for at in ["2026-03-10 09:00", "2026-03-10 10:00"] {
        rp().args([
            "--db",
            &db_path,
            "--test",
            "punch",
            "alice@example.com",
            "--kind",
            "in",
            "--at",
            at,
        ])
        .assert()
        .success()
        .stdout(contains("Registered IN"));
    }
}

#[test]
fn test_punch_unknown_user_fails() {
    let db_path = setup_test_db("punch_unknown_user");
    init_db(&db_path);

    rp().args(["--db", &db_path, "--test", "punch", "ghost@example.com"])
        .assert()
        .failure()
        .stderr(contains("No user found"));
}

#[test]
fn test_summary_weekday_goal() {
    let db_path = setup_test_db("summary_weekday_goal");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    // 09:00 .. 12:00 on a Tuesday: 3h worked against an 8h expectation.
    for at in ["2026-03-10 09:00", "2026-03-10 12:00"] {
        rp().args([
            "--db", &db_path, "--test", "punch", "alice@example.com", "--at", at,
        ])
        .assert()
        .success();
    }

    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-10",
    ])
    .assert()
    .success()
    .stdout(contains("2026-03-10"))
    .stdout(contains("03:00"))
    .stdout(contains("08:00"))
    .stdout(contains("✗"));
}

#[test]
fn test_summary_weekend_goal_always_met() {
    let db_path = setup_test_db("summary_weekend_goal");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    // 2026-03-14 is a Saturday: expected is zero, goal is met.
    for at in ["2026-03-14 09:00", "2026-03-14 13:00"] {
        rp().args([
            "--db", &db_path, "--test", "punch", "alice@example.com", "--at", at,
        ])
        .assert()
        .success();
    }

    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-14",
    ])
    .assert()
    .success()
    .stdout(contains("04:00"))
    .stdout(contains("00:00"))
    .stdout(contains("✓"));
}

#[test]
fn test_summary_bank_weekday_deficit() {
    let db_path = setup_test_db("summary_bank_deficit");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    for at in ["2026-03-10 09:00", "2026-03-10 12:00"] {
        rp().args([
            "--db", &db_path, "--test", "punch", "alice@example.com", "--at", at,
        ])
        .assert()
        .success();
    }

    // 3h worked minus the 8h expectation.
    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-10",
        "--bank",
    ])
    .assert()
    .success()
    .stdout(contains("Bank of hours"))
    .stdout(contains("-05h 00m"));
}

#[test]
fn test_summary_bank_weekend_overtime_and_notice() {
    let db_path = setup_test_db("summary_bank_overtime");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    // 4h on a Saturday count 1.5x: the bank lands exactly on the 6h
    // overwork threshold.
    for at in ["2026-03-14 09:00", "2026-03-14 13:00"] {
        rp().args([
            "--db", &db_path, "--test", "punch", "alice@example.com", "--at", at,
        ])
        .assert()
        .success();
    }

    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-14",
        "--bank",
    ])
    .assert()
    .success()
    .stdout(contains("+06h 00m"))
    .stdout(contains("overworking"));

    // The notice is one-shot.
    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-14",
        "--bank",
    ])
    .assert()
    .success()
    .stdout(contains("+06h 00m"))
    .stdout(contains("overworking").not());
}

#[test]
fn test_vacation_zeroes_covered_day() {
    let db_path = setup_test_db("vacation_zeroes_day");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    for at in ["2026-03-10 09:00", "2026-03-10 12:00"] {
        rp().args([
            "--db", &db_path, "--test", "punch", "alice@example.com", "--at", at,
        ])
        .assert()
        .success();
    }

    rp().args([
        "--db",
        &db_path,
        "--test",
        "vacation",
        "add",
        "alice@example.com",
        "--from",
        "2026-03-10",
        "--to",
        "2026-03-10",
    ])
    .assert()
    .success();

    // Logs survive but the day counts zero and the goal is met.
    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-10",
    ])
    .assert()
    .success()
    .stdout(contains("00:00"))
    .stdout(contains("✓"));
}

#[test]
fn test_missing_workday_blocks_until_justified() {
    let db_path = setup_test_db("missing_workday_flow");
    init_db(&db_path);

    // User created Monday 2026-03-02; first punch on Wednesday leaves
    // Tuesday unaccounted for.
    let created = rponto::utils::time::local_millis(
        chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    );
    insert_user_with_created_at(&db_path, "carol@example.com", created);

    rp().args([
        "--db",
        &db_path,
        "--test",
        "punch",
        "carol@example.com",
        "--at",
        "2026-03-04 09:00",
    ])
    .assert()
    .success()
    .stdout(contains("Registered IN"))
    .stdout(contains("2026-03-03"));

    // Further punches are rejected while the day is pending.
    rp().args([
        "--db",
        &db_path,
        "--test",
        "punch",
        "carol@example.com",
        "--at",
        "2026-03-04 12:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Justification pending for 2026-03-03"));

    rp().args([
        "--db",
        &db_path,
        "--test",
        "justify",
        "carol@example.com",
        "--reason",
        "medical appointment",
    ])
    .assert()
    .success()
    .stdout(contains("Justified 2026-03-03"))
    .stdout(contains("12:00"))
    .stdout(contains("18:00"));

    // The justified window counts as six worked hours on that day.
    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "carol@example.com",
        "--period",
        "2026-03-03",
    ])
    .assert()
    .success()
    .stdout(contains("06:00"));

    // Punching works again once the pending day is resolved.
    rp().args([
        "--db",
        &db_path,
        "--test",
        "punch",
        "carol@example.com",
        "--at",
        "2026-03-04 12:00",
    ])
    .assert()
    .success()
    .stdout(contains("Registered OUT"));
}

#[test]
fn test_justify_explicit_date_without_pending() {
    let db_path = setup_test_db("justify_explicit_date");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    rp().args([
        "--db",
        &db_path,
        "--test",
        "justify",
        "alice@example.com",
        "--date",
        "2026-03-09",
        "--reason",
        "travel",
        "--kind",
        "personal",
    ])
    .assert()
    .success()
    .stdout(contains("Justified 2026-03-09"));
}

#[test]
fn test_justify_nothing_pending_fails() {
    let db_path = setup_test_db("justify_nothing_pending");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    rp().args([
        "--db",
        &db_path,
        "--test",
        "justify",
        "alice@example.com",
        "--reason",
        "none",
    ])
    .assert()
    .failure()
    .stderr(contains("nothing to justify"));
}

#[test]
fn test_log_edit_moves_punch() {
    let db_path = setup_test_db("log_edit_moves_punch");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    rp().args([
        "--db",
        &db_path,
        "--test",
        "punch",
        "alice@example.com",
        "--at",
        "2026-03-10 09:00",
    ])
    .assert()
    .success();

    // Fetch the log id straight from the library.
    let pool = rponto::db::pool::DbPool::new(&db_path).expect("open db");
    let user =
        rponto::db::users::find_by_email(&pool.conn, "alice@example.com").expect("user");
    let logs = rponto::db::logs::load_logs_for_user(&pool.conn, &user.id).expect("logs");
    assert_eq!(logs.len(), 1);
    let id = logs[0].id.clone();
    drop(pool);

    rp().args([
        "--db",
        &db_path,
        "--test",
        "log",
        "--edit",
        &id,
        "--at",
        "2026-03-10 08:30",
    ])
    .assert()
    .success();

    let pool = rponto::db::pool::DbPool::new(&db_path).expect("open db");
    let moved = rponto::db::logs::load_logs_for_user(&pool.conn, &user.id).expect("logs");
    assert_eq!(moved[0].time_str(), "08:30");
    assert!(moved[0].updated_at.is_some());
}

#[test]
fn test_log_delete_removes_punch() {
    let db_path = setup_test_db("log_delete_removes_punch");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    rp().args([
        "--db",
        &db_path,
        "--test",
        "punch",
        "alice@example.com",
        "--at",
        "2026-03-10 09:00",
    ])
    .assert()
    .success();

    let pool = rponto::db::pool::DbPool::new(&db_path).expect("open db");
    let user =
        rponto::db::users::find_by_email(&pool.conn, "alice@example.com").expect("user");
    let logs = rponto::db::logs::load_logs_for_user(&pool.conn, &user.id).expect("logs");
    let id = logs[0].id.clone();
    drop(pool);

    rp().args(["--db", &db_path, "--test", "log", "--del", &id])
        .assert()
        .success();

    rp().args([
        "--db",
        &db_path,
        "--test",
        "summary",
        "alice@example.com",
        "--period",
        "2026-03-10",
    ])
    .assert()
    .success()
    .stdout(contains("No logs"));
}
