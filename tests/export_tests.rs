use std::fs;

mod common;
use common::{init_db_with_user, rp, setup_test_db, temp_out};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

fn punch_pair(db_path: &str, email: &str, date: &str) {
    for time in ["09:00", "12:00"] {
        rp().args([
            "--db",
            db_path,
            "--test",
            "punch",
            email,
            "--at",
            &format!("{} {}", date, time),
        ])
        .assert()
        .success();
    }
}

#[test]
fn test_export_csv_single_user_pair_row() {
    let db_path = setup_test_db("export_csv_pair_row");
    init_db_with_user(&db_path, "Alice", "alice@example.com");
    punch_pair(&db_path, "alice@example.com", "2026-03-10");

    let out = temp_out("export_csv_pair_row", "csv");
    rp().args([
        "--db",
        &db_path,
        "--test",
        "export",
        "--format",
        "csv",
        "--file",
        &out,
        "--user",
        "alice@example.com",
    ])
    .assert()
    .success();

    let bytes = fs::read(&out).expect("read exported csv");
    assert!(bytes.starts_with(&UTF8_BOM));

    let content = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 body");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Data;Tipo;Horário início;Horário fim;Duração")
    );
    // One pair row: start and duration filled, end column empty.
    assert_eq!(lines.next(), Some("10/03/2026;Ponto;09:00;;03:00"));
}

#[test]
fn test_export_csv_all_users_has_user_column() {
    let db_path = setup_test_db("export_csv_all_users");
    init_db_with_user(&db_path, "Alice", "alice@example.com");

    rp().args([
        "--db",
        &db_path,
        "--test",
        "user",
        "add",
        "--name",
        "Bob",
        "--email",
        "bob@example.com",
        "--pin",
        "4321",
    ])
    .assert()
    .success();

    punch_pair(&db_path, "alice@example.com", "2026-03-10");
    punch_pair(&db_path, "bob@example.com", "2026-03-11");

    let out = temp_out("export_csv_all_users", "csv");
    rp().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Data;Usuário;Tipo;Horário início;Horário fim;Duração"));
    assert!(content.contains("10/03/2026;Alice;Ponto;09:00;;03:00"));
    assert!(content.contains("11/03/2026;Bob;Ponto;09:00;;03:00"));
}

#[test]
fn test_export_csv_includes_absence_rows() {
    let db_path = setup_test_db("export_csv_absences");
    init_db_with_user(&db_path, "Alice", "alice@example.com");
    punch_pair(&db_path, "alice@example.com", "2026-03-10");

    rp().args([
        "--db",
        &db_path,
        "--test",
        "vacation",
        "add",
        "alice@example.com",
        "--from",
        "2026-03-11",
        "--to",
        "2026-03-12",
    ])
    .assert()
    .success();

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
    .success();

    let out = temp_out("export_csv_absences", "csv");
    rp().args([
        "--db",
        &db_path,
        "--test",
        "export",
        "--format",
        "csv",
        "--file",
        &out,
        "--user",
        "alice@example.com",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    // Justified interval: explicit start, end and duration.
    assert!(content.contains("09/03/2026;Justificado (pessoal);12:00;18:00;06:00"));
    // One synthesized row per covered vacation day.
    assert!(content.contains("11/03/2026;Férias (abonado);;;"));
    assert!(content.contains("12/03/2026;Férias (abonado);;;"));
}

#[test]
fn test_export_csv_range_filter() {
    let db_path = setup_test_db("export_csv_range_filter");
    init_db_with_user(&db_path, "Alice", "alice@example.com");
    punch_pair(&db_path, "alice@example.com", "2026-03-10");
    punch_pair(&db_path, "alice@example.com", "2026-04-02");

    let out = temp_out("export_csv_range_filter", "csv");
    rp().args([
        "--db",
        &db_path,
        "--test",
        "export",
        "--format",
        "csv",
        "--file",
        &out,
        "--range",
        "2026-03",
        "--user",
        "alice@example.com",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("10/03/2026"));
    assert!(!content.contains("02/04/2026"));
}

#[test]
fn test_export_json() {
    let db_path = setup_test_db("export_json");
    init_db_with_user(&db_path, "Alice", "alice@example.com");
    punch_pair(&db_path, "alice@example.com", "2026-03-10");

    let out = temp_out("export_json", "json");
    rp().args([
        "--db",
        &db_path,
        "--test",
        "export",
        "--format",
        "json",
        "--file",
        &out,
        "--user",
        "alice@example.com",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("\"tipo\": \"Ponto\""));
    assert!(content.contains("\"horarioInicio\": \"09:00\""));
    assert!(content.contains("\"duracao\": \"03:00\""));
}

#[test]
fn test_export_refuses_existing_file_without_force() {
    let db_path = setup_test_db("export_refuses_existing");
    init_db_with_user(&db_path, "Alice", "alice@example.com");
    punch_pair(&db_path, "alice@example.com", "2026-03-10");

    let out = temp_out("export_refuses_existing", "csv");
    fs::write(&out, "stale").expect("seed existing file");

    rp().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .failure()
    .stderr(predicates::str::contains("already exists"));

    // --force overwrites.
    rp().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out, "--force",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("10/03/2026"));
}
