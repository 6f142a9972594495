mod common;
use common::{CNPJ, REG, add_leg, aero, aero_db, init_db_with_fleet, setup_test_db, temp_out};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    aero()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_logbook_add_and_list_month() {
    let db_path = setup_test_db("cli_logbook_list");
    init_db_with_fleet(&db_path);

    add_leg(&db_path, "2025-03-05", "10:00", "11:30");
    add_leg(&db_path, "2025-03-12", "14:00", "14:42");

    aero_db(&db_path, &["logbook", "list", "--aircraft", "pr-abc", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SBSP-SBRJ"))
        .stdout(predicate::str::contains("01:30"))
        .stdout(predicate::str::contains("187.30"))
        .stdout(predicate::str::contains("189.50"))
        .stdout(predicate::str::contains("190.00"));
}

#[test]
fn test_logbook_rejects_bad_time() {
    let db_path = setup_test_db("cli_logbook_bad_time");
    init_db_with_fleet(&db_path);

    aero_db(
        &db_path,
        &[
            "logbook", "add", "--aircraft", REG, "--date", "2025-03-05", "--from", "SBSP", "--to",
            "SBRJ", "--flight", "1:75",
        ],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid time format"));
}

#[test]
fn test_logbook_close_month_blocks_operations() {
    let db_path = setup_test_db("cli_logbook_close");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:00");

    aero_db(&db_path, &["logbook", "close", "--aircraft", REG, "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("closed"));

    aero_db(
        &db_path,
        &["--role", "operations", "logbook", "del", "1"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("is closed"));

    aero_db(&db_path, &["logbook", "close", "--aircraft", REG, "--period", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already closed"));
}

#[test]
fn test_logbook_summary_by_client() {
    let db_path = setup_test_db("cli_logbook_summary");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:30");

    aero_db(&db_path, &["logbook", "summary", "--aircraft", REG, "--period", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Participações"))
        .stdout(predicate::str::contains("Ana Souza"));
}

#[test]
fn test_receipts_numbered_per_year() {
    let db_path = setup_test_db("cli_receipt_numbers");
    init_db_with_fleet(&db_path);

    let issue = |date: &str| {
        aero_db(
            &db_path,
            &[
                "receipt", "issue", "--client", "1", "--amount", "1.500,00", "--description",
                "Rateio de horas", "--date", date,
            ],
        )
        .assert()
        .success()
    };

    issue("2025-03-10").stdout(predicate::str::contains("001/2025"));
    issue("2025-03-11").stdout(predicate::str::contains("002/2025"));
    issue("2026-01-02").stdout(predicate::str::contains("001/2026"));

    aero_db(&db_path, &["receipt", "list", "--period", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 3.000,00"));
}

#[test]
fn test_receipt_pdf_written() {
    let db_path = setup_test_db("cli_receipt_pdf");
    init_db_with_fleet(&db_path);
    let out = temp_out("cli_receipt_pdf", "pdf");

    aero_db(
        &db_path,
        &[
            "receipt", "issue", "--payer", "José da Silva", "--document", "123.456.789-01",
            "--amount", "250", "--description", "Traslado SBSP-SBRJ", "--date", "2025-03-10",
            "--file", &out,
        ],
    )
    .assert()
    .success();

    let bytes = fs::read(&out).expect("read receipt pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_receipt_denied_to_pilot() {
    let db_path = setup_test_db("cli_receipt_denied");
    init_db_with_fleet(&db_path);

    aero_db(
        &db_path,
        &[
            "--role", "pilot", "receipt", "issue", "--client", "1", "--amount", "10",
            "--description", "x",
        ],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Permission denied"));
}

#[test]
fn test_portal_login_and_summary() {
    let db_path = setup_test_db("cli_portal");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:30");

    let output = aero_db(&db_path, &["portal", "login", "--cnpj", "1234", "--registration", "pr-abc"])
        .output()
        .expect("run portal login");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let token = stdout
        .lines()
        .map(str::trim)
        .find(|l| l.len() == 64 && l.chars().all(|c| c.is_ascii_hexdigit()))
        .expect("token printed")
        .to_string();

    aero_db(&db_path, &["portal", "summary", "--token", &token])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Participações"))
        .stdout(predicate::str::contains("01:30"));

    aero_db(&db_path, &["portal", "logout", "--token", &token])
        .assert()
        .success();

    aero_db(&db_path, &["portal", "whoami", "--token", &token])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid or expired"));
}

#[test]
fn test_portal_login_failure_is_generic() {
    let db_path = setup_test_db("cli_portal_fail");
    init_db_with_fleet(&db_path);

    for (cnpj, reg) in [("9999", REG), ("1234", "PT-ZZZ"), ("12", REG)] {
        aero_db(&db_path, &["portal", "login", "--cnpj", cnpj, "--registration", reg])
            .assert()
            .failure()
            .stderr(predicate::str::contains("CNPJ or registration incorrect"));
    }
}

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("cli_export_csv");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:30");
    add_leg(&db_path, "2025-04-02", "09:00", "10:00");

    let out = temp_out("cli_export_csv", "csv");
    aero_db(
        &db_path,
        &["export", "--format", "csv", "--file", &out, "--range", "2025-03", "--aircraft", REG],
    )
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("registration"));
    assert!(content.contains("2025-03-05"));
    assert!(!content.contains("2025-04-02"));
    assert!(content.contains("Acme Participações"));
}

#[test]
fn test_export_json_document() {
    let db_path = setup_test_db("cli_export_json");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:30");
    add_leg(&db_path, "2025-03-06", "09:00", "10:00");

    let out = temp_out("cli_export_json", "json");
    aero_db(&db_path, &["export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("valid json");
    assert_eq!(doc["count"], 2);
    assert_eq!(doc["legs"][0]["flight"], "01:30");
    assert!(doc["legs"][0]["fuel_used"].is_null());
    assert!(doc["legs"][1]["fuel_used"].is_number());
}

#[test]
fn test_export_xlsx_writes_workbook() {
    let db_path = setup_test_db("cli_export_xlsx");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:30");

    let out = temp_out("cli_export_xlsx", "xlsx");
    aero_db(&db_path, &["export", "--format", "xlsx", "--file", &out])
        .assert()
        .success()
        .stdout(predicate::str::contains("XLSX export completed"));

    let bytes = fs::read(&out).expect("read xlsx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_refuses_directory_target() {
    let db_path = setup_test_db("cli_export_dir");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:30");

    let dir = std::env::temp_dir();
    aero_db(
        &db_path,
        &["export", "--format", "csv", "--file", &dir.to_string_lossy(), "--force"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("is a directory"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("cli_export_relative");
    init_db_with_fleet(&db_path);
    add_leg(&db_path, "2025-03-05", "10:00", "11:30");

    aero_db(&db_path, &["export", "--format", "json", "--file", "relative.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_birthdays_listed_from_reference_date() {
    let db_path = setup_test_db("cli_birthdays");
    init_db_with_fleet(&db_path);

    aero_db(&db_path, &["birthdays", "--today", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Souza"))
        .stdout(predicate::str::contains("15/03/2025"));

    aero_db(&db_path, &["birthdays", "--week", "--today", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No birthdays"));
}

#[test]
fn test_client_requires_valid_cnpj() {
    let db_path = setup_test_db("cli_client_cnpj");
    init_db_with_fleet(&db_path);

    aero_db(&db_path, &["client", "add", "--name", "Broken", "--cnpj", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid CNPJ/CPF"));

    aero_db(&db_path, &["client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(CNPJ));
}

#[test]
fn test_messages_between_operators() {
    let db_path = setup_test_db("cli_messages");
    init_db_with_fleet(&db_path);

    aero_db(&db_path, &["message", "send", "--to", "nobody-else", "--body", "Hangar at 8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sent"));

    // not the recipient
    aero_db(&db_path, &["message", "read", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_fleet(&db_path);

    aero_db(&db_path, &["log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PR-ABC"));
}

#[test]
fn test_backup_compressed_admin_only() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_fleet(&db_path);
    let out = temp_out("cli_backup", "sqlite");
    let zipped = out.replace(".sqlite", ".zip");
    fs::remove_file(&zipped).ok();

    aero_db(&db_path, &["--role", "director", "backup", "--file", &out])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));

    aero_db(&db_path, &["backup", "--file", &out, "--compress"])
        .assert()
        .success();

    assert!(fs::metadata(&zipped).is_ok());
    assert!(fs::metadata(&out).is_err());
}
