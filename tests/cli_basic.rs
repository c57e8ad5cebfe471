#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("staffflow-cli").unwrap()
}

#[test]
fn add_then_list_employees() {
    let dir = tempdir().unwrap();
    let directory = dir.path().join("employees.json");

    cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "add-employee",
            "--last-name",
            "DOE",
            "--first-name",
            "Jane",
            "--position",
            "GSC",
        ])
        .assert()
        .success();

    cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "list-employees",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DOE Jane | GSC"));
}

#[test]
fn update_employee_then_list_reflects_changes() {
    let dir = tempdir().unwrap();
    let directory = dir.path().join("employees.json");

    let output = cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "add-employee",
            "--last-name",
            "DOE",
            "--first-name",
            "Jane",
            "--position",
            "GSC",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    // add-employee imprime l'identifiant généré
    let id = String::from_utf8(output.stdout).unwrap().trim().to_owned();

    cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "update-employee",
            "--id",
            &id,
            "--last-name",
            "SMITH",
            "--position",
            "AGSM",
        ])
        .assert()
        .success();

    cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "list-employees",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SMITH Jane | AGSM"));
}

#[test]
fn update_employee_rejects_unknown_id() {
    let dir = tempdir().unwrap();
    let directory = dir.path().join("employees.json");

    cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "update-employee",
            "--id",
            "ghost",
            "--last-name",
            "SMITH",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown employee id"));
}

#[test]
fn generate_writes_csv_export() {
    let dir = tempdir().unwrap();
    let directory = dir.path().join("employees.json");
    let out_csv = dir.path().join("roster.csv");

    for (last, position) in [("ALPHA", "GSC"), ("BRAVO", "GSA"), ("CHARLIE", "AGSM")] {
        cli()
            .args([
                "--directory",
                directory.to_str().unwrap(),
                "add-employee",
                "--last-name",
                last,
                "--first-name",
                last,
                "--position",
                position,
            ])
            .assert()
            .success();
    }

    cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "generate",
            "--year",
            "2025",
            "--month",
            "3",
            "--out-csv",
            out_csv.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALPHA"));

    let content = std::fs::read_to_string(&out_csv).unwrap();
    assert!(content.starts_with("LAST NAME,FIRST NAME,POSITION,1,"));
    assert!(content.contains("CHARLIE,CHARLIE,AGSM"));
}

#[test]
fn generate_fails_on_empty_directory() {
    let dir = tempdir().unwrap();
    let directory = dir.path().join("employees.json");

    cli()
        .args([
            "--directory",
            directory.to_str().unwrap(),
            "generate",
            "--year",
            "2025",
            "--month",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no employees found"));
}
