// tests/smoke_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

fn run_devrank(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_devrank"))
        .args(args)
        .output()
        .expect("failed to execute devrank")
}

fn write_fixtures(dir: &Path) -> (String, String) {
    let catalog = dir.join("devices.csv");
    let log = dir.join("installs.csv");
    fs::write(
        &catalog,
        "Acme,Phone One,AC1,M1\nAcme,Phone One,AC2,M2\nOther,Tablet,OT1,M3\n",
    )
    .unwrap();
    fs::write(
        &log,
        "app,date,CODE,a,b,c,d,e,f,INSTALLS\n\
         app,2020-01-01,AC1,a,b,c,d,e,f,3\n\
         app,2020-01-02,AC2,a,b,c,d,e,f,7\n\
         app,2020-01-03,OT1,a,b,c,d,e,f,2\n\
         app,2020-01-04,ZZZ,a,b,c,d,e,f,8\n",
    )
    .unwrap();
    (
        catalog.to_str().unwrap().to_string(),
        log.to_str().unwrap().to_string(),
    )
}

#[test]
fn test_json_output_end_to_end() {
    let d = tempfile::tempdir().unwrap();
    let (catalog, log) = write_fixtures(d.path());

    let output = run_devrank(&[&catalog, &log, "--format", "json"]);
    assert!(
        output.status.success(),
        "devrank failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout was not valid JSON");
    assert_eq!(value["total_installs"], 20);

    let rows = value["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // phone_one (10) outranks tablet (2); the unknown 8 never shows up.
    assert_eq!(rows[0]["devices"], "Phone One");
    assert_eq!(rows[0]["installs"], 10);
    assert_eq!(rows[0]["running_pct"], 50);
    assert_eq!(rows[1]["installs"], 2);
    assert_eq!(rows[1]["running_total"], 12);
    assert_eq!(rows[1]["running_pct"], 60);
}

#[test]
fn test_table_output_end_to_end() {
    let d = tempfile::tempdir().unwrap();
    let (catalog, log) = write_fixtures(d.path());

    let output = run_devrank(&[&catalog, &log]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Phone One"));
    assert!(stdout.contains("Total installs: 20"));
}

#[test]
fn test_limit_truncates_rows() {
    let d = tempfile::tempdir().unwrap();
    let (catalog, log) = write_fixtures(d.path());

    let output = run_devrank(&[&catalog, &log, "--format", "json", "--limit", "1"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_input_fails_with_context() {
    let d = tempfile::tempdir().unwrap();
    let (catalog, _) = write_fixtures(d.path());
    let missing = d.path().join("nope.csv");

    let output = run_devrank(&[&catalog, missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("I/O error"));
    assert!(stderr.contains("nope.csv"));
}
