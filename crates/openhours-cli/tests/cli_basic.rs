//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway HOME so the
//! user's config is never touched.

use std::path::Path;
use std::process::Command;

use indoc::indoc;
use tempfile::TempDir;

const SHOP: &str = indoc! {r#"
    monday = ["09:00-12:00", "13:00-18:00"]
    tuesday = ["09:00-18:00"]
    wednesday = ["09:00-18:00"]
    thursday = ["09:00-18:00"]
    friday = ["09:00-20:00"]
    saturday = ["10:00-14:00"]
    sunday = []

    [exceptions]
    "2024-12-24" = ["09:00-12:00"]
    "12-25" = []
"#};

/// Run a CLI command with HOME pointed at `home` and return output.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "openhours-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("OPENHOURS_ENV", "dev")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn shop_file(home: &TempDir) -> String {
    let path = home.path().join("shop.toml");
    std::fs::write(&path, SHOP).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_check_open_and_closed() {
    let home = TempDir::new().unwrap();
    let file = shop_file(&home);

    let (code, stdout, _) = run_cli(home.path(), &["check", &file, "--at", "2024-01-01T10:00"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("open at 2024-01-01 10:00"), "{stdout}");

    let (code, stdout, _) = run_cli(home.path(), &["check", &file, "--at", "2024-01-01T12:30"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("closed"), "{stdout}");
}

#[test]
fn test_check_json_uses_exception() {
    let home = TempDir::new().unwrap();
    let file = shop_file(&home);

    let (code, stdout, _) = run_cli(
        home.path(),
        &["check", &file, "--at", "2024-12-24T15:00", "--json"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["open"], false);
    assert_eq!(parsed["hours"], "09:00-12:00");
}

#[test]
fn test_next_open_skips_closed_days() {
    let home = TempDir::new().unwrap();
    let file = shop_file(&home);

    // Saturday afternoon: Sunday is closed, Monday opens at nine.
    let (code, stdout, _) = run_cli(
        home.path(),
        &["next", "open", &file, "--at", "2024-01-06T15:00"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2024-01-08 09:00");
}

#[test]
fn test_next_close() {
    let home = TempDir::new().unwrap();
    let file = shop_file(&home);

    let (code, stdout, _) = run_cli(
        home.path(),
        &["next", "close", &file, "--at", "2024-01-05T10:00", "--json"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["date"], "2024-01-05");
    assert_eq!(parsed["time"], "20:00");
}

#[test]
fn test_closing_days() {
    let home = TempDir::new().unwrap();
    let file = shop_file(&home);

    let (code, stdout, _) = run_cli(home.path(), &["closing-days", &file, "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["weekdays"], serde_json::json!(["sunday"]));
    assert_eq!(parsed["weekdaysIso"], serde_json::json!([7]));
}

#[test]
fn test_export_structured_data() {
    let home = TempDir::new().unwrap();
    let file = shop_file(&home);

    let (code, stdout, _) = run_cli(home.path(), &["export", &file]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records[0]["type"], "OpeningHoursSpecification");
    assert_eq!(records[0]["dayOfWeek"], "Monday");
    assert!(records.iter().any(|r| r["validFrom"] == "--12-25"));
}

#[test]
fn test_validate_rejects_overlap() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.json");
    std::fs::write(&path, r#"{"monday": ["09:00-12:00", "11:00-14:00"]}"#).unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["validate", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stdout.starts_with("invalid"), "{stdout}");

    let (code, stdout, _) = run_cli(home.path(), &["normalize", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["monday"], serde_json::json!(["09:00-14:00"]));
}

#[test]
fn test_import_expression() {
    let home = TempDir::new().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["import", "Mo-Fr 09:00-18:00; Sa 10:00-14:00"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["friday"], serde_json::json!(["09:00-18:00"]));
    assert!(parsed.get("sunday").is_none());

    let (code, _, stderr) = run_cli(home.path(), &["import", "Mo-Fr 09:00-18:00; PH off"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "{stderr}");
}

#[test]
fn test_missing_schedule_file() {
    let home = TempDir::new().unwrap();

    let (code, _, stderr) = run_cli(home.path(), &["check"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("default_schedule"), "{stderr}");
}

#[test]
fn test_config_default_schedule_and_offset() {
    let home = TempDir::new().unwrap();
    let file = shop_file(&home);

    let (code, _, _) = run_cli(home.path(), &["config", "set", "default_schedule", &file]);
    assert_eq!(code, 0);
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "default_schedule"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), file);

    let (code, _, _) = run_cli(home.path(), &["config", "set", "display.utc_offset", "+01:00"]);
    assert_eq!(code, 0);

    // 08:30Z is 09:30 on Monday at +01:00.
    let (code, stdout, _) = run_cli(home.path(), &["check", "--at", "2024-01-01T08:30:00Z"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("open at 2024-01-01 09:30"), "{stdout}");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "display.utc_offset", "noon"]);
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "search.horizon_days"]);
    assert_eq!(stdout.trim(), "366");
}
