//! Integration tests for CLI commands.

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn write_input(lines: &[&str]) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("docs.txt");
    std::fs::write(&path, lines.join("\n")).unwrap();
    (temp_dir, path.to_string_lossy().to_string())
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_tjsonb"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn run_cli_with_stdin(args: &[&str], stdin: &str) -> (bool, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tjsonb"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

#[test]
fn test_normalize_file() {
    let (_temp_dir, path) = write_input(&[
        r#"2024-01-01T10:00:00+02:00|{"speed": 12.50, "tags": ["a"]}"#,
        "",
        "2024-01-02 00:00:00.250|7",
    ]);

    let (success, stdout, _) = run_cli(&["normalize", &path]);
    assert!(success);
    assert_eq!(
        stdout,
        "2024-01-01 08:00:00+00|{\"speed\":12.50,\"tags\":[\"a\"]}\n2024-01-02 00:00:00.25+00|7\n"
    );
}

#[test]
fn test_normalize_styles() {
    let (success, stdout, _) = run_cli_with_stdin(
        &[
            "normalize",
            "--timestamp-style",
            "rfc3339",
            "--json-style",
            "spaced",
            "--default-offset",
            "+01:00",
        ],
        "2024-01-01 01:00:00|{\"a\":[1,2]}\n",
    );
    assert!(success);
    assert_eq!(stdout, "2024-01-01T00:00:00Z|{\"a\": [1, 2]}\n");
}

#[test]
fn test_normalize_json_output() {
    let (success, stdout, _) =
        run_cli_with_stdin(&["normalize", "--json"], "2024-01-01|{\"a\":1}\n");
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["timestamp"], "2024-01-01 00:00:00+00");
    assert_eq!(value["document"]["a"], 1);
}

#[test]
fn test_normalize_json_follows_timestamp_style() {
    let (success, stdout, _) = run_cli_with_stdin(
        &["normalize", "--json", "--timestamp-style", "rfc3339"],
        "2024-01-01 10:00:00.5+02|[1]\n",
    );
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["timestamp"], "2024-01-01T08:00:00.5Z");
    assert_eq!(value["document"][0], 1);
}

#[test]
fn test_normalize_reports_bad_line() {
    let (_temp_dir, path) = write_input(&["2024-01-01|1", "no-delimiter-here"]);
    let (success, _, stderr) = run_cli(&["normalize", &path]);
    assert!(!success);
    assert!(stderr.contains("line 2"));
    assert!(stderr.contains("invalid input format"));
}

#[test]
fn test_normalize_missing_file() {
    let (success, _, stderr) = run_cli(&["normalize", "/nonexistent/docs.txt"]);
    assert!(!success);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_overlaps_command() {
    let (success, stdout, _) = run_cli(&[
        "overlaps",
        r#"2024-01-01 10:00:00+00|{"x": 1, "y": 2}"#,
        r#"2024-01-01T10:00:00Z|{"x": 1}"#,
    ]);
    assert!(success);
    assert_eq!(stdout.trim(), "true");

    let (success, stdout, _) = run_cli(&[
        "overlaps",
        r#"2024-01-01|{"x": 1}"#,
        r#"2024-01-01|{"x": "1"}"#,
    ]);
    assert!(success);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_range_command() {
    let (success, stdout, _) = run_cli(&["range", "2024-01-01|[1, 2]", "2024-02-01|[1, 2]"]);
    assert!(success);
    assert_eq!(stdout.trim(), "Overlap found within range");

    let (success, stdout, _) = run_cli(&["range", "2024-02-01|[1, 2]", "2024-01-01|[1, 2]"]);
    assert!(success);
    assert_eq!(stdout.trim(), "No overlap in specified range");
}

#[test]
fn test_range_rejects_bad_document() {
    let (success, _, stderr) = run_cli(&["range", "2024-01-01|[1", "2024-02-01|[1]"]);
    assert!(!success);
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_average_command() {
    let (_temp_dir, path) = write_input(&["2024-01-01|3", "2024-01-02|\"x\"", "2024-01-03|5"]);
    let (success, stdout, _) = run_cli(&["average", &path]);
    assert!(success);
    assert_eq!(stdout.trim(), "4");
}

#[test]
fn test_average_by_field() {
    let (_temp_dir, path) = write_input(&[
        r#"2024-01-01|{"speed": 10}"#,
        r#"2024-01-02|{"speed": 25}"#,
    ]);
    let (success, stdout, _) = run_cli(&["average", &path]);
    assert!(success);
    assert_eq!(stdout.trim(), "null");

    let (success, stdout, _) = run_cli(&["average", &path, "--field", "speed"]);
    assert!(success);
    assert_eq!(stdout.trim(), "17.5");
}

#[test]
fn test_functions_command() {
    let (success, stdout, _) = run_cli(&["functions"]);
    assert!(success);
    assert!(stdout.contains("tjsonb_in(text) -> tjsonb"));
    assert!(stdout.contains("tjsonb_range(tjsonb, tjsonb) -> text"));
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn test_non_ascii_offset_flag_fails_cleanly() {
    let output = Command::new(env!("CARGO_BIN_EXE_tjsonb"))
        .args(["--default-offset", "+0é0", "functions"])
        .output()
        .expect("Failed to execute CLI");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid UTC offset"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_invalid_offset_flag() {
    let (success, _, stderr) = run_cli(&["--default-offset", "nowhere", "functions"]);
    assert!(!success);
    assert!(stderr.contains("invalid UTC offset"));
}
