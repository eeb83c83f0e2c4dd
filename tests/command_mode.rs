//! Integration tests for command mode (-c/--command and CSV import/export)

use std::path::Path;
use std::process::Command;

fn run_gridpad(store: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_gridpad"))
        .arg("--store")
        .arg(store)
        // Tests must not depend on a user's ~/.config/gridpad/config.toml.
        .arg("--config")
        .arg(store.join("config.toml"))
        .args(args)
        .output()
        .expect("Failed to execute gridpad");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn small_grid(dir: &Path) {
    std::fs::write(dir.join("config.toml"), "row_limit = 2\ncolumn_limit = 3\n").unwrap();
}

#[test]
fn test_commands_and_print() {
    let dir = tempfile::tempdir().unwrap();
    small_grid(dir.path());
    let (stdout, stderr, code) = run_gridpad(
        dir.path(),
        &["-c", "commit 0-0 AB; commit 0-1 CD; focus 0-0; merge; commit 1-2 z", "--print"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "ABCD,,,\n,,z,\n");
}

#[test]
fn test_state_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    small_grid(dir.path());
    let (_, _, code) = run_gridpad(dir.path(), &["-c", "commit 1-1 kept"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_gridpad(dir.path(), &["--print"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, ",,,\n,kept,,\n");
}

#[test]
fn test_import_and_export() {
    let dir = tempfile::tempdir().unwrap();
    small_grid(dir.path());
    let input = dir.path().join("in.csv");
    std::fs::write(&input, "x,y\nz").unwrap();

    let (stdout, stderr, code) = run_gridpad(
        dir.path(),
        &["-i", input.to_str().unwrap(), "-o", dir.path().to_str().unwrap()],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("excel.csv"));
    let exported = std::fs::read_to_string(dir.path().join("excel.csv")).unwrap();
    assert_eq!(exported, "x,y,,\nz,,,\n");
}

#[test]
fn test_property_without_focus_fails() {
    let dir = tempfile::tempdir().unwrap();
    small_grid(dir.path());
    let (_, stderr, code) = run_gridpad(dir.path(), &["-c", "set bold true"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No focused cell"), "stderr: {}", stderr);
}

#[test]
fn test_bad_colour_fails_and_keeps_earlier_edits() {
    let dir = tempfile::tempdir().unwrap();
    small_grid(dir.path());
    let (_, stderr, code) = run_gridpad(
        dir.path(),
        &["-c", "commit 0-0 kept; focus 0-0; set bg banana"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid property"), "stderr: {}", stderr);

    let (stdout, _, code) = run_gridpad(dir.path(), &["--print"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "kept,,,\n,,,\n");
}

#[test]
fn test_unknown_command_fails() {
    let dir = tempfile::tempdir().unwrap();
    small_grid(dir.path());
    let (_, stderr, code) = run_gridpad(dir.path(), &["-c", "formula 0-0 =A1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown command"), "stderr: {}", stderr);
}
