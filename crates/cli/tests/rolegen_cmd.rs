//! CLI tests for the `rolegen` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::cargo;

const IDL: &str = "\
interface nsIAccessibleRole : nsISupports
{
  const unsigned long ROLE_NOTHING = 0;
  const unsigned long ROLE_TITLEBAR = 1;
};
";

fn rolegen_cmd() -> Command {
    Command::new(cargo::cargo_bin!("rolegen"))
}

fn write_temp_idl(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roles.idl");
    fs::write(&path, content).expect("write temp idl");
    (dir, path)
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn default_input_path_prints_header_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let idl = dir.path().join("accessible/interfaces/nsIAccessibleRole.idl");
    fs::create_dir_all(idl.parent().unwrap()).unwrap();
    fs::write(&idl, IDL).unwrap();

    let output = rolegen_cmd()
        .current_dir(dir.path())
        .output()
        .expect("run rolegen");

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("/* THIS FILE IS AUTOGENERATED - DO NOT EDIT */\n"));
    assert!(stdout.contains("  NOTHING = 0,\n  TITLEBAR = 1,\n  LAST_ROLE = TITLEBAR\n};\n"));
    assert!(stdout.ends_with("#endif\n"));
}

#[test]
fn missing_input_fails_with_path_in_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = rolegen_cmd()
        .current_dir(dir.path())
        .output()
        .expect("run rolegen");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("nsIAccessibleRole.idl"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn no_declarations_fails_without_stdout() {
    let (_dir, idl) = write_temp_idl("interface nsIFoo : nsISupports {};\n");
    let output = rolegen_cmd()
        .args(["--input", arg(&idl)])
        .output()
        .expect("run rolegen");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial header may be printed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no role declarations found"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn output_file_is_written_then_left_unchanged() {
    let (dir, idl) = write_temp_idl(IDL);
    let header = dir.path().join("gen/Role.h");

    let first = rolegen_cmd()
        .args(["--input", arg(&idl), "--output", arg(&header)])
        .output()
        .expect("run rolegen");
    assert!(first.status.success());
    assert!(first.stdout.is_empty());
    assert!(String::from_utf8_lossy(&first.stderr).contains("generated: "));
    let written = fs::read_to_string(&header).expect("header written");
    assert!(written.contains("  LAST_ROLE = TITLEBAR\n"));

    let second = rolegen_cmd()
        .args(["--input", arg(&idl), "--output", arg(&header)])
        .output()
        .expect("run rolegen");
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("unchanged: "));
    assert_eq!(fs::read_to_string(&header).unwrap(), written);
}

#[test]
fn check_reports_fresh_stale_and_missing() {
    let (dir, idl) = write_temp_idl(IDL);
    let header = dir.path().join("Role.h");

    let missing = rolegen_cmd()
        .args(["--input", arg(&idl), "--output", arg(&header), "--check"])
        .output()
        .expect("run rolegen --check");
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("missing: "));
    assert!(!header.exists(), "--check must not write");

    let write = rolegen_cmd()
        .args(["--input", arg(&idl), "--output", arg(&header)])
        .output()
        .expect("run rolegen");
    assert!(write.status.success());

    let fresh = rolegen_cmd()
        .args(["--input", arg(&idl), "--output", arg(&header), "--check"])
        .output()
        .expect("run rolegen --check");
    assert!(fresh.status.success());
    assert!(String::from_utf8_lossy(&fresh.stderr).contains("up to date: "));

    fs::write(
        &idl,
        format!("{IDL}const unsigned long ROLE_MENUBAR = 2;\n"),
    )
    .unwrap();
    let stale = rolegen_cmd()
        .args(["--input", arg(&idl), "--output", arg(&header), "--check"])
        .output()
        .expect("run rolegen --check");
    assert_eq!(stale.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&stale.stderr).contains("out of date: "));
}

#[test]
fn check_requires_output() {
    let (_dir, idl) = write_temp_idl(IDL);
    let output = rolegen_cmd()
        .args(["--input", arg(&idl), "--check"])
        .output()
        .expect("run rolegen --check");
    assert!(!output.status.success());
}

#[test]
fn layout_file_overrides_names() {
    let (dir, idl) = write_temp_idl(IDL);
    let layout = dir.path().join("layout.json");
    fs::write(
        &layout,
        r#"{ "namespaces": ["a11y"], "enum_name": "Kind", "alias": "kind" }"#,
    )
    .unwrap();

    let output = rolegen_cmd()
        .args(["--input", arg(&idl), "--layout", arg(&layout)])
        .output()
        .expect("run rolegen --layout");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("namespace a11y {\n\nenum Kind {\n"));
    assert!(stdout.contains("typedef enum a11y::Kind kind;\n"));
}

#[test]
fn invalid_layout_file_is_reported() {
    let (dir, idl) = write_temp_idl(IDL);
    let layout = dir.path().join("layout.json");
    fs::write(&layout, r#"{ "guard": "not a macro" }"#).unwrap();

    let output = rolegen_cmd()
        .args(["--input", arg(&idl), "--layout", arg(&layout)])
        .output()
        .expect("run rolegen --layout");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid layout file"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("invalid guard"), "unexpected stderr: {stderr}");
}
