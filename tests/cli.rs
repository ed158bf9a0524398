/*!
 * Integration tests for the treedump binary
 */

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn treedump() -> Command {
    Command::cargo_bin("treedump").unwrap()
}

#[test]
fn test_dumps_tree_with_default_exclusions() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("app");
    write(&root.join("src").join("main.rs"), "fn main() {}\n");
    write(&root.join("node_modules").join("dep").join("index.js"), "dep");
    write(&root.join("yarn.lock"), "lock");
    let output = temp_dir.path().join("out.txt");

    treedump()
        .arg(&root)
        .arg(&output)
        .args(["--report", "none"])
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "app/\n    src/\n        main.rs\n        =======\n        fn main() {}\n\n\n"
    );
}

#[test]
fn test_extra_exclusions_from_flags() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("site");
    write(&root.join("public").join("logo.svg"), "<svg/>");
    write(&root.join("styles").join("global.css"), "body {}");
    write(&root.join("index.html"), "<html/>");
    write(&root.join("notes.md"), "notes");
    let output = temp_dir.path().join("out.txt");

    treedump()
        .arg(&root)
        .arg(&output)
        .args(["--exclude-dirs", "public,styles", "--exclude-files", ".md", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("    index.html\n"));
    assert!(!text.contains("public"));
    assert!(!text.contains("styles"));
    assert!(!text.contains("notes.md"));
}

#[test]
fn test_no_default_excludes() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("repo");
    write(&root.join(".gitignore"), "target\n");
    let output = temp_dir.path().join("out.txt");

    treedump()
        .arg(&root)
        .arg(&output)
        .args(["--no-default-excludes", "-q"])
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("    .gitignore\n    ==========\n    target\n\n\n"));
}

#[test]
fn test_dot_root_header_is_shown_as_given() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("proj");
    write(&root.join("a.txt"), "A");
    let output = temp_dir.path().join("out.txt");

    treedump()
        .current_dir(&root)
        .arg(".")
        .arg(&output)
        .args(["--no-default-excludes", "-q"])
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "./\n    a.txt\n    =====\n    A\n\n");
}

#[test]
fn test_json_report() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("proj");
    write(&root.join("a.txt"), "one\ntwo\n");
    let output = temp_dir.path().join("out.txt");

    treedump()
        .arg(&root)
        .arg(&output)
        .args(["--report", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"files_written\": 1"))
        .stdout(predicate::str::contains("\"total_lines\": 2"));
}

#[test]
fn test_missing_source_fails() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.txt");

    treedump()
        .arg(temp_dir.path().join("missing"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));

    assert!(!output.exists());
}

#[test]
fn test_missing_output_directory_fails() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("proj");
    write(&root.join("a.txt"), "a");

    treedump()
        .arg(&root)
        .arg(temp_dir.path().join("nope").join("out.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("output directory"));
}

#[test]
fn test_generate_completions() {
    treedump()
        .args(["--generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("treedump"));
}
