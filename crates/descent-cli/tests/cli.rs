#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for the descent CLI

use assert_cmd::Command;
use descent_test_utils::{CubeFixture, HogFixture, LevelFixture, scramble_text};
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn cube_level() -> Vec<u8> {
    let (fixture, corners) = LevelFixture::new().unit_box((0.0, 0.0, 0.0));
    fixture.cube(CubeFixture::exterior(corners)).build()
}

fn sample_hog() -> NamedTempFile {
    HogFixture::new()
        .entry("briefing.txb", &scramble_text(b"Find the exit\n"))
        .entry("level01.rdl", &cube_level())
        .entry("level02.rdl", &cube_level())
        .write_temp()
        .unwrap()
}

fn descent() -> Command {
    let mut cmd = Command::cargo_bin("descent").unwrap();
    cmd.env_remove("DESCENT_HOG")
        .env_remove("DESCENT_OUTPUT_DIR")
        .env_remove("DESCENT_MAX_INPUT_BYTES")
        .env_remove("DESCENT_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    descent()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("export-all"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("dump"));
}

#[test]
fn test_version_command() {
    descent()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("descent"));
}

#[test]
fn test_list() {
    let hog = sample_hog();
    descent()
        .arg(hog.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Name          Size\n"))
        .stdout(predicate::str::contains("level02.rdl   "))
        .stdout(predicate::str::ends_with("3 entries\n"));
}

#[test]
fn test_hog_path_from_environment() {
    let hog = sample_hog();
    descent()
        .env("DESCENT_HOG", hog.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("briefing.txb"));
}

#[test]
fn test_export_default_level_to_stdout() {
    let hog = sample_hog();
    descent()
        .arg(hog.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ply\nformat ascii 1.0\n"))
        .stdout(predicate::str::contains(
            "comment An exported Descent 1 level (level02.rdl)",
        ))
        .stdout(predicate::str::contains("element face 6"));
}

#[test]
fn test_export_vertices_only_to_file() {
    let hog = sample_hog();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("mesh.ply");

    descent()
        .arg(hog.path())
        .args(["export", "--entry", "LEVEL01.RDL", "--vertices-only", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let ply = std::fs::read_to_string(&output).unwrap();
    assert!(ply.contains("element vertex 8"));
    assert!(!ply.contains("element face"));
}

#[test]
fn test_export_all_writes_files() {
    let hog = sample_hog();
    let dir = tempfile::tempdir().unwrap();

    descent()
        .arg(hog.path())
        .arg("export-all")
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing out level01.ply"))
        .stdout(predicate::str::contains("Writing out level02.ply"));

    assert!(dir.path().join("level01.ply").is_file());
    assert!(dir.path().join("level02.ply").is_file());
}

#[test]
fn test_export_all_reports_each_failure_once() {
    let (fixture, mut corners) = LevelFixture::new().unit_box((0.0, 0.0, 0.0));
    corners[7] = 500;
    let broken = fixture.cube(CubeFixture::exterior(corners)).build();
    let hog = HogFixture::new()
        .entry("level01.rdl", &cube_level())
        .entry("level02.rdl", &broken)
        .write_temp()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let assert = descent()
        .arg(hog.path())
        .arg("export-all")
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("Writing out level01.ply\n");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("skipping level").count(), 1);
    assert!(stderr.contains("level02.rdl"));
    assert!(!dir.path().join("level02.ply").exists());
}

#[test]
fn test_text_uses_output_dir_from_environment() {
    let hog = sample_hog();
    let dir = tempfile::tempdir().unwrap();

    descent()
        .env("DESCENT_OUTPUT_DIR", dir.path())
        .arg(hog.path())
        .arg("text")
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing out briefing.txt"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("briefing.txt")).unwrap(),
        "Find the exit\n"
    );
}

#[test]
fn test_extract() {
    let hog = sample_hog();
    let dir = tempfile::tempdir().unwrap();

    descent()
        .arg(hog.path())
        .args(["extract", "-d"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        std::fs::read(dir.path().join("level01.rdl")).unwrap(),
        cube_level()
    );
}

#[test]
fn test_dump() {
    let hog = sample_hog();
    descent()
        .arg(hog.path())
        .args(["dump", "--entry", "level01.rdl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertex count: 8"))
        .stdout(predicate::str::contains("Cube count: 1"));
}

#[test]
fn test_missing_file() {
    descent()
        .args(["/nonexistent/descent.hog", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HOG file not found"));
}

#[test]
fn test_not_a_hog_file() {
    let mut file = NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"LVLP not a container").unwrap();

    descent()
        .arg(file.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a HOG file"));
}

#[test]
fn test_input_size_limit() {
    let hog = sample_hog();
    descent()
        .arg(hog.path())
        .args(["--max-input-bytes", "16", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("above the limit of 16 bytes"));
}

#[test]
fn test_missing_entry() {
    let hog = sample_hog();
    descent()
        .arg(hog.path())
        .args(["export", "--entry", "level99.rdl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no entry named level99.rdl"));
}

#[test]
fn test_invalid_command() {
    let hog = sample_hog();
    descent()
        .arg(hog.path())
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
