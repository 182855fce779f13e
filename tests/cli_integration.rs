//! CLI integration tests
//!
//! Smoke tests for argument handling and the OCR-free command paths.

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;

fn textscrub() -> Command {
    Command::cargo_bin("textscrub").expect("binary builds")
}

#[test]
fn help_lists_subcommands() {
    textscrub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("annotate"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn info_reports_environment() {
    textscrub()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("System Information"))
        .stdout(predicate::str::contains("OCR Tools"))
        .stdout(predicate::str::contains("Config File Locations"));
}

#[test]
fn clean_missing_input_exits_with_not_found() {
    textscrub()
        .args(["clean", "/nonexistent/input.png", "-o", "/tmp/out"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn extract_missing_input_exits_with_not_found() {
    textscrub()
        .args(["extract", "/nonexistent/input.png"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn annotate_missing_input_exits_with_not_found() {
    textscrub()
        .args(["annotate", "/nonexistent/input.png", "--text", "hi"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn clean_rejects_malformed_fill_color() {
    textscrub()
        .args(["clean", "in.png", "--fill", "notacolor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RRGGBB"));
}

#[test]
fn clean_dry_run_prints_plan_without_writing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("sign.png");
    let output_dir = temp_dir.path().join("out");

    RgbImage::from_pixel(32, 32, Rgb([255, 255, 255]))
        .save(&input)
        .unwrap();

    textscrub()
        .args([
            "clean",
            input.to_str().unwrap(),
            "-o",
            output_dir.to_str().unwrap(),
            "--min-confidence",
            "75",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry Run"))
        .stdout(predicate::str::contains("\"min_confidence\": 75"))
        .stdout(predicate::str::contains("sign.png"));

    // Dry run never creates the output directory
    assert!(!output_dir.exists());
}

#[test]
fn clean_directory_without_images_exits_with_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("notes.txt"), b"no images here").unwrap();

    textscrub()
        .args(["clean", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No image files"));
}
