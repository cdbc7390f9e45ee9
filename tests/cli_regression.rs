// The binary is exercised end to end: discovery, execution, report, exit code.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn koans() -> Command {
    let mut cmd = Command::cargo_bin("koans").unwrap();
    cmd.env_remove("KOANS_LOG");
    cmd
}

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("koans-{}-{name}.yaml", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn fresh_checkout_halts_at_the_first_koan() {
    koans()
        .arg("--color")
        .arg("never")
        .assert()
        .code(1)
        .stdout(
            contains("about_asserts::assert_truth has damaged your karma.")
                .and(contains("expected true, got false"))
                .and(contains("src/lessons/about_asserts.rs"))
                .and(contains("0/21 (0%)")),
        );
}

#[test]
fn no_source_omits_the_snippet() {
    koans()
        .arg("--no-source")
        .assert()
        .code(1)
        .stdout(contains("Please meditate").and(contains("assert_true(false)").not()));
}

#[test]
fn list_prints_lessons_and_succeeds() {
    koans()
        .arg("--list")
        .assert()
        .success()
        .stdout(contains("about_sets").and(contains("about_associated_items")));
}

#[test]
fn manifest_narrows_the_path() {
    let config = temp_config("manifest", "lessons:\n  - about_sets\n");
    koans()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stdout(contains("about_sets::").and(contains("about_asserts").not()));
    let _ = fs::remove_file(config);
}

#[test]
fn unknown_manifest_lesson_is_a_fatal_diagnostic() {
    let config = temp_config("unknown", "lessons: [about_nothing]\n");
    koans()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(contains("koans::config::unknown_lesson"));
    let _ = fs::remove_file(config);
}

#[test]
fn missing_explicit_config_is_fatal() {
    koans()
        .arg("--config")
        .arg("no/such/koans.yaml")
        .assert()
        .code(2)
        .stderr(contains("koans::config::io"));
}

#[test]
fn completed_path_reaches_enlightenment_and_succeeds() {
    let config = temp_config("empty", "lessons: []\n");
    koans()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("You have reached enlightenment"));
    let _ = fs::remove_file(config);
}
