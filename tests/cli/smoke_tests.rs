use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

use crate::common::create_sized_file;

fn dwalk() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dwalk"))
}

fn sample_tree() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    create_sized_file(dir.path(), "small.txt", 10);
    create_sized_file(dir.path(), "medium.bin", 2000);
    create_sized_file(dir.path(), "large.bin", (2 << 20) + 1);
    dir
}

#[test]
fn shows_help() {
    dwalk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dwalk"))
        .stdout(predicate::str::contains("--distribution"));
}

#[test]
fn requires_a_path() {
    dwalk().assert().failure();
}

#[test]
fn prints_user_distribution() {
    let dir = sample_tree();
    dwalk()
        .args(["-q", "--type", "f", "--distribution", "size:1KB,1MB"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 3"))
        .stdout(predicate::str::contains("Range                       Number"))
        .stdout(predicate::str::contains("[   0.000  B -   1.000 KB ) 1"))
        .stdout(predicate::str::contains("[   1.000 KB -   1.000 MB ) 1"))
        .stdout(predicate::str::contains("[   1.000 MB -        MAX ) 1"));
}

#[test]
fn file_histogram_uses_derived_ceiling() {
    let dir = sample_tree();
    dwalk()
        .args(["-q", "--type", "f", "--file-histogram"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[   1.000 MB -   1.000 GB ) 1"))
        .stdout(predicate::str::contains("MAX").not());
}

#[test]
fn rejects_duplicate_separator() {
    dwalk()
        .args(["--distribution", "size:100,50,100", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicated separator"));
}

#[test]
fn size_filter_narrows_the_summary() {
    let dir = sample_tree();
    dwalk()
        .args(["-q", "--type", "f", "--size", "-1KB"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 1"))
        .stdout(predicate::str::contains("Data: 10.000 B"));
}

#[test]
fn print_lists_filtered_entries() {
    let dir = sample_tree();
    dwalk()
        .args(["-q", "--print", "--type", "f", "--sort", "-size"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("large.bin"))
        .stdout(predicate::str::contains("small.txt"));
}

#[test]
fn text_output_writes_listing_file() {
    let dir = sample_tree();
    let out = tempdir().unwrap();
    let list = out.path().join("list.txt");
    dwalk().args(["-q", "--type", "f", "--text-output"]).arg(&list).arg(dir.path()).assert().success();

    let text = std::fs::read_to_string(&list).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().all(|line| line.starts_with("f ")));
}

#[test]
fn json_format_reports_summary_and_rows() {
    let dir = sample_tree();
    let output = dwalk()
        .args(["-q", "--format", "json", "--type", "f", "-d", "size:1MB"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["files"], 3);
    assert_eq!(json["distribution"]["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["distribution"]["source"]["mode"], "user");
}

#[test]
fn missing_reference_file_fails() {
    let dir = sample_tree();
    dwalk()
        .args(["--anewer", "/nonexistent/reference"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("can't find file"));
}

#[test]
fn missing_root_fails() {
    let dir = tempdir().unwrap();
    dwalk().arg(dir.path().join("absent")).assert().failure();
}
