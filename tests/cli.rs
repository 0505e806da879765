extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn renders_a_png_and_reports_the_render_time() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("out.png");

    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "-o",
            outfile.to_str().unwrap(),
            "-s",
            "64x48",
            "-i",
            "100",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Render time="));

    let metadata = fs::metadata(&outfile).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn threaded_render_still_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("threaded.png");

    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "-o",
            outfile.to_str().unwrap(),
            "-s",
            "32x32",
            "-t",
            "1",
            "-z",
            "10",
            "-c",
            "-0.7435,0.1314",
        ])
        .assert()
        .success();

    assert!(outfile.exists());
}

#[test]
fn rejects_a_malformed_size() {
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", "unused.png", "-s", "700by700"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn rejects_a_non_positive_zoom() {
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", "unused.png", "-z", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Zoom must be a positive number"));
}

#[test]
fn rejects_a_zero_iteration_budget() {
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", "unused.png", "-i", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count must be between"));
}
