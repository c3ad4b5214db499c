#![allow(clippy::unwrap_used)] // okay in tests

use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn chronobox(args: &[&str]) -> Output {
    Command::cargo_bin("chronobox")
        .unwrap()
        .args(args)
        .env_remove("CHRONOBOX__TEXT_CODEC__TIMESTAMP_OFFSET_MINUTES")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(output.status.success(), "command failed: {output:?}");
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn it_parses_and_prints() {
    let output = chronobox(&["parse", "tbox((1.0,2021-01-01),(2,2021-01-02))"]);

    assert_eq!(
        stdout(&output),
        "TBOX((1,2021-01-01 00:00:00+00),(2,2021-01-02 00:00:00+00))\n"
    );
}

#[test]
fn it_normalizes_periods_from_stdin() {
    let mut child = Command::cargo_bin("chronobox")
        .unwrap()
        .arg("normalize")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"[2021-01-02, 2021-01-03]\n(2021-01-01, 2021-01-02)\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(
        stdout(&output),
        "(2021-01-01 00:00:00+00, 2021-01-03 00:00:00+00]\n"
    );
}

#[test]
fn it_evaluates_predicates() {
    let output = chronobox(&[
        "predicate",
        "overlaps",
        "STBOX T((1,1,2021-01-01),(2,2,2021-01-02))",
        "STBOX((1.5,1.5),(3,3))",
    ]);

    assert_eq!(stdout(&output), "true\n");
}

#[test]
fn it_intersects_and_unites() {
    assert_eq!(
        stdout(&chronobox(&["intersect", "TBOX((1,),(2,))", "TBOX((3,),(4,))"])),
        "empty\n"
    );
    assert_eq!(
        stdout(&chronobox(&["union", "TBOX((1,),(3,))", "TBOX((2,),(4,))"])),
        "TBOX((1,),(4,))\n"
    );
}

#[test]
fn it_round_trips_binary() {
    let encoded = stdout(&chronobox(&["binary", "encode", "[2021-01-01, 2021-01-02)"]));
    let decoded = stdout(&chronobox(&["binary", "decode", encoded.trim()]));

    assert_eq!(decoded, "[2021-01-01 00:00:00+00, 2021-01-02 00:00:00+00)\n");
}

#[test]
fn it_uses_the_configured_offset() {
    let output = Command::cargo_bin("chronobox")
        .unwrap()
        .args(["parse", "[2021-01-01 00:00:00+00, 2021-01-02 00:00:00+00]"])
        .env("CHRONOBOX__TEXT_CODEC__TIMESTAMP_OFFSET_MINUTES", "60")
        .output()
        .unwrap();

    assert_eq!(
        stdout(&output),
        "[2021-01-01 01:00:00+01, 2021-01-02 01:00:00+01]\n"
    );
}

#[test]
fn it_reports_errors() {
    let output = chronobox(&["union", "TBOX((1,),(2,))", "TBOX((3,),(4,))"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("neither intersecting nor contiguous"), "{stderr}");
}
