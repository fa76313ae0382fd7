//! # Coach CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `coach` command line: standard flags, the
//! `help` subcommand and argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_main_help() {
    coach_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: coach"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("srv"));
}

#[test]
fn test_main_version() {
    coach_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_subcommand() {
    coach_cmd()
        .args(["help", "chat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-delay"))
        .stdout(predicate::str::contains("--seed"));
}

#[test]
fn test_missing_subcommand_fails() {
    coach_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: coach"));
}

#[test]
fn test_unknown_subcommand_fails() {
    coach_cmd()
        .arg("interview")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
