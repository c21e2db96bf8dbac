#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `status` command.

mod common;

use common::TestRepo;
use predicates::prelude::*;

#[test]
fn fresh_root_needs_attention() {
    let repo = TestRepo::new();

    repo.cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"))
        .stderr(predicate::str::contains("need attention"));

    assert!(!repo.default_target().exists());
    assert!(!repo.exists(".claude"));
}

#[test]
fn linked_root_is_clean() {
    let repo = TestRepo::new();
    repo.cmd().assert().success();

    repo.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("all links are in place"));
}

#[test]
fn foreign_entry_is_reported_but_not_a_failure() {
    let repo = TestRepo::new().with_config(r#"{"links": ["a/skills", "b/skills"]}"#);
    repo.cmd().assert().success();
    std::fs::remove_file(repo.path("b/skills")).unwrap();
    std::fs::create_dir(repo.path("b/skills")).unwrap();

    repo.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"))
        .stdout(predicate::str::contains("not a link"));
}

#[cfg(unix)]
#[test]
fn stale_link_is_reported() {
    let repo = TestRepo::new().with_dir("old");
    repo.cmd().assert().success();
    std::fs::remove_file(repo.path(".codex/skills")).unwrap();
    std::os::unix::fs::symlink(repo.path("old"), repo.path(".codex/skills")).unwrap();

    repo.cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("points elsewhere"))
        .stderr(predicate::str::contains("1 item(s) need attention"));
}

#[test]
fn status_reports_config_errors() {
    let repo = TestRepo::new().with_config("[]");
    repo.cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}
