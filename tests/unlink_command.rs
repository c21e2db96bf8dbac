#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `unlink` command.

mod common;

use common::TestRepo;
use predicates::prelude::*;

#[test]
fn removes_links_and_keeps_target() {
    let repo = TestRepo::new().with_file(".skills/review/SKILL.md", "# review");
    repo.cmd().assert().success();

    repo.cmd()
        .arg("unlink")
        .assert()
        .success()
        .stdout(predicate::str::contains("Remove skills links"));

    assert!(!repo.exists(".claude/skills"));
    assert!(!repo.exists(".codex/skills"));
    assert!(repo.path(".skills/review/SKILL.md").is_file());
}

#[test]
fn leaves_foreign_entries_alone() {
    let repo = TestRepo::new()
        .with_dir(".skills")
        .with_file(".claude/skills", "user data");

    repo.cmd().arg("unlink").assert().success();

    assert_eq!(
        std::fs::read_to_string(repo.path(".claude/skills")).unwrap(),
        "user data"
    );
}

#[test]
fn nothing_to_unlink_succeeds() {
    let repo = TestRepo::new();
    repo.cmd().arg("unlink").assert().success();
    assert!(!repo.default_target().exists());
}

#[test]
fn dry_run_keeps_links() {
    let repo = TestRepo::new();
    repo.cmd().assert().success();

    repo.cmd()
        .args(["unlink", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] would unlink"));

    assert!(repo.links_to(".claude/skills", &repo.default_target()));
}

#[cfg(unix)]
#[test]
fn link_to_another_directory_is_kept() {
    let repo = TestRepo::new().with_dir(".skills").with_dir("other");
    std::fs::create_dir_all(repo.path(".claude")).unwrap();
    std::os::unix::fs::symlink(repo.path("other"), repo.path(".claude/skills")).unwrap();

    repo.cmd().arg("unlink").assert().success();

    assert!(repo.links_to(".claude/skills", &repo.path("other")));
}
