// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project root and a fluent builder so
// each integration test can drive the binary against an isolated tree
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;

/// An isolated project root plus a private cache directory for log files.
pub struct TestRepo {
    root: tempfile::TempDir,
    cache: tempfile::TempDir,
}

impl TestRepo {
    /// Create an empty project root.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            cache: tempfile::tempdir().expect("create cache dir"),
        }
    }

    /// Path to the project root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` under the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Default shared target directory.
    pub fn default_target(&self) -> PathBuf {
        self.path(".skills")
    }

    /// Write `skills-link.json` at the root.
    pub fn with_config(self, json: &str) -> Self {
        std::fs::write(self.path("skills-link.json"), json).expect("write config");
        self
    }

    /// Write a regular file at `rel`, creating parent directories.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, content).expect("write file");
        self
    }

    /// Create a directory at `rel`.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.path(rel)).expect("create dir");
        self
    }

    /// The binary with an environment that cannot leak into the host: no
    /// package-manager root variables, no colour, logs in a private cache.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("skills-link");
        cmd.env_remove("INIT_CWD")
            .env_remove("npm_config_local_prefix")
            .env_remove("SKILLS_LINK_LOG")
            .env("NO_COLOR", "1")
            .env("XDG_CACHE_HOME", self.cache.path());
        cmd
    }

    /// The binary pointed at this root via `--root`.
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--root").arg(self.root());
        cmd
    }

    /// Whether `rel` is a link that resolves to `target`.
    pub fn links_to(&self, rel: &str, target: &Path) -> bool {
        let link = self.path(rel);
        let is_link = std::fs::symlink_metadata(&link).is_ok_and(|m| {
            m.file_type().is_symlink() || cfg!(windows) && m.is_dir()
        });
        is_link
            && matches!(
                (std::fs::canonicalize(&link), std::fs::canonicalize(target)),
                (Ok(a), Ok(b)) if a == b
            )
    }

    /// Whether anything (including a dangling link) exists at `rel`.
    pub fn exists(&self, rel: &str) -> bool {
        std::fs::symlink_metadata(self.path(rel)).is_ok()
    }
}
