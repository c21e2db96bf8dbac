//! Domain-specific error types for skills-link.
//!
//! Internal modules return typed errors while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! - [`ConfigError`]: config file I/O, JSON shape, contradicting targets.
//! - [`LinkError`]: target directory and link location failures.
//!
//! Messages never repeat the underlying I/O or JSON error; it is reachable
//! through `source()` and printed once by `{:#}`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that make the configuration file unusable.
///
/// Every variant is fatal for the run: the intent of the file cannot be
/// known, so no links are touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON.
    #[error("failed to parse {}", path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The config file parsed, but its top level is not an object.
    #[error("{} must be a JSON object", path.display())]
    NotAnObject {
        /// Path of the config file.
        path: PathBuf,
    },

    /// A link entry names a `target` other than the run's target directory.
    #[error(
        "{source_label}[{index}]: target '{entry_target}' does not match the shared target {}",
        expected.display()
    )]
    TargetMismatch {
        /// Where the entry came from (e.g. `skills-link.json:links`).
        source_label: String,
        /// Position of the entry in its list.
        index: usize,
        /// The `target` value exactly as written in the entry.
        entry_target: String,
        /// The resolved target directory for this run.
        expected: PathBuf,
    },
}

/// Errors that arise while preparing the target or reconciling a link.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The target path exists but is neither a directory nor a symlink.
    #[error("target {} exists and is not a directory", path.display())]
    TargetNotDirectory {
        /// The offending target path.
        path: PathBuf,
    },

    /// A link location could not be inspected.
    #[error("failed to inspect {}", path.display())]
    Inspect {
        /// The link location.
        path: PathBuf,
        /// Underlying I/O error (anything other than "not found").
        source: std::io::Error,
    },

    /// Creating a directory or link failed.
    #[error("failed to create {}: {reason}", path.display())]
    Create {
        /// The path being created.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// Removing a stale link failed.
    #[error("failed to remove {}", path.display())]
    Remove {
        /// The link being removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
