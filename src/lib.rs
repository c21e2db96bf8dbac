//! Shared skills directory linker.
//!
//! Resolves a root directory, reads an optional `skills-link.json`, and makes
//! each tool-specific skills location (by default `.claude/skills` and
//! `.codex/skills`) a link to one shared directory (by default `.skills`).
//! Symbolic links are used on Unix and junctions on Windows. Every run is
//! idempotent.
//!
//! The public API is organised into layers:
//!
//! - **[`root`]** and **[`config`]**: where to work and what to link
//! - **[`resources`]**: idempotent `check + apply` primitives for the target and each link
//! - **[`tasks`]**: named units of work wired to resources
//! - **[`commands`]**: top-level subcommand orchestration (`link`, `unlink`, `status`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod root;
pub mod tasks;
