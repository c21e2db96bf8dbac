//! Generic resource processing loop: check state, apply or remove, collect stats.
//!
//! Single-resource handling lives in [`apply`]; this module owns the loop,
//! and the counters.

mod apply;

use std::fmt::Write as _;

use anyhow::Result;

use crate::resources::Resource;
use crate::tasks::Context;

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use skills_link::tasks::{TaskResult, TaskStats};
///
/// let linked = TaskResult::Processed(TaskStats { changed: 2, ..TaskStats::default() });
///
/// assert!(matches!(TaskResult::Ok, TaskResult::Ok));
/// assert!(matches!(linked, TaskResult::Processed(s) if s.changed == 2));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task ran in dry-run mode.
    DryRun,
    /// Task processed a batch of links; the counts end up in the summary.
    Processed(TaskStats),
}

/// Counters for tasks that process many links.
///
/// # Examples
///
/// ```
/// use skills_link::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 1, already_ok: 2, skipped: 0, failed: 0 };
/// assert_eq!(stats.summary(false), "1 changed, 2 already ok");
/// assert_eq!(stats.summary(true), "1 would change, 2 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of items created, replaced, or removed.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items deliberately left untouched.
    pub skipped: u32,
    /// Number of items that hit an unexpected error.
    pub failed: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        let mut out = format!("{} {verb}, {} already ok", self.changed, self.already_ok);
        if self.skipped > 0 {
            let _ = write!(out, ", {} skipped", self.skipped);
        }
        if self.failed > 0 {
            let _ = write!(out, ", {} failed", self.failed);
        }
        out
    }

    /// Log the counts and hand them back as [`TaskResult::Processed`].
    ///
    /// # Errors
    ///
    /// Returns an error carrying the summary when any item failed, so the
    /// task is recorded as failed once every item has been attempted.
    pub fn finish(self, ctx: &Context) -> Result<TaskResult> {
        let summary = self.summary(ctx.dry_run);
        if self.failed > 0 {
            anyhow::bail!("{summary}");
        }
        ctx.log.info(&summary);
        Ok(TaskResult::Processed(self))
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Check every resource and bring it to its desired state.
///
/// A resource that fails is logged and counted; the rest are still
/// processed. `verb` names the action in log lines (e.g. "link").
///
/// # Errors
///
/// Returns an error once all resources were attempted if any of them
/// failed.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        stats += apply::process_single(ctx, &resource, verb);
    }
    stats.finish(ctx)
}

/// Process resources for removal.
///
/// Only resources in [`ResourceState::Correct`](crate::resources::ResourceState::Correct)
/// are removed; everything else is left in place.
///
/// # Errors
///
/// Returns an error once all resources were attempted if any removal
/// failed.
pub fn process_resources_remove<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        stats += apply::remove_single(ctx, &resource, verb);
    }
    stats.finish(ctx)
}
