//! Core logging types: task entries, status, and the [`Log`] trait.

/// Task execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable task name.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Optional detail message (e.g., link counts or error description).
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task had nothing to do (e.g., an empty link list).
    NotApplicable,
    /// Task ran in dry-run mode; no changes were applied.
    DryRun,
    /// Task encountered an error.
    Failed,
}

impl TaskStatus {
    /// Summary icon and its ANSI colour.
    pub(super) const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Abstraction over logging backends.
///
/// Task code logs through this trait so tests can capture output without a
/// global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_distinct() {
        let all = [
            TaskStatus::Ok,
            TaskStatus::NotApplicable,
            TaskStatus::DryRun,
            TaskStatus::Failed,
        ];
        let icons: std::collections::HashSet<_> = all.iter().map(|s| s.marker().0).collect();
        assert_eq!(icons.len(), all.len());
    }

    #[test]
    fn failed_is_red() {
        assert_eq!(TaskStatus::Failed.marker(), ("✗", "\x1b[31m"));
    }
}
