//! Named tasks that orchestrate resource changes.
pub mod context;
pub mod links;
mod processing;
pub mod target;

pub use context::Context;
pub use processing::{TaskResult, TaskStats, process_resources, process_resources_remove};

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has anything to do for this run.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Whether a failure of this task must stop the tasks after it.
    fn is_prerequisite(&self) -> bool {
        false
    }

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails, for example when the target path
    /// is unusable or a link could not be changed.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The tasks run by the `link` command, in order.
#[must_use]
pub fn link_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(target::EnsureTargetDir),
        Box::new(links::LinkSkills),
    ]
}

/// The tasks run by the `unlink` command, in order.
#[must_use]
pub fn unlink_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(links::UnlinkSkills)]
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) -> TaskStatus {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return TaskStatus::NotApplicable;
    }

    ctx.log.stage(task.name());

    let (status, message) = match task.run(ctx) {
        Ok(TaskResult::Ok) => (TaskStatus::Ok, None),
        Ok(TaskResult::DryRun) => (TaskStatus::DryRun, None),
        Ok(TaskResult::Processed(counts)) => {
            let outcome = if ctx.dry_run {
                TaskStatus::DryRun
            } else {
                TaskStatus::Ok
            };
            (outcome, Some(counts.summary(ctx.dry_run)))
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            (TaskStatus::Failed, Some(format!("{e:#}")))
        }
    };
    ctx.log.record_task(task.name(), status, message.as_deref());
    status
}
