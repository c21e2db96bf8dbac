//! Make sure the shared target directory exists.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::{Applicable as _, ResourceState};

/// Create the target directory when absent; reject a path occupied by
/// anything other than a directory or a link.
#[derive(Debug)]
pub struct EnsureTargetDir;

impl Task for EnsureTargetDir {
    fn name(&self) -> &str {
        "Prepare target directory"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn is_prerequisite(&self) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resource = ctx.target_resource();
        match resource.checked_state()? {
            ResourceState::Missing if ctx.dry_run => {
                ctx.log
                    .dry_run(&format!("would create {}", resource.description()));
                Ok(TaskResult::DryRun)
            }
            ResourceState::Missing => {
                resource.apply()?;
                ctx.log.info(&format!("created {}", resource.description()));
                Ok(TaskResult::Ok)
            }
            _ => {
                ctx.log.debug(&format!("ok: {}", resource.description()));
                Ok(TaskResult::Ok)
            }
        }
    }
}
