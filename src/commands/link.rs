//! Link command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::tasks;

/// Run the link command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the target path is
/// unusable, or any link could not be created.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    super::run_command(global, log, &tasks::link_tasks())
}
