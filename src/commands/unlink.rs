//! Unlink command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::tasks;

/// Run the unlink command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any link could not be
/// removed.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    super::run_command(global, log, &tasks::unlink_tasks())
}
