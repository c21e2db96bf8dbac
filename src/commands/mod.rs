//! Top-level subcommand orchestration.
pub mod link;
pub mod status;
pub mod unlink;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::links::{self, LinkMapping};
use crate::config::{self, ConfigFile};
use crate::logging::{Log, Logger, TaskStatus};
use crate::platform::Platform;
use crate::root;
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
///
/// Resolves the root, loads the config, and computes the target and the
/// link mappings so each command starts from the same place.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected platform.
    pub platform: Platform,
    /// Resolved target directory.
    pub target: PathBuf,
    /// Link mappings, duplicates removed.
    pub mappings: Vec<LinkMapping>,
}

impl CommandSetup {
    /// Resolve the root, load the config file, and build the mappings.
    ///
    /// Configuration warnings are logged; they never fail the setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable, is not a JSON
    /// object, or has an entry whose `target` contradicts the shared target.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let platform = Platform::detect();
        let root = root::resolve_root_with_override(global.root.as_deref());
        log.debug(&format!("root: {}", root.display()));

        log.stage("Loading configuration");
        let config_file = config::load(&root)?;
        match &config_file {
            ConfigFile::Missing => log.info(&format!(
                "no {} found, using defaults",
                config::CONFIG_FILE_NAME
            )),
            ConfigFile::Loaded(_) => log.info(&format!(
                "loaded {}",
                config::config_path(&root).display()
            )),
        }

        let target = config::resolve_target(config_file.config(), &root);
        log.info(&format!("target: {}", target.display()));

        let plan = links::build_mappings(&config_file, &target, &root)?;
        if !plan.warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                plan.warnings.len()
            ));
            for warning in &plan.warnings {
                log.warn(&format!("  {warning}"));
            }
        }
        log.debug(&format!("{} link location(s)", plan.mappings.len()));

        Ok(Self {
            platform,
            target,
            mappings: plan.mappings,
        })
    }

    /// Turn the setup into a task [`Context`].
    #[must_use]
    pub fn into_context(self, log: Arc<dyn Log>, dry_run: bool) -> Context {
        Context::new(self.target, self.mappings, self.platform, log, dry_run)
    }
}

/// Execute tasks in order, print the summary, and bail if any task failed.
///
/// A failed prerequisite task stops the tasks after it.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        let status = tasks::execute(task, ctx);
        if status == TaskStatus::Failed && task.is_prerequisite() {
            log.debug(&format!("{} failed; stopping", task.name()));
            break;
        }
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}

/// Run the common setup, then `tasks`.
fn run_command(global: &GlobalOpts, log: &Arc<Logger>, tasks: &[Box<dyn Task>]) -> Result<()> {
    let setup = CommandSetup::init(global, &**log)?;
    let ctx = setup.into_context(Arc::clone(log) as Arc<dyn Log>, global.dry_run);
    if ctx.dry_run {
        log.info("dry run: no changes will be made");
    }
    run_tasks_to_completion(tasks.iter().map(Box::as_ref), &ctx, log)
}
