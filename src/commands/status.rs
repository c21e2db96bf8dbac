//! Status command: report every link's state without changing anything.
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};
use crate::resources::{Applicable as _, Resource as _, ResourceState};

/// Run the status command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, or when the target is
/// absent or unusable, or any link is missing, points elsewhere, or cannot
/// be inspected.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = super::CommandSetup::init(global, &**log)?;
    let ctx = setup.into_context(Arc::clone(log) as Arc<dyn Log>, true);
    let mut problems = 0usize;

    ctx.log.stage("Target directory");
    let target = ctx.target_resource();
    match target.current_state() {
        Ok(ResourceState::Correct) => ctx.log.info(&format!("ok: {}", target.description())),
        Ok(ResourceState::Missing) => {
            ctx.log.warn(&format!("missing: {}", target.description()));
            problems += 1;
        }
        Ok(state) => {
            ctx.log.error(&format!(
                "{} exists and is not a directory ({})",
                target.description(),
                state.label()
            ));
            problems += 1;
        }
        Err(e) => {
            ctx.log.error(&format!("{e:#}"));
            problems += 1;
        }
    }

    ctx.log.stage("Links");
    for resource in ctx.link_resources() {
        match resource.current_state() {
            Ok(state) => {
                let line = status_line(&resource.link, &state);
                if is_problem(&state) {
                    problems += 1;
                    ctx.log.warn(&line);
                } else {
                    ctx.log.info(&line);
                }
            }
            Err(e) => {
                problems += 1;
                ctx.log.error(&format!("{e:#}"));
            }
        }
    }

    if problems > 0 {
        anyhow::bail!("{problems} item(s) need attention; run `skills-link link`");
    }
    ctx.log.info("all links are in place");
    Ok(())
}

/// Whether `state` means `link` would change something.
const fn is_problem(state: &ResourceState) -> bool {
    matches!(
        state,
        ResourceState::Missing | ResourceState::Incorrect { .. }
    )
}

/// One aligned status line for a link location.
fn status_line(link: &Path, state: &ResourceState) -> String {
    let detail = match state {
        ResourceState::Correct | ResourceState::Missing => String::new(),
        ResourceState::Incorrect { current } => format!(" (-> {current})"),
        ResourceState::Invalid { reason } => format!(" ({reason})"),
    };
    format!("{:<16} {}{detail}", state.label(), link.display())
}
