//! Single-resource processing: check state, apply or remove one resource.
//!
//! Nothing here returns an error. A failing resource is logged and counted
//! so the loop can move on to the next one.

use super::{Context, TaskStats};
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Check one resource and bring it to its desired state, returning a stats
/// delta.
pub(super) fn process_single<R: Resource>(ctx: &Context, resource: &R, verb: &str) -> TaskStats {
    let desc = resource.description();
    let resource_state = match resource.current_state() {
        Ok(state) => state,
        Err(e) => return fail(ctx, verb, &desc, &e),
    };
    ctx.log.debug(&format!("{desc} state={resource_state:?}"));
    let mut delta = TaskStats::new();
    match resource_state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {desc}"));
            delta.already_ok += 1;
        }
        ResourceState::Invalid { reason } => {
            ctx.log.warn(&format!("skipping {desc}: {reason}"));
            delta.skipped += 1;
        }
        ResourceState::Incorrect { current } if ctx.dry_run => {
            ctx.log
                .dry_run(&format!("would {verb} {desc} (currently {current})"));
            delta.changed += 1;
        }
        ResourceState::Missing if ctx.dry_run => {
            ctx.log.dry_run(&format!("would {verb}: {desc}"));
            delta.changed += 1;
        }
        ResourceState::Missing | ResourceState::Incorrect { .. } => {
            delta += apply_resource(ctx, resource, verb);
        }
    }
    delta
}

/// Apply a single resource change, returning a stats delta.
pub(super) fn apply_resource<R: Resource>(ctx: &Context, resource: &R, verb: &str) -> TaskStats {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    match resource.apply() {
        Ok(ResourceChange::Applied) => {
            ctx.log.info(&format!("{verb}: {desc}"));
            delta.changed += 1;
        }
        Ok(ResourceChange::AlreadyCorrect) => {
            delta.already_ok += 1;
        }
        Ok(ResourceChange::Skipped { reason }) => {
            ctx.log.warn(&format!("skipping {desc}: {reason}"));
            delta.skipped += 1;
        }
        Err(e) => return fail(ctx, verb, &desc, &e),
    }
    delta
}

/// Remove a single resource if it is ours, returning a stats delta.
///
/// Only resources in [`ResourceState::Correct`] are removed; anything else
/// is left in place.
pub(super) fn remove_single<R: Resource>(ctx: &Context, resource: &R, verb: &str) -> TaskStats {
    let desc = resource.description();
    let current = match resource.current_state() {
        Ok(state) => state,
        Err(e) => return fail(ctx, verb, &desc, &e),
    };
    let mut delta = TaskStats::new();
    match current {
        ResourceState::Correct if ctx.dry_run => {
            ctx.log.dry_run(&format!("would {verb}: {desc}"));
            delta.changed += 1;
        }
        ResourceState::Correct => match resource.remove() {
            Ok(ResourceChange::Applied) => {
                ctx.log.info(&format!("{verb}: {desc}"));
                delta.changed += 1;
            }
            Ok(ResourceChange::AlreadyCorrect) => delta.already_ok += 1,
            Ok(ResourceChange::Skipped { reason }) => {
                ctx.log.debug(&format!("leaving {desc}: {reason}"));
                delta.skipped += 1;
            }
            Err(e) => return fail(ctx, verb, &desc, &e),
        },
        ResourceState::Missing => {
            delta.already_ok += 1;
        }
        ResourceState::Incorrect { current } => {
            ctx.log
                .debug(&format!("leaving {desc}: points to {current}"));
            delta.skipped += 1;
        }
        ResourceState::Invalid { reason } => {
            ctx.log.debug(&format!("leaving {desc}: {reason}"));
            delta.skipped += 1;
        }
    }
    delta
}

/// Log `err` and count one failure.
fn fail(ctx: &Context, verb: &str, desc: &str, err: &anyhow::Error) -> TaskStats {
    ctx.log.error(&format!("failed to {verb} {desc}: {err:#}"));
    TaskStats {
        failed: 1,
        ..TaskStats::default()
    }
}
