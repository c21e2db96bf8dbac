//! Create and remove the links that point at the shared target.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, process_resources_remove};

/// Make every link location point at the target.
///
/// A failure on one link is reported and the remaining links are still
/// processed.
#[derive(Debug)]
pub struct LinkSkills;

impl Task for LinkSkills {
    fn name(&self) -> &str {
        "Link skills directories"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.mappings.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        ctx.log.debug(&format!(
            "{} link(s) via {}",
            ctx.mappings.len(),
            ctx.platform.link_kind()
        ));
        process_resources(ctx, ctx.link_resources(), "link")
    }
}

/// Remove link locations that point at the target, leaving everything else.
#[derive(Debug)]
pub struct UnlinkSkills;

impl Task for UnlinkSkills {
    fn name(&self) -> &str {
        "Remove skills links"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.mappings.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources_remove(ctx, ctx.link_resources(), "unlink")
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::links::LinkMapping;
    use crate::tasks::test_helpers::make_context_at;
    use std::path::{Path, PathBuf};

    fn setup(links: &[&str]) -> (tempfile::TempDir, PathBuf, Vec<LinkMapping>) {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join(".skills");
        std::fs::create_dir(&target).unwrap();
        let mappings = links
            .iter()
            .map(|l| LinkMapping::new(tmp.path().join(l), target.clone()))
            .collect();
        (tmp, target, mappings)
    }

    fn points_at(link: &Path, target: &Path) -> bool {
        std::fs::canonicalize(link).unwrap() == std::fs::canonicalize(target).unwrap()
    }

    #[test]
    fn links_every_mapping_and_is_idempotent() {
        let (tmp, target, mappings) = setup(&[".claude/skills", ".codex/skills"]);
        let (ctx, log) = make_context_at(target.clone(), mappings);

        assert!(matches!(
            LinkSkills.run(&ctx).unwrap(),
            TaskResult::Processed(_)
        ));
        assert!(points_at(&tmp.path().join(".claude/skills"), &target));
        assert!(points_at(&tmp.path().join(".codex/skills"), &target));
        assert!(log.contains("info", "2 changed, 0 already ok"));

        LinkSkills.run(&ctx).unwrap();
        assert!(log.contains("info", "0 changed, 2 already ok"));
    }

    #[test]
    fn foreign_entry_is_skipped_and_others_linked() {
        let (tmp, target, mappings) = setup(&["taken", "free"]);
        std::fs::write(tmp.path().join("taken"), "mine").unwrap();
        let (ctx, log) = make_context_at(target.clone(), mappings);

        assert!(matches!(
            LinkSkills.run(&ctx).unwrap(),
            TaskResult::Processed(_)
        ));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("taken")).unwrap(),
            "mine"
        );
        assert!(points_at(&tmp.path().join("free"), &target));
        assert!(log.contains("warn", "taken"));
        assert!(log.contains("info", "1 changed, 0 already ok, 1 skipped"));
    }

    #[test]
    fn dry_run_creates_nothing() {
        let (tmp, target, mappings) = setup(&["a/skills"]);
        let (mut ctx, log) = make_context_at(target, mappings);
        ctx.dry_run = true;

        assert!(matches!(
            LinkSkills.run(&ctx).unwrap(),
            TaskResult::Processed(_)
        ));
        assert!(!tmp.path().join("a").exists());
        assert!(log.contains("dry_run", "would link"));
    }

    #[test]
    fn unlink_removes_only_our_links() {
        let (tmp, target, mappings) = setup(&["ours", "theirs"]);
        let theirs = tmp.path().join("theirs");
        let (ctx, _log) = make_context_at(target.clone(), mappings);

        LinkSkills.run(&ctx).unwrap();
        std::fs::remove_file(&theirs).unwrap();
        std::os::unix::fs::symlink(tmp.path(), &theirs).unwrap();
        assert!(matches!(
            UnlinkSkills.run(&ctx).unwrap(),
            TaskResult::Processed(_)
        ));

        assert!(std::fs::symlink_metadata(tmp.path().join("ours")).is_err());
        assert!(std::fs::symlink_metadata(&theirs).is_ok());
        assert!(target.is_dir());
    }

    #[test]
    fn nothing_to_do_without_mappings() {
        let (tmp, target, _) = setup(&[]);
        let (ctx, _log) = make_context_at(target, Vec::new());
        assert!(!LinkSkills.should_run(&ctx));
        assert!(!UnlinkSkills.should_run(&ctx));
    }
}
