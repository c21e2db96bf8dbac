//! Shared execution context for tasks.
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::links::LinkMapping;
use crate::logging::Log;
use crate::platform::Platform;
use crate::resources::skill_link::SkillLinkResource;
use crate::resources::target_dir::TargetDirResource;

/// Shared context for task execution.
pub struct Context {
    /// The single shared target directory.
    pub target: PathBuf,
    /// Resolved link locations, each pointing at `target`.
    pub mappings: Vec<LinkMapping>,
    /// Detected platform information.
    pub platform: Platform,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("target", &self.target)
            .field("mappings", &self.mappings)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub const fn new(
        target: PathBuf,
        mappings: Vec<LinkMapping>,
        platform: Platform,
        log: Arc<dyn Log>,
        dry_run: bool,
    ) -> Self {
        Self {
            target,
            mappings,
            platform,
            log,
            dry_run,
        }
    }

    /// Resource for the shared target directory.
    #[must_use]
    pub fn target_resource(&self) -> TargetDirResource {
        TargetDirResource::new(self.target.clone())
    }

    /// One link resource per mapping, in configuration order.
    #[must_use]
    pub fn link_resources(&self) -> Vec<SkillLinkResource> {
        let kind = self.platform.link_kind();
        self.mappings
            .iter()
            .map(|m| SkillLinkResource::from_mapping(m, kind))
            .collect()
    }
}
