//! Link from a tool-specific skills location to the shared target.
use anyhow::Result;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::helpers::fs::{
    create_dir_link, ensure_parent_dir, is_link, link_value, paths_equal, remove_link,
    resolve_link_destination,
};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::links::LinkMapping;
use crate::error::LinkError;
use crate::platform::LinkKind;

/// A directory link that should point at the shared target.
#[derive(Debug, Clone)]
pub struct SkillLinkResource {
    /// Where the link lives.
    pub link: PathBuf,
    /// What the link must resolve to.
    pub target: PathBuf,
    /// Kind of link to create.
    pub kind: LinkKind,
}

impl SkillLinkResource {
    /// Create a new link resource.
    #[must_use]
    pub const fn new(link: PathBuf, target: PathBuf, kind: LinkKind) -> Self {
        Self { link, target, kind }
    }

    /// Build a resource from a resolved mapping.
    #[must_use]
    pub fn from_mapping(mapping: &LinkMapping, kind: LinkKind) -> Self {
        Self::new(mapping.link.clone(), mapping.target.clone(), kind)
    }

    fn inspect_error(&self, source: std::io::Error) -> anyhow::Error {
        LinkError::Inspect {
            path: self.link.clone(),
            source,
        }
        .into()
    }
}

impl Applicable for SkillLinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.link.display(), self.target.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => return Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { reason } => return Ok(ResourceChange::Skipped { reason }),
            ResourceState::Incorrect { .. } => {
                remove_link(&self.link).map_err(|source| LinkError::Remove {
                    path: self.link.clone(),
                    source,
                })?;
            }
            ResourceState::Missing => {}
        }

        ensure_parent_dir(&self.link)?;
        let value = link_value(&self.link, &self.target, self.kind);
        create_dir_link(&value, &self.link, self.kind)
            .map_err(|e| LinkError::Create {
                path: self.link.clone(),
                reason: format!("{e:#}"),
            })?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => {
                remove_link(&self.link).map_err(|source| LinkError::Remove {
                    path: self.link.clone(),
                    source,
                })?;
                Ok(ResourceChange::Applied)
            }
            ResourceState::Missing => Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Incorrect { current } => Ok(ResourceChange::Skipped {
                reason: format!("points to {current}"),
            }),
            ResourceState::Invalid { reason } => Ok(ResourceChange::Skipped { reason }),
        }
    }
}

impl Resource for SkillLinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        if paths_equal(&self.link, &self.target) {
            return Ok(ResourceState::Invalid {
                reason: "link location is the target directory itself".to_string(),
            });
        }

        let meta = match std::fs::symlink_metadata(&self.link) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ResourceState::Missing),
            Err(e) => return Err(self.inspect_error(e)),
        };

        if !is_link(&meta) {
            let what = if meta.is_dir() { "directory" } else { "file" };
            return Ok(ResourceState::Invalid {
                reason: format!("a {what} already exists here and is not a link"),
            });
        }

        let destination = resolve_link_destination(&self.link).map_err(|e| self.inspect_error(e))?;
        if paths_equal(&destination, &self.target) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: destination.display().to_string(),
            })
        }
    }
}
