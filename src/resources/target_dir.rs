//! Shared target directory resource.
use anyhow::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::helpers::fs::is_link;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::LinkError;

/// The single directory every link points at.
///
/// A real directory or a pre-existing link (to anything) is accepted as-is.
#[derive(Debug, Clone)]
pub struct TargetDirResource {
    /// Absolute path of the target directory.
    pub path: PathBuf,
}

impl TargetDirResource {
    /// Create a new target directory resource.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Check the state and fail with [`LinkError::TargetNotDirectory`] when
    /// the path is occupied by something else.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be inspected or is not usable as
    /// a directory.
    pub fn checked_state(&self) -> Result<ResourceState> {
        let state = self.current_state()?;
        if matches!(state, ResourceState::Invalid { .. }) {
            return Err(LinkError::TargetNotDirectory {
                path: self.path.clone(),
            }
            .into());
        }
        Ok(state)
    }

    /// Path of the target directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Applicable for TargetDirResource {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        std::fs::create_dir_all(&self.path).map_err(|e| LinkError::Create {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for TargetDirResource {
    fn current_state(&self) -> Result<ResourceState> {
        match std::fs::symlink_metadata(&self.path) {
            Ok(meta) if is_link(&meta) || meta.is_dir() => Ok(ResourceState::Correct),
            Ok(_) => Ok(ResourceState::Invalid {
                reason: "exists and is not a directory".to_string(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ResourceState::Missing),
            Err(source) => Err(LinkError::Inspect {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let resource = TargetDirResource::new(tmp.path().join("a/b/.skills"));
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert!(resource.path().is_dir());
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn existing_directory_is_correct() {
        let tmp = tempfile::tempdir().unwrap();
        let resource = TargetDirResource::new(tmp.path().to_path_buf());
        assert_eq!(resource.checked_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn regular_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".skills");
        std::fs::write(&path, "not a dir").unwrap();
        let resource = TargetDirResource::new(path.clone());

        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
        let err = resource.checked_state().unwrap_err();
        let link_err = err.downcast_ref::<LinkError>().expect("typed link error");
        assert!(
            matches!(link_err, LinkError::TargetNotDirectory { path: p } if *p == path),
            "unexpected error: {link_err}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn existing_symlink_is_accepted_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".skills");
        std::os::unix::fs::symlink(tmp.path().join("does-not-exist"), &path).unwrap();
        let resource = TargetDirResource::new(path.clone());
        assert_eq!(resource.checked_state().unwrap(), ResourceState::Correct);
        assert!(std::fs::symlink_metadata(&path).unwrap().is_symlink());
    }
}
