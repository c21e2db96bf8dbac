//! Idempotent resource primitives (check + apply pattern).
pub mod helpers;
pub mod skill_link;
pub mod target_dir;

use anyhow::Result;

/// Minimal interface for resources that can be described, applied, and removed.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// Implementations create parent directories as needed and bring the
    /// resource to its desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, or an entry the resource does not own.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be removed, or if removal is
    /// not supported for this resource type.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!(
            "operation 'remove' is not supported for resource '{}'",
            self.description()
        )
    }
}

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use skills_link::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let stale = ResourceState::Incorrect { current: "/elsewhere".into() };
/// let foreign = ResourceState::Invalid { reason: "directory exists".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(stale, foreign);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
    /// Resource must not be touched (e.g. a real directory where a link belongs).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

impl ResourceState {
    /// Short label used by the `status` command.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Correct => "ok",
            Self::Incorrect { .. } => "points elsewhere",
            Self::Invalid { .. } => "skipped",
        }
    }
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource was left alone.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// Resources that can check their own state before being applied.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined, for example when
    /// the path cannot be inspected.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    struct TestResource {
        state: ResourceState,
    }

    impl Applicable for TestResource {
        fn description(&self) -> String {
            "test resource".to_string()
        }

        fn apply(&self) -> Result<ResourceChange> {
            Ok(ResourceChange::Applied)
        }
    }

    impl Resource for TestResource {
        fn current_state(&self) -> Result<ResourceState> {
            Ok(self.state.clone())
        }
    }

    #[test]
    fn needs_change_for_missing_and_incorrect() {
        for state in [
            ResourceState::Missing,
            ResourceState::Incorrect {
                current: "wrong".to_string(),
            },
        ] {
            assert!(TestResource { state }.needs_change().unwrap());
        }
    }

    #[test]
    fn no_change_for_correct_or_invalid() {
        for state in [
            ResourceState::Correct,
            ResourceState::Invalid {
                reason: "directory exists".to_string(),
            },
        ] {
            assert!(!TestResource { state }.needs_change().unwrap());
        }
    }

    #[test]
    fn default_remove_returns_error() {
        let resource = TestResource {
            state: ResourceState::Correct,
        };
        let err = resource.remove().unwrap_err();
        assert!(err.to_string().contains("not supported"), "{err}");
        assert!(err.to_string().contains("test resource"), "{err}");
    }

    #[test]
    fn state_labels() {
        insta::assert_snapshot!(
            [
                ResourceState::Missing,
                ResourceState::Correct,
                ResourceState::Incorrect { current: "x".into() },
                ResourceState::Invalid { reason: "y".into() },
            ]
            .iter()
            .map(ResourceState::label)
            .collect::<Vec<_>>()
            .join(", "),
            @"missing, ok, points elsewhere, skipped"
        );
    }
}
