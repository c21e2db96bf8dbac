//! File-system helpers shared by the target and link resources.
use anyhow::{Context as _, Result};
use std::path::{Component, Path, PathBuf};

use crate::platform::LinkKind;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` directly below the root is dropped, matching how an absolute path
/// cannot climb above `/`.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve `path` against `base` (absolute values pass through) and
/// normalize the result lexically.
#[must_use]
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// Compare two paths, ignoring the `\\?\` prefix Windows adds to
/// extended-length paths returned by `read_link`.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    normalize_lexically(dunce::simplified(a)) == normalize_lexically(dunce::simplified(b))
}

/// Resolve the destination of the symlink at `link` to an absolute path.
///
/// Relative destinations are interpreted against the link's parent
/// directory, the same way the OS follows them.
///
/// # Errors
///
/// Returns an error if `link` is not a symlink or cannot be read.
pub fn resolve_link_destination(link: &Path) -> std::io::Result<PathBuf> {
    let raw = std::fs::read_link(link)?;
    let parent = link.parent().unwrap_or_else(|| Path::new("."));
    Ok(absolutize(parent, dunce::simplified(&raw)))
}

/// Compute the value to store in a new link at `link` pointing at `target`.
///
/// Symlinks store a path relative to the link's parent (`.` when the two
/// coincide) so the pair survives the tree being moved. Junctions only
/// accept absolute destinations.
#[must_use]
pub fn link_value(link: &Path, target: &Path, kind: LinkKind) -> PathBuf {
    match kind {
        LinkKind::Junction => target.to_path_buf(),
        LinkKind::Symlink => {
            let parent = link.parent().unwrap_or_else(|| Path::new("."));
            match pathdiff::diff_paths(target, parent) {
                Some(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
                Some(relative) => relative,
                None => target.to_path_buf(),
            }
        }
    }
}

/// Create a directory link at `link` whose stored destination is `value`.
///
/// # Errors
///
/// Returns an error if the OS refuses to create the link.
pub fn create_dir_link(value: &Path, link: &Path, kind: LinkKind) -> Result<()> {
    match kind {
        LinkKind::Symlink => create_symlink(value, link),
        LinkKind::Junction => create_junction(value, link),
    }
}

#[cfg(unix)]
fn create_symlink(value: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(value, link).with_context(|| {
        format!("creating symlink {} -> {}", link.display(), value.display())
    })
}

#[cfg(windows)]
fn create_symlink(value: &Path, link: &Path) -> Result<()> {
    std::os::windows::fs::symlink_dir(value, link).with_context(|| {
        format!("creating symlink {} -> {}", link.display(), value.display())
    })
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_value: &Path, link: &Path) -> Result<()> {
    anyhow::bail!(
        "symbolic links are not supported on this platform: {}",
        link.display()
    )
}

/// Create a junction through `mklink /J`, which needs no elevated rights.
fn create_junction(value: &Path, link: &Path) -> Result<()> {
    let link_str = link.to_string_lossy();
    let value_str = value.to_string_lossy();
    crate::exec::run("cmd", &["/c", "mklink", "/J", &link_str, &value_str]).with_context(|| {
        format!(
            "creating junction {} -> {}",
            link.display(),
            value.display()
        )
    })?;
    Ok(())
}

/// Remove a symlink or junction without following it.
///
/// Directory links on Windows must be removed with `remove_dir`; everything
/// else goes through `remove_file`.
///
/// # Errors
///
/// Returns an error if the entry cannot be removed.
pub fn remove_link(path: &Path) -> std::io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Check if metadata represents a directory-like entry.
///
/// On Windows, `symlink_metadata().is_dir()` returns `false` for directory
/// symlinks and junctions, so the raw `FILE_ATTRIBUTE_DIRECTORY` bit is used.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

/// Whether `meta` describes a symlink or a junction.
#[must_use]
pub fn is_link(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.is_symlink() || meta.file_attributes() & 0x400 != 0 // FILE_ATTRIBUTE_REPARSE_POINT
    }
    #[cfg(not(windows))]
    {
        meta.is_symlink()
    }
}
