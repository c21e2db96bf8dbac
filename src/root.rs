//! Root directory resolution.
//!
//! The root is the base against which the config file, the target directory
//! and every link location are resolved. It is computed once per run and
//! then passed explicitly to everything that needs it.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::resources::helpers::fs::absolutize;

/// Set by package managers to the directory the install was started from.
pub const INIT_CWD_VAR: &str = "INIT_CWD";

/// Set by package managers to the nearest local install prefix.
pub const LOCAL_PREFIX_VAR: &str = "npm_config_local_prefix";

/// Resolve the root directory from the process environment.
///
/// Priority: `INIT_CWD`, then `npm_config_local_prefix`, then the current
/// working directory. Never fails; if the working directory itself cannot be
/// read, `.` is used.
#[must_use]
pub fn resolve_root() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_root_from(
        std::env::var_os(INIT_CWD_VAR),
        std::env::var_os(LOCAL_PREFIX_VAR),
        &cwd,
    )
}

/// Resolve the root from explicit inputs.
///
/// Empty values count as unset. Relative values are resolved against `cwd`.
#[must_use]
pub fn resolve_root_from(
    init_cwd: Option<OsString>,
    local_prefix: Option<OsString>,
    cwd: &Path,
) -> PathBuf {
    [init_cwd, local_prefix]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map_or_else(
            || absolutize(cwd, cwd),
            |value| absolutize(cwd, Path::new(&value)),
        )
}

/// Resolve the root, honouring an explicit `--root` override first.
#[must_use]
pub fn resolve_root_with_override(root_override: Option<&Path>) -> PathBuf {
    root_override.map_or_else(resolve_root, |root| {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        absolutize(&cwd, root)
    })
}
