//! Utility functions for path resolution, ANSI stripping, and time formatting.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range).
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether console output may use colour.
///
/// Follows the `NO_COLOR` convention: any non-empty value disables colour.
pub(super) fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
}

/// Pick the cache base from `XDG_CACHE_HOME`, then `HOME` or `USERPROFILE`
/// plus `.cache`. Empty values count as unset.
///
/// Returns `None` when none is set, which turns file logging off rather
/// than writing into the working directory.
fn cache_base(
    xdg_cache_home: Option<OsString>,
    home: Option<OsString>,
    user_profile: Option<OsString>,
) -> Option<PathBuf> {
    let non_empty = |v: Option<OsString>| v.filter(|v| !v.is_empty());
    non_empty(xdg_cache_home).map(PathBuf::from).or_else(|| {
        non_empty(home)
            .or_else(|| non_empty(user_profile))
            .map(|home| PathBuf::from(home).join(".cache"))
    })
}

/// Return the `$XDG_CACHE_HOME/skills-link/` directory, creating it if needed.
pub(super) fn cache_dir() -> Option<PathBuf> {
    let base = cache_base(
        std::env::var_os("XDG_CACHE_HOME"),
        std::env::var_os("HOME"),
        std::env::var_os("USERPROFILE"),
    )?;
    let dir = base.join("skills-link");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path for `command` under the cache directory.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(cache_dir()?.join(format!("{command}.log")))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31merror\x1b[0m: hello"), "error: hello");
        assert_eq!(strip_ansi("no codes here"), "no codes here");
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mstage\x1b[0m"),
            "==> stage"
        );
    }

    #[test]
    fn strip_ansi_handles_csi_sequences() {
        assert_eq!(strip_ansi("\x1b[2;5Htext"), "text");
        assert_eq!(strip_ansi("\x1b[Kworld"), "world");
        assert_eq!(strip_ansi("\x1bMtext"), "text");
    }

    #[test]
    fn strip_ansi_empty_string() {
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn cache_base_prefers_xdg() {
        assert_eq!(
            cache_base(Some("/xdg".into()), Some("/home/u".into()), None),
            Some(PathBuf::from("/xdg"))
        );
    }

    #[test]
    fn cache_base_falls_back_to_home_then_user_profile() {
        assert_eq!(
            cache_base(Some("".into()), Some("/home/u".into()), None),
            Some(PathBuf::from("/home/u").join(".cache"))
        );
        assert_eq!(
            cache_base(None, None, Some("/profile".into())),
            Some(PathBuf::from("/profile").join(".cache"))
        );
    }

    #[test]
    fn cache_base_without_any_home_disables_file_logging() {
        assert_eq!(cache_base(None, None, None), None);
        assert_eq!(cache_base(Some("".into()), Some("".into()), None), None);
    }

    #[test]
    fn format_utc_time_has_correct_format() {
        let s = format_utc_time();
        assert_eq!(s.len(), 8, "HH:MM:SS should be 8 chars");
        assert_eq!(&s[2..3], ":");
        assert_eq!(&s[5..6], ":");
    }

    #[test]
    fn format_utc_datetime_has_correct_format() {
        let s = format_utc_datetime();
        assert_eq!(s.len(), 19, "YYYY-MM-DD HH:MM:SS should be 19 chars");
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
    }
}
