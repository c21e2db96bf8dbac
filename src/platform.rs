//! Platform detection and the link flavour each platform uses.
use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux, macOS and other Unix-like systems.
    Unix,
    /// Microsoft Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Kind of filesystem link created at each link location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A directory symbolic link with a relative destination.
    Symlink,
    /// A Windows junction with an absolute destination.
    Junction,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symlink => write!(f, "symlink"),
            Self::Junction => write!(f, "junction"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Detected operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        let os = if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            Os::Unix
        };
        Self { os }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// The link flavour to create on this platform.
    #[must_use]
    pub fn link_kind(&self) -> LinkKind {
        if self.is_windows() {
            LinkKind::Junction
        } else {
            LinkKind::Symlink
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_matches_target() {
        let p = Platform::detect();
        assert_eq!(p.is_windows(), cfg!(target_os = "windows"));
    }

    #[test]
    fn windows_uses_junctions() {
        assert_eq!(Platform::new(Os::Windows).link_kind(), LinkKind::Junction);
    }

    #[test]
    fn unix_uses_symlinks() {
        assert_eq!(Platform::new(Os::Unix).link_kind(), LinkKind::Symlink);
    }

    #[test]
    fn display() {
        assert_eq!(Os::Unix.to_string(), "unix");
        assert_eq!(Os::Windows.to_string(), "windows");
        assert_eq!(LinkKind::Junction.to_string(), "junction");
    }
}
