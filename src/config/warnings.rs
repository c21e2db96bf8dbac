//! Non-fatal problems found while turning the config into link mappings.
use std::fmt;

/// A warning detected during configuration processing.
///
/// Warnings never stop a run; the affected entry is skipped or used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The configuration source (e.g. `skills-link.json:links`).
    pub source: String,
    /// The entry that triggered the warning (e.g. `[3]`).
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ConfigWarning {
    /// Create a new warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.item.is_empty() {
            write!(f, "{}: {}", self.source, self.message)
        } else {
            write!(f, "{} {}: {}", self.source, self.item, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_item() {
        let w = ConfigWarning::new("skills-link.json:links", "[1]", "entry skipped");
        assert_eq!(w.to_string(), "skills-link.json:links [1]: entry skipped");
    }

    #[test]
    fn display_without_item() {
        let w = ConfigWarning::new("skills-link.json", "", "no link configuration found");
        assert_eq!(
            w.to_string(),
            "skills-link.json: no link configuration found"
        );
    }
}
