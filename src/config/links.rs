//! Link entries: normalization of individual entries and construction of
//! the full mapping list for a run.
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::warnings::ConfigWarning;
use super::{CONFIG_FILE_NAME, ConfigFile, DEFAULT_LINKS};
use crate::error::ConfigError;
use crate::resources::helpers::fs::{absolutize, paths_equal};

/// A resolved link location and the directory it must point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMapping {
    /// Absolute path of the link location.
    pub link: PathBuf,
    /// Absolute path of the shared target directory.
    pub target: PathBuf,
}

impl LinkMapping {
    /// Create a mapping.
    #[must_use]
    pub const fn new(link: PathBuf, target: PathBuf) -> Self {
        Self { link, target }
    }
}

/// Every mapping for a run plus the warnings raised while building them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingPlan {
    /// Mappings in config order, duplicates removed.
    pub mappings: Vec<LinkMapping>,
    /// Non-fatal problems, in the order they were found.
    pub warnings: Vec<ConfigWarning>,
}

/// Normalize one raw entry to an absolute link path.
///
/// Returns `Ok(None)` (with a warning pushed) for entries that should be
/// skipped, and an error only when the entry names a `target` that
/// contradicts `target`.
///
/// # Errors
///
/// Returns [`ConfigError::TargetMismatch`] when the entry's own `target`
/// does not resolve to `target`.
pub fn normalize_entry(
    entry: &Value,
    index: usize,
    target: &Path,
    root: &Path,
    source_label: &str,
    warnings: &mut Vec<ConfigWarning>,
) -> Result<Option<PathBuf>, ConfigError> {
    let item = format!("[{index}]");
    match entry {
        Value::String(link) => {
            if link.trim().is_empty() {
                warnings.push(ConfigWarning::new(
                    source_label,
                    item,
                    "empty link path, entry skipped",
                ));
                return Ok(None);
            }
            Ok(Some(absolutize(root, Path::new(link.trim()))))
        }
        Value::Object(fields) => {
            normalize_object(fields, index, target, root, source_label, warnings)
        }
        other => {
            warnings.push(ConfigWarning::new(
                source_label,
                item,
                format!(
                    "expected a path string or an object with \"link\", found {}; entry skipped",
                    json_kind(other)
                ),
            ));
            Ok(None)
        }
    }
}

fn normalize_object(
    fields: &Map<String, Value>,
    index: usize,
    target: &Path,
    root: &Path,
    source_label: &str,
    warnings: &mut Vec<ConfigWarning>,
) -> Result<Option<PathBuf>, ConfigError> {
    let item = format!("[{index}]");
    let link = match fields.get("link") {
        Some(Value::String(link)) if !link.trim().is_empty() => link.trim(),
        _ => {
            warnings.push(ConfigWarning::new(
                source_label,
                item,
                "object entry needs a non-empty \"link\" string; entry skipped",
            ));
            return Ok(None);
        }
    };

    match fields.get("target") {
        None | Some(Value::Null) => {}
        Some(Value::String(entry_target))
            if paths_equal(&absolutize(root, Path::new(entry_target.trim())), target) =>
        {
            warnings.push(ConfigWarning::new(
                source_label,
                item,
                format!(
                    "\"target\" is redundant; every link points at {}",
                    target.display()
                ),
            ));
        }
        Some(entry_target) => {
            return Err(ConfigError::TargetMismatch {
                source_label: source_label.to_string(),
                index,
                entry_target: entry_target
                    .as_str()
                    .map_or_else(|| entry_target.to_string(), str::to_string),
                expected: target.to_path_buf(),
            });
        }
    }

    Ok(Some(absolutize(root, Path::new(link))))
}

/// Build the mapping list for a run.
///
/// Without a recognized link list the two default locations are used (with
/// a warning when a config file was present). An empty list yields no
/// mappings. A single contradicting entry aborts the whole build.
///
/// # Errors
///
/// Returns the first fatal normalization error; no partial list is returned.
pub fn build_mappings(
    config_file: &ConfigFile,
    target: &Path,
    root: &Path,
) -> Result<MappingPlan, ConfigError> {
    let mut warnings = Vec::new();

    let Some(list) = config_file.config().and_then(|c| c.links.as_ref()) else {
        if config_file.exists() {
            warnings.push(ConfigWarning::new(
                CONFIG_FILE_NAME,
                "",
                format!(
                    "no link configuration found; using defaults ({})",
                    DEFAULT_LINKS.join(", ")
                ),
            ));
        }
        let mappings = DEFAULT_LINKS
            .iter()
            .map(|link| LinkMapping::new(absolutize(root, Path::new(link)), target.to_path_buf()))
            .collect();
        return Ok(MappingPlan { mappings, warnings });
    };

    let source_label = format!("{CONFIG_FILE_NAME}:{}", list.key);
    let mut mappings: Vec<LinkMapping> = Vec::with_capacity(list.entries.len());
    for (index, entry) in list.entries.iter().enumerate() {
        let Some(link) = normalize_entry(entry, index, target, root, &source_label, &mut warnings)?
        else {
            continue;
        };
        if mappings.iter().any(|m| paths_equal(&m.link, &link)) {
            warnings.push(ConfigWarning::new(
                &source_label,
                format!("[{index}]"),
                format!("duplicate link location {}, entry skipped", link.display()),
            ));
            continue;
        }
        mappings.push(LinkMapping::new(link, target.to_path_buf()));
    }

    Ok(MappingPlan { mappings, warnings })
}

/// Human-readable JSON type name for warnings.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::test_helpers::{fake_root, under_root};
    use crate::config::{Config, LEGACY_LINKS_KEY, LINKS_KEY, LinkList};
    use serde_json::json;

    fn target() -> PathBuf {
        under_root(".skills")
    }

    fn loaded(entries: Vec<Value>) -> ConfigFile {
        ConfigFile::Loaded(Config {
            target: None,
            links: Some(LinkList {
                key: LINKS_KEY,
                entries,
            }),
        })
    }

    fn links(plan: &MappingPlan) -> Vec<PathBuf> {
        plan.mappings.iter().map(|m| m.link.clone()).collect()
    }

    // -----------------------------------------------------------------------
    // normalize_entry
    // -----------------------------------------------------------------------

    #[test]
    fn string_entry_resolves_against_root() {
        let mut warnings = Vec::new();
        let link = normalize_entry(
            &json!("tools/skills"),
            0,
            &target(),
            &fake_root(),
            "src",
            &mut warnings,
        )
        .unwrap();
        assert_eq!(link, Some(under_root("tools/skills")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn object_entry_without_target() {
        let mut warnings = Vec::new();
        let link = normalize_entry(
            &json!({"link": ".cursor/skills"}),
            0,
            &target(),
            &fake_root(),
            "src",
            &mut warnings,
        )
        .unwrap();
        assert_eq!(link, Some(under_root(".cursor/skills")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn object_entry_with_matching_target_warns() {
        let mut warnings = Vec::new();
        let link = normalize_entry(
            &json!({"link": ".cursor/skills", "target": "./.skills"}),
            4,
            &target(),
            &fake_root(),
            "src",
            &mut warnings,
        )
        .unwrap();
        assert_eq!(link, Some(under_root(".cursor/skills")));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "[4]");
        assert!(warnings[0].message.contains("redundant"));
    }

    #[test]
    fn object_entry_with_other_target_is_fatal() {
        let mut warnings = Vec::new();
        let err = normalize_entry(
            &json!({"link": ".cursor/skills", "target": "elsewhere"}),
            1,
            &target(),
            &fake_root(),
            "src",
            &mut warnings,
        )
        .unwrap_err();
        match err {
            ConfigError::TargetMismatch {
                index,
                entry_target,
                expected,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(entry_target, "elsewhere");
                assert_eq!(expected, target());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn object_entry_with_non_string_target_is_fatal() {
        let mut warnings = Vec::new();
        let result = normalize_entry(
            &json!({"link": "a", "target": 3}),
            0,
            &target(),
            &fake_root(),
            "src",
            &mut warnings,
        );
        assert!(matches!(result, Err(ConfigError::TargetMismatch { .. })));
    }

    #[test]
    fn object_entry_with_null_target_is_plain() {
        let mut warnings = Vec::new();
        let link = normalize_entry(
            &json!({"link": "a", "target": null}),
            0,
            &target(),
            &fake_root(),
            "src",
            &mut warnings,
        )
        .unwrap();
        assert_eq!(link, Some(under_root("a")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped_with_warning() {
        let malformed = [
            json!(42),
            json!(null),
            json!(true),
            json!(["a"]),
            json!({"target": ".skills"}),
            json!({"link": ""}),
            json!({"link": 7}),
            json!("   "),
        ];
        for entry in &malformed {
            let mut warnings = Vec::new();
            let link = normalize_entry(entry, 0, &target(), &fake_root(), "src", &mut warnings)
                .unwrap();
            assert_eq!(link, None, "{entry} should be skipped");
            assert_eq!(warnings.len(), 1, "{entry} should warn once");
        }
    }

    // -----------------------------------------------------------------------
    // build_mappings
    // -----------------------------------------------------------------------

    #[test]
    fn defaults_without_config_file_are_silent() {
        let plan = build_mappings(&ConfigFile::Missing, &target(), &fake_root()).unwrap();
        assert_eq!(
            links(&plan),
            vec![under_root(".claude/skills"), under_root(".codex/skills")]
        );
        assert!(plan.mappings.iter().all(|m| m.target == target()));
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn defaults_with_config_file_warn() {
        let file = ConfigFile::Loaded(Config::default());
        let plan = build_mappings(&file, &target(), &fake_root()).unwrap();
        assert_eq!(plan.mappings.len(), 2);
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].message.contains("no link configuration found"));
    }

    #[test]
    fn empty_list_opts_out() {
        let plan = build_mappings(&loaded(vec![]), &target(), &fake_root()).unwrap();
        assert!(plan.mappings.is_empty());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn malformed_entry_does_not_stop_valid_ones() {
        let file = loaded(vec![json!("a/skills"), json!(5), json!({"link": "b/skills"})]);
        let plan = build_mappings(&file, &target(), &fake_root()).unwrap();
        assert_eq!(
            links(&plan),
            vec![under_root("a/skills"), under_root("b/skills")]
        );
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.warnings[0].source, "skills-link.json:links");
        assert_eq!(plan.warnings[0].item, "[1]");
    }

    #[test]
    fn contradicting_entry_aborts_everything() {
        let file = loaded(vec![
            json!("a/skills"),
            json!({"link": "b/skills", "target": "other"}),
            json!("c/skills"),
        ]);
        let err = build_mappings(&file, &target(), &fake_root()).unwrap_err();
        assert!(matches!(err, ConfigError::TargetMismatch { index: 1, .. }));
    }

    #[test]
    fn duplicate_locations_collapse() {
        let file = loaded(vec![
            json!("a/skills"),
            json!("./a/skills/"),
            json!({"link": "a/x/../skills"}),
        ]);
        let plan = build_mappings(&file, &target(), &fake_root()).unwrap();
        assert_eq!(links(&plan), vec![under_root("a/skills")]);
        assert_eq!(plan.warnings.len(), 2);
    }

    #[test]
    fn legacy_key_labels_warnings() {
        let file = ConfigFile::Loaded(Config {
            target: None,
            links: Some(LinkList {
                key: LEGACY_LINKS_KEY,
                entries: vec![json!(false)],
            }),
        });
        let plan = build_mappings(&file, &target(), &fake_root()).unwrap();
        assert!(plan.mappings.is_empty());
        assert_eq!(plan.warnings[0].source, "skills-link.json:linkTargets");
    }

    #[test]
    fn every_mapping_shares_the_target() {
        let custom = under_root("shared");
        let file = loaded(vec![
            json!("a"),
            json!({"link": "b", "target": "shared"}),
            json!("c"),
        ]);
        let plan = build_mappings(&file, &custom, &fake_root()).unwrap();
        assert_eq!(plan.mappings.len(), 3);
        assert!(plan.mappings.iter().all(|m| m.target == custom));
    }
}
