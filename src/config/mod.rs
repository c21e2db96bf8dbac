//! Configuration loading: the optional `skills-link.json` file at the root
//! and the target directory it selects.
pub mod links;
pub mod warnings;

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::resources::helpers::fs::absolutize;

/// Name of the configuration file looked up at the root.
pub const CONFIG_FILE_NAME: &str = "skills-link.json";

/// Shared directory used when the config does not name one.
pub const DEFAULT_TARGET_DIR: &str = ".skills";

/// Link locations used when the config supplies no link list.
pub const DEFAULT_LINKS: [&str; 2] = [".claude/skills", ".codex/skills"];

/// Key of the link list.
pub const LINKS_KEY: &str = "links";

/// Legacy synonym for [`LINKS_KEY`].
pub const LEGACY_LINKS_KEY: &str = "linkTargets";

/// Outcome of looking for the config file.
///
/// Invalid files are reported through the `Err` side of [`load`], so a
/// caller matching on this enum only ever sees usable states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFile {
    /// No config file at the root.
    Missing,
    /// The file exists and its top level is a JSON object.
    Loaded(Config),
}

impl ConfigFile {
    /// The loaded config, if any.
    #[must_use]
    pub const fn config(&self) -> Option<&Config> {
        match self {
            Self::Missing => None,
            Self::Loaded(config) => Some(config),
        }
    }

    /// Whether a config file was present.
    #[must_use]
    pub const fn exists(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// The recognized contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `target` when it is a string; other types are ignored.
    pub target: Option<String>,
    /// The link list, when `links` or `linkTargets` holds an array.
    pub links: Option<LinkList>,
}

/// A link list together with the key it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkList {
    /// `links` or `linkTargets`.
    pub key: &'static str,
    /// Raw entries; each one is normalized individually.
    pub entries: Vec<Value>,
}

/// Top-level fields this tool understands. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    target: Value,
    #[serde(default)]
    links: Value,
    #[serde(default, rename = "linkTargets")]
    link_targets: Value,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let target = match raw.target {
            Value::String(s) => Some(s),
            _ => None,
        };
        let links = match (raw.links, raw.link_targets) {
            (Value::Array(entries), _) => Some(LinkList {
                key: LINKS_KEY,
                entries,
            }),
            (_, Value::Array(entries)) => Some(LinkList {
                key: LEGACY_LINKS_KEY,
                entries,
            }),
            _ => None,
        };
        Self { target, links }
    }
}

/// Path of the config file for `root`.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the config file from `root`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, is not valid
/// JSON, or its top level is not an object.
pub fn load(root: &Path) -> Result<ConfigFile, ConfigError> {
    let path = config_path(root);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigFile::Missing),
        Err(source) => return Err(ConfigError::Io { path, source }),
    };
    parse(&path, &content).map(ConfigFile::Loaded)
}

/// Parse config file contents; `path` is only used in error messages.
///
/// # Errors
///
/// Returns an error if `content` is not a JSON object.
pub fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
    let value: Value = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        });
    }
    let raw: RawConfig = serde_json::from_value(value).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.into())
}

/// Resolve the shared target directory for this run.
///
/// A non-blank `target` is resolved against `root`; otherwise the target is
/// `root/.skills`.
#[must_use]
pub fn resolve_target(config: Option<&Config>, root: &Path) -> PathBuf {
    let explicit = config
        .and_then(|c| c.target.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    absolutize(root, Path::new(explicit.unwrap_or(DEFAULT_TARGET_DIR)))
}
