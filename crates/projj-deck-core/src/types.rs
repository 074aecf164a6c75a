//! Core types shared by the readers, the probe and the presenter

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Owner segment of a git URL: `https://host/<owner>/repo(.git)` or `git@host:<owner>/repo(.git)`
static OWNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[:/]([^/]+)/[^/]+(?:\.git)?$").expect("owner regex is valid")
});

/// Contents of `~/.projj/config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Base directories in stored order. The position of each entry is the
    /// number projj expects at its interactive "add" prompt.
    #[serde(rename = "base", deserialize_with = "deserialize_base")]
    pub base_directories: Vec<String>,

    /// Alias name -> URL prefix or command. Entries are kept as written.
    #[serde(rename = "alias", default, deserialize_with = "deserialize_lenient_map")]
    pub aliases: Map<String, Value>,

    /// Hook event -> command. projj also accepts nested hook definitions.
    #[serde(default, deserialize_with = "deserialize_lenient_map")]
    pub hooks: Map<String, Value>,
}

impl ManagerConfig {
    /// 1-based menu index of a base directory, as typed at projj's prompt
    pub fn base_index(&self, directory: &str) -> Option<usize> {
        self.base_directories
            .iter()
            .position(|d| d == directory)
            .map(|i| i + 1)
    }

    /// Whether a clone can be offered at all
    pub fn has_base_directories(&self) -> bool {
        !self.base_directories.is_empty()
    }
}

/// Older projj releases wrote `base` as a single string
fn deserialize_base<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Base {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Base::deserialize(deserializer)? {
        Base::One(dir) => vec![dir],
        Base::Many(dirs) => dirs,
    })
}

/// Only `base` decides whether a config is usable; anything other than an
/// object here (`null`, a list, a string) reads as empty
fn deserialize_lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// One project tracked in the projj cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedProject {
    /// Cache key or derived identifier. projj keys its cache by directory,
    /// so this is frequently an absolute path.
    #[serde(default)]
    pub name: String,

    /// Filesystem location; may be empty
    #[serde(default)]
    pub path: String,

    /// Origin URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ManagedProject {
    pub fn new(name: impl Into<String>, path: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            url,
        }
    }

    /// Directory to act on: the path, or the cache key when no path was recorded
    pub fn location(&self) -> &str {
        if self.path.is_empty() {
            &self.name
        } else {
            &self.path
        }
    }

    /// Short name for display: last segment of the path, else of the name
    pub fn display_name(&self) -> String {
        if !self.path.is_empty() {
            return last_segment(&self.path).unwrap_or("Unknown").to_string();
        }
        if self.name.is_empty() {
            return "Unknown".to_string();
        }
        last_segment(&self.name).unwrap_or(&self.name).to_string()
    }

    /// Repository owner, from the URL or from the segment after `github.com` in the path
    pub fn owner(&self) -> Option<String> {
        if let Some(url) = &self.url {
            if let Some(owner) = OWNER_RE.captures(url).and_then(|c| c.get(1)) {
                return Some(owner.as_str().to_string());
            }
        }

        let parts: Vec<&str> = self.path.split('/').collect();
        parts
            .iter()
            .position(|part| *part == "github.com")
            .and_then(|i| parts.get(i + 1))
            .filter(|owner| !owner.is_empty())
            .map(|owner| owner.to_string())
    }
}

fn last_segment(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|s| !s.is_empty())
}

/// Result of probing for the projj executable. Recomputed on every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationStatus {
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl InstallationStatus {
    pub fn found(executable_path: impl Into<String>) -> Self {
        Self {
            installed: true,
            executable_path: Some(executable_path.into()),
            diagnostic: None,
        }
    }

    pub fn missing(diagnostic: impl Into<String>) -> Self {
        Self {
            installed: false,
            executable_path: None,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_manager_layout() {
        let config: ManagerConfig = serde_json::from_str(
            r#"{
                "base": ["/a", "/b", "/c"],
                "alias": {"github://": "https://github.com/"},
                "hooks": {"postadd": "npm install"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.base_directories, vec!["/a", "/b", "/c"]);
        assert_eq!(
            config.aliases.get("github://").and_then(Value::as_str),
            Some("https://github.com/")
        );
        assert_eq!(
            config.hooks.get("postadd").and_then(Value::as_str),
            Some("npm install")
        );
    }

    #[test]
    fn test_config_accepts_single_base_string() {
        let config: ManagerConfig = serde_json::from_str(r#"{"base": "/code"}"#).unwrap();
        assert_eq!(config.base_directories, vec!["/code"]);
        assert!(config.aliases.is_empty());
        assert!(config.hooks.is_empty());
    }

    #[test]
    fn test_config_tolerates_odd_alias_and_hooks() {
        let config: ManagerConfig =
            serde_json::from_str(r#"{"base": ["/a"], "alias": {}, "hooks": null}"#).unwrap();
        assert_eq!(config.base_directories, vec!["/a"]);
        assert!(config.hooks.is_empty());

        let config: ManagerConfig = serde_json::from_str(
            r#"{
                "base": ["/a"],
                "alias": {"gh://": {"url": "https://github.com/"}},
                "hooks": {"postadd": ["npm install", "make"]}
            }"#,
        )
        .unwrap();
        assert_eq!(config.base_index("/a"), Some(1));
        assert!(config.aliases["gh://"].is_object());
        assert!(config.hooks["postadd"].is_array());

        let config: ManagerConfig =
            serde_json::from_str(r#"{"base": "/a", "alias": "none", "hooks": []}"#).unwrap();
        assert!(config.aliases.is_empty());
        assert!(config.hooks.is_empty());
    }

    #[test]
    fn test_base_index_is_one_based() {
        let config: ManagerConfig =
            serde_json::from_str(r#"{"base": ["/a", "/b", "/c"]}"#).unwrap();
        assert_eq!(config.base_index("/a"), Some(1));
        assert_eq!(config.base_index("/b"), Some(2));
        assert_eq!(config.base_index("/c"), Some(3));
        assert_eq!(config.base_index("/d"), None);
    }

    #[test]
    fn test_base_index_uses_first_duplicate() {
        let config: ManagerConfig =
            serde_json::from_str(r#"{"base": ["/a", "/b", "/a"]}"#).unwrap();
        assert_eq!(config.base_index("/a"), Some(1));
    }

    #[test]
    fn test_display_name_prefers_path() {
        let project = ManagedProject::new("key", "/code/github.com/foo/bar", None);
        assert_eq!(project.display_name(), "bar");

        let project = ManagedProject::new("/code/github.com/foo/baz", "", None);
        assert_eq!(project.display_name(), "baz");

        let project = ManagedProject::new("", "", None);
        assert_eq!(project.display_name(), "Unknown");
    }

    #[test]
    fn test_location_falls_back_to_name() {
        let project = ManagedProject::new("/code/x", "", None);
        assert_eq!(project.location(), "/code/x");

        let project = ManagedProject::new("x", "/code/x", None);
        assert_eq!(project.location(), "/code/x");
    }

    #[test]
    fn test_owner_from_url() {
        let https = ManagedProject::new(
            "bar",
            "",
            Some("https://github.com/foo/bar.git".to_string()),
        );
        assert_eq!(https.owner().as_deref(), Some("foo"));

        let ssh = ManagedProject::new("bar", "", Some("git@github.com:acme/bar.git".to_string()));
        assert_eq!(ssh.owner().as_deref(), Some("acme"));
    }

    #[test]
    fn test_owner_from_path() {
        let project = ManagedProject::new("bar", "/Users/x/code/github.com/foo/bar", None);
        assert_eq!(project.owner().as_deref(), Some("foo"));

        let project = ManagedProject::new("bar", "/srv/bar", None);
        assert_eq!(project.owner(), None);
    }

    #[test]
    fn test_installation_status_serializes_camel_case() {
        let status = InstallationStatus::found("/usr/local/bin/projj");
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["installed"], true);
        assert_eq!(json["executablePath"], "/usr/local/bin/projj");
        assert!(json.get("diagnostic").is_none());
    }
}
