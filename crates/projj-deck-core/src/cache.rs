//! Reader for `~/.projj/cache.json`
//!
//! The cache layout is not fixed. Depending on the projj release it is either
//! a list of project records or an object keyed by project (usually the
//! project directory). Both are normalized here into one ordered list of
//! [`ManagedProject`]; the raw layout never leaves this module.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::paths::ManagerPaths;
use crate::types::ManagedProject;

/// Top-level keys that carry cache metadata rather than projects
pub const RESERVED_CACHE_KEYS: &[&str] = &["version", "meta", "config"];

/// Record fields holding the project directory, in lookup order
const PATH_FIELDS: &[&str] = &["path", "dir", "directory"];

/// Record fields holding the origin URL, in lookup order
const URL_FIELDS: &[&str] = &["url", "repo", "repository"];

/// Outer layout of a parsed cache file
enum CacheShape {
    /// `[ {name, path, url}, ... ]`
    Sequence(Vec<Value>),
    /// `{ "<name>": "<path>" | {path|dir|directory, url|repo|repository}, ... }`
    Keyed(Map<String, Value>),
    /// Anything else: no projects
    Unrecognized,
}

impl From<Value> for CacheShape {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items),
            Value::Object(map) => Self::Keyed(map),
            _ => Self::Unrecognized,
        }
    }
}

/// Normalize a parsed cache document into projects, keeping source order
pub fn normalize_cache(value: Value) -> Vec<ManagedProject> {
    match CacheShape::from(value) {
        CacheShape::Sequence(items) => items.into_iter().map(project_from_item).collect(),
        CacheShape::Keyed(map) => map
            .into_iter()
            .filter(|(key, _)| !RESERVED_CACHE_KEYS.contains(&key.as_str()))
            .map(|(key, value)| project_from_entry(key, value))
            .collect(),
        CacheShape::Unrecognized => Vec::new(),
    }
}

/// Sequence element: records are taken as they are
fn project_from_item(item: Value) -> ManagedProject {
    match item {
        Value::Object(record) => {
            match serde_json::from_value::<ManagedProject>(Value::Object(record.clone())) {
                Ok(project) => project,
                Err(_) => ManagedProject {
                    name: first_present(&record, &["name"]).unwrap_or_default(),
                    path: first_present(&record, PATH_FIELDS).unwrap_or_default(),
                    url: first_present(&record, URL_FIELDS),
                },
            }
        }
        other => {
            let path = coerce_to_string(&other);
            ManagedProject::new(path.clone(), path, None)
        }
    }
}

/// Keyed entry: the key is the name, the value is a path or a record
fn project_from_entry(key: String, value: Value) -> ManagedProject {
    let (path, url) = match &value {
        Value::String(path) => (path.clone(), None),
        Value::Object(record) => (
            first_present(record, PATH_FIELDS).unwrap_or_default(),
            first_present(record, URL_FIELDS),
        ),
        other => (coerce_to_string(other), None),
    };

    ManagedProject {
        name: key,
        path,
        url,
    }
}

/// First field that holds a non-empty value, as text
fn first_present(record: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .map(coerce_to_string)
        .find(|s| !s.is_empty())
}

/// Text form of a JSON value; `null` and `false` become empty
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Loads the projj project cache. Read-only; never cached.
#[derive(Debug, Clone)]
pub struct CacheReader {
    path: PathBuf,
}

impl CacheReader {
    pub fn new(paths: &ManagerPaths) -> Self {
        Self::at(paths.cache_path())
    }

    /// Read a cache file at an explicit location
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache, or `None` when it is absent, unreadable or not JSON
    ///
    /// An empty list means the cache was read and holds no projects.
    pub fn load(&self) -> Option<Vec<ManagedProject>> {
        match self.try_load() {
            Ok(projects) => Some(projects),
            Err(e) => {
                debug!("projj cache unavailable: {}", e);
                None
            }
        }
    }

    /// Load the cache, reporting why it could not be read
    pub fn try_load(&self) -> Result<Vec<ManagedProject>> {
        let display = self.path.display().to_string();

        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::cache_unreadable(&display, "file does not exist")
            } else {
                Error::cache_unreadable(&display, e.to_string())
            }
        })?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| Error::cache_unreadable(&display, e.to_string()))?;

        let projects = normalize_cache(value);
        debug!("Loaded {} projects from projj cache", projects.len());
        Ok(projects)
    }
}
