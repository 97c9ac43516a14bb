// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles allerscan.toml parsing with version validation and unknown key
//! warnings. Every field is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::acquire::DEFAULT_MAX_FILE_BYTES;
use crate::allergen::{AllergenSet, DEFAULT_ALLERGENS};
use crate::error::{Error, Result};
use crate::highlight::HighlightStyle;
use crate::history::DEFAULT_MAX_ENTRIES;
use crate::report::DEFAULT_MIN_TEXT_CHARS;

/// Config file name searched for by [`find_config`].
pub const CONFIG_FILE: &str = "allerscan.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known keys per section; the empty section name is the top level.
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    (
        "",
        &["version", "allergens", "scan", "history", "highlight", "storage"],
    ),
    ("allergens", &["defaults"]),
    ("scan", &["min_text_chars", "max_file_bytes"]),
    ("history", &["max_entries"]),
    ("highlight", &["open", "close", "escape_html"]),
    ("storage", &["dir"]),
];

/// Full configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    #[serde(default)]
    pub allergens: AllergensConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    /// Markers used when rendering highlighted text.
    #[serde(default)]
    pub highlight: HighlightStyle,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            allergens: AllergensConfig::default(),
            scan: ScanConfig::default(),
            history: HistoryConfig::default(),
            highlight: HighlightStyle::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Allergen set used until the user changes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AllergensConfig {
    pub defaults: Vec<String>,
}

impl Default for AllergensConfig {
    fn default() -> Self {
        Self {
            defaults: DEFAULT_ALLERGENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Scan pipeline limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Minimum non-whitespace characters for usable text (default: 10).
    pub min_text_chars: usize,

    /// Largest input file accepted, in bytes (default: 5 MiB).
    pub max_file_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Reports kept before the oldest is evicted (default: 50).
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; relative paths resolve against the config file's
    /// directory.
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".allerscan"),
        }
    }
}

impl Config {
    /// The configured default allergen set.
    pub fn default_allergens(&self) -> AllergenSet {
        AllergenSet::from_terms(&self.allergens.defaults)
    }

    /// Data directory, resolved against `base` when relative.
    pub fn data_dir(&self, base: &Path) -> PathBuf {
        if self.storage.dir.is_absolute() {
            self.storage.dir.clone()
        } else {
            base.join(&self.storage.dir)
        }
    }
}

/// Load and validate config from a file path, warning on unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (config, unknown) = parse(&content, path)?;
    for key in &unknown {
        warn_unknown_key(path, key);
    }
    Ok(config)
}

/// Parse config from string content.
///
/// Returns the config and the dotted paths of keys that were ignored.
pub fn parse(content: &str, path: &Path) -> Result<(Config, Vec<String>)> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let table: toml::Table = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = match table.get("version") {
        Some(toml::Value::Integer(v)) => *v,
        Some(_) => return Err(config_error("version must be an integer".to_string())),
        None => {
            return Err(config_error(
                "missing required field: version".to_string(),
            ));
        }
    };
    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})\n  Upgrade allerscan to use this config.",
            version, SUPPORTED_VERSION
        )));
    }

    let unknown = unknown_keys(&table);

    let config: Config =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;
    validate(&config).map_err(config_error)?;
    Ok((config, unknown))
}

fn unknown_keys(table: &toml::Table) -> Vec<String> {
    let known = |section: &str, key: &str| {
        KNOWN_KEYS
            .iter()
            .any(|(s, keys)| *s == section && keys.contains(&key))
    };

    let mut unknown = Vec::new();
    for (key, value) in table {
        if !known("", key) {
            unknown.push(key.clone());
            continue;
        }
        if let toml::Value::Table(section) = value {
            for nested in section.keys() {
                if !known(key, nested) {
                    unknown.push(format!("{}.{}", key, nested));
                }
            }
        }
    }
    unknown
}

fn validate(config: &Config) -> std::result::Result<(), String> {
    if config.history.max_entries == 0 {
        return Err("history.max_entries must be at least 1".to_string());
    }
    if config.scan.max_file_bytes == 0 {
        return Err("scan.max_file_bytes must be at least 1".to_string());
    }
    Ok(())
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "allerscan: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Find allerscan.toml in `start_dir` or its ancestors, stopping at a git
/// root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Resolve the config path from an explicit flag or by discovery.
///
/// An explicit path that does not exist is an error; discovery finding
/// nothing means defaults.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => Ok(find_config(cwd)),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
