//! Source formats for configuration files.
//!
//! | Priority | File name | Format |
//! |----------|-----------|--------|
//! | 1 (highest) | `stylecfg.yaml` | YAML |
//! | 2 | `stylecfg.yml` | YAML |
//! | 3 | `stylecfg.json` | JSON |
//! | 4 (lowest) | `stylecfg.toml` | TOML |
//!
//! Every format is first parsed into a generic [`serde_json::Value`] so that
//! field validation is shared.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Base name of the configuration file looked up by convention.
pub const CONFIG_STEM: &str = "stylecfg";

/// Recognized extensions in discovery priority order.
pub const CONFIG_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json", ".toml"];

/// A structured-data format a configuration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Determines the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Maps an extension (with or without the leading dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// The canonical extension, without a dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// Parses source text into a generic value.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MalformedConfig`] if the text is not valid for this format.
    pub fn parse(self, source: &str) -> Result<Value> {
        match self {
            Self::Yaml => serde_yaml::from_str(source).map_err(|e| ConfigError::malformed(e.to_string())),
            Self::Json => serde_json::from_str(source).map_err(|e| ConfigError::malformed(e.to_string())),
            Self::Toml => toml::from_str(source).map_err(|e| ConfigError::malformed(e.to_string())),
        }
    }

    /// Serializes a value in this format.
    pub fn serialize<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| ConfigError::Serialize(e.to_string())),
            Self::Json => serde_json::to_string_pretty(value)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| ConfigError::Serialize(e.to_string())),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("unknown format '{}' (expected yaml, json or toml)", s))
    }
}

/// Candidate file names for discovery, in priority order.
pub fn candidate_names() -> Vec<String> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| format!("{}{}", CONFIG_STEM, ext))
        .collect()
}
