//! Error types for configuration loading and resolution.
//!
//! Every failure is fatal for the build that consumes the configuration, so
//! there is a single error enum. Each variant names the offending file, field
//! or plugin so the diagnostic can be shown as-is.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading, validating or resolving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found by convention discovery.
    #[error("no configuration file found in {}: looked for {}", .root.display(), .candidates.join(", "))]
    NotFound {
        /// The directory that was searched.
        root: PathBuf,
        /// File names tried, in priority order.
        candidates: Vec<String>,
    },

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not map to a known source format.
    #[error("unsupported configuration format for {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The source is not valid structured data, or its top level is not a mapping.
    #[error("malformed config{}: {message}", location(.path))]
    MalformedConfig {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Parser diagnostic.
        message: String,
    },

    /// A recognized field is present but has the wrong shape.
    #[error("invalid field '{field}'{}: {message}", location(.path))]
    InvalidField {
        /// Dotted/indexed path of the field, e.g. `content[2]`.
        field: String,
        /// Description of what was wrong.
        message: String,
        /// Optional source file path.
        path: Option<PathBuf>,
    },

    /// A declared plugin could not be resolved to an installed package.
    #[error("plugin '{name}' not found")]
    PluginNotFound { name: String },

    /// The configuration could not be written back out.
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

impl ConfigError {
    /// Create an [`InvalidField`](ConfigError::InvalidField) error without a path.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Create a [`MalformedConfig`](ConfigError::MalformedConfig) error without a path.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedConfig {
            path: None,
            message: message.into(),
        }
    }

    /// Attaches a source path to parse and validation errors that lack one.
    pub(crate) fn with_path(self, source: &Path) -> Self {
        match self {
            Self::MalformedConfig { path: None, message } => Self::MalformedConfig {
                path: Some(source.to_path_buf()),
                message,
            },
            Self::InvalidField {
                field,
                message,
                path: None,
            } => Self::InvalidField {
                field,
                message,
                path: Some(source.to_path_buf()),
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
