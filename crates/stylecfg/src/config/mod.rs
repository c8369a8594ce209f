//! The configuration object and its loaders.
//!
//! A [`StyleConfig`] is read once per build, validated completely, and then
//! treated as an immutable value. Loading never returns a partially populated
//! object: it either yields a fully validated config or an error naming the
//! file, field or plugin at fault.
//!
//! ## File Format
//!
//! ```yaml
//! mode: all                 # legacy, accepted and ignored
//! content:
//!   - "./src/**/*.{html,rs}"
//! theme:
//!   extend:
//!     gridTemplateColumns:
//!       "14": "repeat(14, minmax(0, 1fr))"
//!     maxWidth:
//!       8xl: 90rem
//! plugins:
//!   - "@acme/forms"
//! ```
//!
//! The same structure can be written as JSON or TOML; see [`ConfigFormat`].

mod format;
mod parse;
mod resolved;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::content::ContentSet;
use crate::error::{ConfigError, Result};
use crate::plugin::{resolve_all, PluginRef, PluginResolver, ResolvedPlugin};
use crate::theme::{Theme, ThemeMap};

pub use format::{candidate_names, ConfigFormat, CONFIG_EXTENSIONS, CONFIG_STEM};
pub use parse::KNOWN_KEYS;
pub use resolved::ResolvedConfig;

/// Legacy operating mode.
///
/// Older engines used this to select how content was scanned. Current engines
/// ignore it; it is kept so existing files load and round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    All,
    Jit,
}

/// How dark-mode variants are triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Follow the operating system preference.
    Media,
    /// Follow a class on an ancestor element.
    Class,
}

/// The `theme` section: whole-dimension overrides plus per-key extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    /// Dimensions that replace the defaults entirely.
    #[serde(flatten)]
    pub overrides: ThemeMap,
    /// Tokens merged into the defaults one key at a time.
    #[serde(skip_serializing_if = "ThemeMap::is_empty")]
    pub extend: ThemeMap,
}

impl ThemeConfig {
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.extend.is_empty()
    }
}

/// Build parameters handed to the styling engine.
///
/// # Example
///
/// ```rust
/// use stylecfg::{default_theme, ConfigFormat, StyleConfig};
///
/// let config = StyleConfig::parse(r#"
/// content: ["./src/**/*.rs"]
/// theme:
///   extend:
///     maxWidth:
///       8xl: 90rem
/// "#, ConfigFormat::Yaml).unwrap();
///
/// let theme = config.merge_theme(&default_theme());
/// assert_eq!(theme.token("maxWidth", "8xl"), Some("90rem"));
/// assert_eq!(theme.token("maxWidth", "sm"), Some("24rem"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Glob patterns of files to scan for class usage.
    pub content: Vec<String>,
    /// Prefix prepended to every generated utility class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Mark every generated declaration `!important`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<DarkMode>,
    #[serde(skip_serializing_if = "ThemeConfig::is_empty")]
    pub theme: ThemeConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginRef>,
}

impl StyleConfig {
    /// Parses configuration source text.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedConfig`] if the text is not valid `format`
    ///   data or its top level is not a mapping
    /// - [`ConfigError::InvalidField`] if a recognized field has the wrong shape
    pub fn parse(source: &str, format: ConfigFormat) -> Result<Self> {
        let value = format.parse(source)?;
        parse::from_value(value)
    }

    /// Loads a configuration file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Everything [`parse`](Self::parse) returns, with the path attached, plus
    /// [`ConfigError::UnsupportedFormat`] and [`ConfigError::Io`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&source, format).map_err(|e| e.with_path(path))?;
        debug!(
            path = %path.display(),
            globs = config.content.len(),
            plugins = config.plugins.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Finds and loads the configuration file under a project root.
    ///
    /// See [`locate`] for the lookup rules.
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::load(locate(root)?)
    }

    /// Serializes the configuration in the given format.
    ///
    /// Loading the output yields a value equal to `self`.
    pub fn to_string_as(&self, format: ConfigFormat) -> Result<String> {
        format.serialize(self)
    }

    /// The `content` globs.
    pub fn content_globs(&self) -> &[String] {
        &self.content
    }

    /// The `theme.extend` section.
    pub fn theme_extensions(&self) -> &ThemeMap {
        &self.theme.extend
    }

    /// Compiles the content globs.
    pub fn content_set(&self) -> Result<ContentSet> {
        ContentSet::new(&self.content)
    }

    /// Combines this configuration's theme section with `defaults`.
    ///
    /// Overridden dimensions are replaced wholesale; extension tokens are
    /// inserted key by key. `defaults` itself is not modified, and merging
    /// the result again with the same configuration changes nothing.
    pub fn merge_theme(&self, defaults: &Theme) -> Theme {
        let mut theme = defaults.clone();
        theme.override_dimensions(&self.theme.overrides);
        theme.extend_dimensions(&self.theme.extend);
        theme
    }

    /// Resolves every declared plugin.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PluginNotFound`] for the first plugin that cannot be
    /// located; no plugins are returned in that case.
    pub fn resolve_plugins<R: PluginResolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> Result<Vec<ResolvedPlugin>> {
        resolve_all(&self.plugins, resolver)
    }

    /// Produces the engine-facing snapshot: compiled content, merged theme and
    /// resolved plugins. Fails as a whole if any part fails.
    pub fn resolve<R: PluginResolver + ?Sized>(
        &self,
        defaults: &Theme,
        resolver: &R,
    ) -> Result<ResolvedConfig> {
        let content = self.content_set()?;
        let plugins = self.resolve_plugins(resolver)?;
        Ok(ResolvedConfig {
            content,
            theme: self.merge_theme(defaults),
            plugins,
            prefix: self.prefix.clone(),
            important: self.important,
            dark_mode: self.dark_mode,
        })
    }
}

/// Finds the configuration file directly under `root`.
///
/// Candidates are tried in [`CONFIG_EXTENSIONS`] order; the first existing
/// file wins.
///
/// # Errors
///
/// [`ConfigError::NotFound`] listing every candidate if none exists.
pub fn locate<P: AsRef<Path>>(root: P) -> Result<PathBuf> {
    let root = root.as_ref();
    let candidates = candidate_names();
    candidates
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::NotFound {
            root: root.to_path_buf(),
            candidates,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{PluginPackage, PluginRegistry};
    use crate::theme::default_theme;
    use std::fs;
    use tempfile::TempDir;

    const YAML: &str = r#"
mode: all
content:
  - "./src/**/*.{html,rs}"
theme:
  extend:
    gridTemplateColumns:
      "14": "repeat(14, minmax(0, 1fr))"
    maxWidth:
      8xl: 90rem
plugins:
  - "@acme/forms"
"#;

    #[test]
    fn test_parse_yaml() {
        let config = StyleConfig::parse(YAML, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.mode, Some(Mode::All));
        assert_eq!(config.content_globs(), &["./src/**/*.{html,rs}".to_string()]);
        assert_eq!(config.theme_extensions().len(), 2);
        assert_eq!(config.plugins, vec![PluginRef::from("@acme/forms")]);
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let config = StyleConfig {
            dark_mode: Some(DarkMode::Media),
            important: true,
            ..Default::default()
        };
        let json = config.to_string_as(ConfigFormat::Json).unwrap();
        assert!(json.contains("\"darkMode\": \"media\""));
        assert!(json.contains("\"important\": true"));
        assert!(!json.contains("plugins"));
    }

    #[test]
    fn test_theme_section_serializes_flat() {
        let mut config = StyleConfig::default();
        config
            .theme
            .overrides
            .insert("screens".into(), [("tablet".to_string(), "640px".to_string())].into());
        config
            .theme
            .extend
            .insert("maxWidth".into(), [("8xl".to_string(), "90rem".to_string())].into());

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["theme"]["screens"]["tablet"], "640px");
        assert_eq!(value["theme"]["extend"]["maxWidth"]["8xl"], "90rem");
    }

    #[test]
    fn test_merge_theme_does_not_touch_defaults() {
        let config = StyleConfig::parse(YAML, ConfigFormat::Yaml).unwrap();
        let defaults = default_theme();
        let before = defaults.clone();

        let merged = config.merge_theme(&defaults);

        assert_eq!(defaults, before);
        assert_eq!(merged.token("maxWidth", "8xl"), Some("90rem"));
    }

    #[test]
    fn test_resolve_builds_snapshot() {
        let config = StyleConfig::parse(YAML, ConfigFormat::Yaml).unwrap();
        let registry = PluginRegistry::new()
            .with_package(PluginPackage::registered("@acme/forms", Some("0.5.7")));

        let resolved = config.resolve(&default_theme(), &registry).unwrap();

        assert_eq!(resolved.plugins.len(), 1);
        assert_eq!(resolved.content.len(), 1);
        assert_eq!(
            resolved.theme.token("gridTemplateColumns", "14"),
            Some("repeat(14, minmax(0, 1fr))")
        );
    }

    #[test]
    fn test_resolve_fails_without_plugin() {
        let config = StyleConfig::parse(YAML, ConfigFormat::Yaml).unwrap();
        let err = config
            .resolve(&default_theme(), &PluginRegistry::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::PluginNotFound { .. }));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stylecfg.js");
        fs::write(&path, "module.exports = {}").unwrap();

        let err = StyleConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file_is_io() {
        let dir = TempDir::new().unwrap();
        let err = StyleConfig::load(dir.path().join("stylecfg.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_locate_priority() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stylecfg.toml"), "").unwrap();
        fs::write(dir.path().join("stylecfg.json"), "{}").unwrap();

        assert_eq!(locate(dir.path()).unwrap(), dir.path().join("stylecfg.json"));

        fs::write(dir.path().join("stylecfg.yml"), "").unwrap();
        assert_eq!(locate(dir.path()).unwrap(), dir.path().join("stylecfg.yml"));
    }

    #[test]
    fn test_locate_not_found() {
        let dir = TempDir::new().unwrap();
        let err = locate(dir.path()).unwrap_err();
        match err {
            ConfigError::NotFound { candidates, .. } => assert_eq!(candidates.len(), 4),
            other => panic!("unexpected error: {other}"),
        }
    }
}
