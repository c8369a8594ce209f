//! # stylecfg - Configuration for utility-first stylesheet engines
//!
//! `stylecfg` loads and validates the configuration file a utility-first CSS
//! engine reads at startup: which source files to scan for class names, how
//! to change the default design-token theme, and which plugins to activate.
//! The engine itself is not part of this crate.
//!
//! ## Core Concepts
//!
//! - [`StyleConfig`]: The validated configuration, loaded once per build
//! - [`ContentSet`]: Compiled content globs, with brace groups and exclusions
//! - [`Theme`]: Design tokens grouped by dimension, merged additively
//! - [`PluginResolver`]: Maps declared plugins to installed packages
//! - [`ResolvedConfig`]: The immutable, engine-facing snapshot
//!
//! ## Quick Start
//!
//! ```rust
//! use stylecfg::{default_theme, ConfigFormat, PluginPackage, PluginRegistry, StyleConfig};
//!
//! let config = StyleConfig::parse(r#"
//! mode: all
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
//! "#, ConfigFormat::Yaml).unwrap();
//!
//! let plugins = PluginRegistry::new()
//!     .with_package(PluginPackage::registered("@acme/forms", Some("0.5.7")));
//!
//! let resolved = config.resolve(&default_theme(), &plugins).unwrap();
//! assert_eq!(resolved.theme.token("gridTemplateColumns", "14"), Some("repeat(14, minmax(0, 1fr))"));
//! assert_eq!(resolved.theme.token("gridTemplateColumns", "12"), Some("repeat(12, minmax(0, 1fr))"));
//! assert_eq!(resolved.plugins[0].name(), "@acme/forms");
//! ```
//!
//! ## Errors
//!
//! All failures are reported through [`ConfigError`] and are fatal for the
//! build: a malformed source, a field with the wrong shape, or a plugin that
//! is not installed. A failed load never yields a partial configuration.
//!
//! ## File Discovery
//!
//! [`StyleConfig::discover`] looks for `stylecfg.yaml`, `stylecfg.yml`,
//! `stylecfg.json` and `stylecfg.toml` under the project root, in that order.

pub mod config;
pub mod content;
mod error;
pub mod plugin;
pub mod theme;

pub use config::{locate, ConfigFormat, DarkMode, Mode, ResolvedConfig, StyleConfig, ThemeConfig};
pub use content::ContentSet;
pub use error::{ConfigError, Result};
pub use plugin::{
    PackageDirResolver, PluginLocation, PluginPackage, PluginRef, PluginRegistry, PluginResolver,
    ResolvedPlugin, ResolverChain,
};
pub use theme::{default_theme, Theme, ThemeMap, TokenMap};
