//! Plugin references and their resolution to installed packages.
//!
//! A configuration lists plugins either by identifier or as an invocation with
//! options:
//!
//! ```yaml
//! plugins:
//!   - "@acme/forms"
//!   - name: "@acme/typography"
//!     options:
//!       className: prose
//! ```
//!
//! Resolution is all-or-nothing. [`resolve_all`] locates every reference
//! before returning any of them, so a single missing package means no plugin
//! is handed to the engine.
//!
//! Resolvers are pluggable through [`PluginResolver`]:
//!
//! - [`PluginRegistry`]: packages registered in memory
//! - [`PackageDirResolver`]: packages installed under `node_modules`
//! - [`ResolverChain`]: tries several resolvers in order, first hit wins

mod package_dir;
mod registry;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

pub use package_dir::PackageDirResolver;
pub use registry::PluginRegistry;

/// A plugin as declared in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginRef {
    /// Bare identifier, e.g. `"@acme/forms"`.
    Name(String),
    /// Identifier plus options passed to the plugin.
    Invocation {
        name: String,
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        options: Map<String, Value>,
    },
}

impl PluginRef {
    /// The package identifier.
    pub fn name(&self) -> &str {
        match self {
            PluginRef::Name(name) => name,
            PluginRef::Invocation { name, .. } => name,
        }
    }

    /// Options given with the invocation, if any.
    pub fn options(&self) -> Option<&Map<String, Value>> {
        match self {
            PluginRef::Name(_) => None,
            PluginRef::Invocation { options, .. } => Some(options),
        }
    }
}

impl From<&str> for PluginRef {
    fn from(name: &str) -> Self {
        PluginRef::Name(name.to_string())
    }
}

/// Where a located package lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginLocation {
    /// Registered in memory; no files involved.
    Registered,
    /// Installed package directory.
    Directory(PathBuf),
}

/// A package found by a [`PluginResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPackage {
    pub name: String,
    pub version: Option<String>,
    pub location: PluginLocation,
}

impl PluginPackage {
    /// A package registered in memory.
    pub fn registered(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version.map(str::to_string),
            location: PluginLocation::Registered,
        }
    }
}

/// A declared plugin bound to the package that provides it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlugin {
    pub package: PluginPackage,
    pub options: Map<String, Value>,
}

impl ResolvedPlugin {
    /// The package identifier.
    pub fn name(&self) -> &str {
        &self.package.name
    }
}

/// Locates installed plugin packages by identifier.
pub trait PluginResolver {
    /// Returns the package for `name`, or `None` if it is not installed.
    fn locate(&self, name: &str) -> Option<PluginPackage>;
}

impl<R: PluginResolver + ?Sized> PluginResolver for &R {
    fn locate(&self, name: &str) -> Option<PluginPackage> {
        (**self).locate(name)
    }
}

impl<R: PluginResolver + ?Sized> PluginResolver for Box<R> {
    fn locate(&self, name: &str) -> Option<PluginPackage> {
        (**self).locate(name)
    }
}

/// Tries resolvers in registration order; the first one that locates a
/// package wins.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn PluginResolver>>,
}

impl ResolverChain {
    /// Creates an empty chain that resolves nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resolver, returning the chain for chaining.
    pub fn with(mut self, resolver: impl PluginResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Appends a resolver.
    pub fn push(&mut self, resolver: impl PluginResolver + 'static) {
        self.resolvers.push(Box::new(resolver));
    }
}

impl PluginResolver for ResolverChain {
    fn locate(&self, name: &str) -> Option<PluginPackage> {
        self.resolvers.iter().find_map(|r| r.locate(name))
    }
}

/// Resolves every reference, in declaration order.
///
/// # Errors
///
/// Returns [`ConfigError::PluginNotFound`] for the first reference that no
/// resolver can locate. Nothing is returned for the others in that case.
pub fn resolve_all<R: PluginResolver + ?Sized>(
    plugins: &[PluginRef],
    resolver: &R,
) -> Result<Vec<ResolvedPlugin>> {
    let mut resolved = Vec::with_capacity(plugins.len());
    let mut missing = Vec::new();

    for plugin in plugins {
        match resolver.locate(plugin.name()) {
            Some(package) => {
                debug!(plugin = %plugin.name(), version = ?package.version, "resolved plugin");
                resolved.push(ResolvedPlugin {
                    package,
                    options: plugin.options().cloned().unwrap_or_default(),
                });
            }
            None => {
                warn!(plugin = %plugin.name(), "plugin not found");
                missing.push(plugin.name().to_string());
            }
        }
    }

    match missing.into_iter().next() {
        Some(name) => Err(ConfigError::PluginNotFound { name }),
        None => Ok(resolved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_name_and_options() {
        let bare = PluginRef::from("@acme/forms");
        assert_eq!(bare.name(), "@acme/forms");
        assert!(bare.options().is_none());

        let mut options = Map::new();
        options.insert("strategy".into(), json!("class"));
        let invocation = PluginRef::Invocation {
            name: "@acme/forms".into(),
            options,
        };
        assert_eq!(invocation.name(), "@acme/forms");
        assert_eq!(invocation.options().unwrap()["strategy"], json!("class"));
    }

    #[test]
    fn test_ref_serializes_untagged() {
        let refs = vec![
            PluginRef::from("a"),
            PluginRef::Invocation {
                name: "b".into(),
                options: Map::new(),
            },
        ];
        assert_eq!(
            serde_json::to_value(&refs).unwrap(),
            json!(["a", { "name": "b" }])
        );
    }

    #[test]
    fn test_resolve_all_keeps_order_and_options() {
        let registry = PluginRegistry::new()
            .with_package(PluginPackage::registered("a", Some("1.0.0")))
            .with_package(PluginPackage::registered("b", None));

        let mut options = Map::new();
        options.insert("size".into(), json!(3));
        let plugins = vec![
            PluginRef::Invocation {
                name: "b".into(),
                options,
            },
            PluginRef::from("a"),
        ];

        let resolved = resolve_all(&plugins, &registry).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name(), "b");
        assert_eq!(resolved[0].options["size"], json!(3));
        assert_eq!(resolved[1].name(), "a");
        assert_eq!(resolved[1].package.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_resolve_all_fails_on_first_missing() {
        let registry = PluginRegistry::new().with_package(PluginPackage::registered("a", None));
        let plugins = vec![
            PluginRef::from("a"),
            PluginRef::from("ghost"),
            PluginRef::from("phantom"),
        ];

        let err = resolve_all(&plugins, &registry).unwrap_err();
        assert!(matches!(err, ConfigError::PluginNotFound { ref name } if name == "ghost"));
    }

    #[test]
    fn test_resolve_all_empty_list() {
        let resolved = resolve_all(&[], &ResolverChain::new()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_chain_first_hit_wins() {
        let first = PluginRegistry::new().with_package(PluginPackage::registered("a", Some("1")));
        let second = PluginRegistry::new()
            .with_package(PluginPackage::registered("a", Some("2")))
            .with_package(PluginPackage::registered("b", Some("2")));
        let chain = ResolverChain::new().with(first).with(second);

        assert_eq!(chain.locate("a").unwrap().version.as_deref(), Some("1"));
        assert_eq!(chain.locate("b").unwrap().version.as_deref(), Some("2"));
        assert!(chain.locate("c").is_none());
    }
}
