//! In-memory plugin registry.

use std::collections::HashMap;

use super::{PluginPackage, PluginResolver};

/// Plugins registered by name, without touching the filesystem.
///
/// Useful for engines that bundle their first-party plugins, and for tests.
///
/// # Example
///
/// ```rust
/// use stylecfg::{PluginPackage, PluginRegistry, PluginResolver};
///
/// let registry = PluginRegistry::new()
///     .with_package(PluginPackage::registered("@acme/forms", Some("0.5.7")));
///
/// assert!(registry.locate("@acme/forms").is_some());
/// assert!(registry.locate("@acme/typography").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    packages: HashMap<String, PluginPackage>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a package, returning the registry for chaining.
    pub fn with_package(mut self, package: PluginPackage) -> Self {
        self.register(package);
        self
    }

    /// Registers a package, replacing any previous one with the same name.
    pub fn register(&mut self, package: PluginPackage) {
        self.packages.insert(package.name.clone(), package);
    }

    /// Names of all registered packages, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PluginResolver for PluginRegistry {
    fn locate(&self, name: &str) -> Option<PluginPackage> {
        self.packages.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = PluginRegistry::new();
        registry.register(PluginPackage::registered("forms", Some("1.0.0")));
        registry.register(PluginPackage::registered("forms", Some("2.0.0")));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.locate("forms").unwrap().version.as_deref(),
            Some("2.0.0")
        );
    }

    #[test]
    fn test_empty_registry_locates_nothing() {
        let registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.locate("forms").is_none());
    }
}
