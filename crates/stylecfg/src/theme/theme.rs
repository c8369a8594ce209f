//! The design-token map and its merge rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tokens of one theme dimension: token name → value.
pub type TokenMap = BTreeMap<String, String>;

/// Dimension name → tokens. Used for both overrides and extensions.
pub type ThemeMap = BTreeMap<String, TokenMap>;

/// A named set of design tokens, grouped by dimension.
///
/// Dimensions are things like `spacing`, `maxWidth` or `gridTemplateColumns`;
/// each holds an ordered map of token names to values. Iteration order is
/// stable (sorted by name), so a serialized theme is deterministic.
///
/// # Example
///
/// ```rust
/// use stylecfg::Theme;
///
/// let theme = Theme::new()
///     .with_token("maxWidth", "sm", "24rem")
///     .with_token("maxWidth", "md", "28rem");
///
/// assert_eq!(theme.token("maxWidth", "md"), Some("28rem"));
/// assert_eq!(theme.dimension("maxWidth").map(|d| d.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    dimensions: ThemeMap,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token, returning the theme for chaining.
    pub fn with_token(
        mut self,
        dimension: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert_token(dimension, name, value);
        self
    }

    /// Inserts a token, returning the previous value for that key if any.
    pub fn insert_token(
        &mut self,
        dimension: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.dimensions
            .entry(dimension.into())
            .or_default()
            .insert(name.into(), value.into())
    }

    /// Returns all tokens of a dimension.
    pub fn dimension(&self, name: &str) -> Option<&TokenMap> {
        self.dimensions.get(name)
    }

    /// Returns a single token value.
    pub fn token(&self, dimension: &str, name: &str) -> Option<&str> {
        self.dimensions
            .get(dimension)
            .and_then(|tokens| tokens.get(name))
            .map(String::as_str)
    }

    /// Iterates over dimension names.
    pub fn dimension_names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.keys().map(String::as_str)
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Whether the theme has no dimensions.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Replaces whole dimensions with the given token sets.
    ///
    /// Every token previously in an overridden dimension is dropped. Dimensions
    /// not named in `overrides` are untouched.
    pub fn override_dimensions(&mut self, overrides: &ThemeMap) {
        for (dimension, tokens) in overrides {
            debug!(dimension = %dimension, tokens = tokens.len(), "overriding theme dimension");
            self.dimensions.insert(dimension.clone(), tokens.clone());
        }
    }

    /// Merges extension tokens into the theme, one key at a time.
    ///
    /// Only the named keys change. A key that already exists takes the
    /// extension's value; every other token of the dimension is preserved.
    /// Applying the same extensions twice gives the same theme as once.
    pub fn extend_dimensions(&mut self, extensions: &ThemeMap) {
        for (dimension, tokens) in extensions {
            let target = self.dimensions.entry(dimension.clone()).or_default();
            for (name, value) in tokens {
                if let Some(previous) = target.insert(name.clone(), value.clone()) {
                    if previous != *value {
                        debug!(
                            dimension = %dimension,
                            token = %name,
                            from = %previous,
                            to = %value,
                            "theme extension replaces default token"
                        );
                    }
                }
            }
        }
    }

    /// Consumes the theme, returning the underlying map.
    pub fn into_inner(self) -> ThemeMap {
        self.dimensions
    }
}

impl From<ThemeMap> for Theme {
    fn from(dimensions: ThemeMap) -> Self {
        Self { dimensions }
    }
}
