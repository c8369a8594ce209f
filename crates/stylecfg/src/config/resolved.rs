use crate::content::ContentSet;
use crate::plugin::ResolvedPlugin;
use crate::theme::Theme;

use super::DarkMode;

/// Everything the engine needs, validated and resolved.
///
/// Produced by [`StyleConfig::resolve`](super::StyleConfig::resolve) and never
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub content: ContentSet,
    pub theme: Theme,
    pub plugins: Vec<ResolvedPlugin>,
    pub prefix: Option<String>,
    pub important: bool,
    pub dark_mode: Option<DarkMode>,
}

impl ResolvedConfig {
    /// Prefixes a utility class name with the configured prefix.
    pub fn class_name(&self, utility: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{utility}"),
            None => utility.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(prefix: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            content: ContentSet::default(),
            theme: Theme::new(),
            plugins: Vec::new(),
            prefix: prefix.map(str::to_string),
            important: false,
            dark_mode: None,
        }
    }

    #[test]
    fn test_class_name_with_prefix() {
        assert_eq!(resolved(Some("tw-")).class_name("grid-cols-14"), "tw-grid-cols-14");
    }

    #[test]
    fn test_class_name_without_prefix() {
        assert_eq!(resolved(None).class_name("max-w-8xl"), "max-w-8xl");
    }
}
