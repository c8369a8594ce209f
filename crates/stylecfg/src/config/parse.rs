//! Field validation: generic value → [`StyleConfig`].
//!
//! The source text has already been parsed by the time these functions run.
//! Each recognized field is checked for shape and converted; the first
//! problem is reported as [`ConfigError::InvalidField`] with the full field
//! path. Nothing is returned on failure.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{DarkMode, Mode, StyleConfig, ThemeConfig};
use crate::content::ContentSet;
use crate::error::{ConfigError, Result};
use crate::plugin::PluginRef;
use crate::theme::{ThemeMap, TokenMap};

/// Top-level keys this loader understands.
pub const KNOWN_KEYS: &[&str] = &[
    "mode",
    "content",
    "prefix",
    "important",
    "darkMode",
    "theme",
    "plugins",
];

pub(crate) fn from_value(value: Value) -> Result<StyleConfig> {
    let root = match value {
        Value::Object(map) => map,
        // An empty document carries no settings.
        Value::Null => Map::new(),
        other => {
            return Err(ConfigError::malformed(format!(
                "top level must be a mapping, found {}",
                kind(&other)
            )))
        }
    };

    for key in root.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        warn!(key = %key, "ignoring unknown configuration key");
    }

    let mode = optional(&root, "mode", parse_mode)?;
    if mode == Some(Mode::All) {
        debug!("'mode: all' is accepted for compatibility and has no effect");
    }

    let content = optional(&root, "content", parse_content)?.unwrap_or_default();
    ContentSet::new(&content)?;

    Ok(StyleConfig {
        mode,
        content,
        prefix: optional(&root, "prefix", |v, field| expect_str(v, field).map(str::to_string))?,
        important: optional(&root, "important", expect_bool)?.unwrap_or(false),
        dark_mode: optional(&root, "darkMode", parse_dark_mode)?,
        theme: optional(&root, "theme", parse_theme)?.unwrap_or_default(),
        plugins: optional(&root, "plugins", parse_plugins)?.unwrap_or_default(),
    })
}

/// Runs `parse` on `root[key]` unless it is absent or null.
fn optional<T>(
    root: &Map<String, Value>,
    key: &str,
    parse: impl FnOnce(&Value, &str) -> Result<T>,
) -> Result<Option<T>> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse(value, key).map(Some),
    }
}

fn parse_mode(value: &Value, field: &str) -> Result<Mode> {
    match expect_str(value, field)? {
        "all" => Ok(Mode::All),
        "jit" => Ok(Mode::Jit),
        other => Err(ConfigError::invalid_field(
            field,
            format!("unknown mode '{}' (expected 'all' or 'jit')", other),
        )),
    }
}

fn parse_dark_mode(value: &Value, field: &str) -> Result<DarkMode> {
    match expect_str(value, field)? {
        "media" => Ok(DarkMode::Media),
        "class" => Ok(DarkMode::Class),
        other => Err(ConfigError::invalid_field(
            field,
            format!("unknown dark mode '{}' (expected 'media' or 'class')", other),
        )),
    }
}

fn parse_content(value: &Value, field: &str) -> Result<Vec<String>> {
    expect_seq(value, field)?
        .iter()
        .enumerate()
        .map(|(i, item)| expect_str(item, &format!("{field}[{i}]")).map(str::to_string))
        .collect()
}

fn parse_theme(value: &Value, field: &str) -> Result<ThemeConfig> {
    let mut theme = ThemeConfig::default();
    for (key, dimensions) in expect_map(value, field)? {
        let path = format!("{field}.{key}");
        if key == "extend" {
            if !dimensions.is_null() {
                theme.extend = parse_theme_map(dimensions, &path)?;
            }
        } else {
            theme
                .overrides
                .insert(key.clone(), parse_tokens(dimensions, &path)?);
        }
    }
    Ok(theme)
}

fn parse_theme_map(value: &Value, field: &str) -> Result<ThemeMap> {
    expect_map(value, field)?
        .iter()
        .map(|(dimension, tokens)| {
            let tokens = parse_tokens(tokens, &format!("{field}.{dimension}"))?;
            Ok((dimension.clone(), tokens))
        })
        .collect()
}

fn parse_tokens(value: &Value, field: &str) -> Result<TokenMap> {
    expect_map(value, field)?
        .iter()
        .map(|(name, token)| {
            let token = match token {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(ConfigError::invalid_field(
                        format!("{field}.{name}"),
                        format!("expected a token value, found {}", kind(other)),
                    ))
                }
            };
            Ok((name.clone(), token))
        })
        .collect()
}

fn parse_plugins(value: &Value, field: &str) -> Result<Vec<PluginRef>> {
    expect_seq(value, field)?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_plugin(item, &format!("{field}[{i}]")))
        .collect()
}

fn parse_plugin(value: &Value, field: &str) -> Result<PluginRef> {
    match value {
        Value::String(name) => Ok(PluginRef::Name(non_empty(name, field)?)),
        Value::Object(map) => {
            if let Some(key) = map.keys().find(|k| *k != "name" && *k != "options") {
                return Err(ConfigError::invalid_field(
                    format!("{field}.{key}"),
                    "unknown plugin key (expected 'name' or 'options')",
                ));
            }
            let name_field = format!("{field}.name");
            let name = match map.get("name") {
                Some(name) => non_empty(expect_str(name, &name_field)?, &name_field)?,
                None => {
                    return Err(ConfigError::invalid_field(name_field, "missing plugin name"))
                }
            };
            let options = match map.get("options") {
                None | Some(Value::Null) => Map::new(),
                Some(options) => {
                    let options_field = format!("{field}.options");
                    let options = expect_map(options, &options_field)?;
                    reject_nulls(options, &options_field)?;
                    options.clone()
                }
            };
            Ok(PluginRef::Invocation { name, options })
        }
        other => Err(ConfigError::invalid_field(
            field,
            format!(
                "expected a plugin name or a mapping with 'name', found {}",
                kind(other)
            ),
        )),
    }
}

/// Options must be representable in TOML, which has no null.
fn reject_nulls(options: &Map<String, Value>, field: &str) -> Result<()> {
    for (key, value) in options {
        check_not_null(value, &format!("{field}.{key}"))?;
    }
    Ok(())
}

fn check_not_null(value: &Value, field: &str) -> Result<()> {
    match value {
        Value::Null => Err(ConfigError::invalid_field(
            field,
            "null is not allowed in plugin options; omit the key instead",
        )),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check_not_null(item, &format!("{field}[{i}]"))),
        Value::Object(map) => reject_nulls(map, field),
        _ => Ok(()),
    }
}

fn non_empty(name: &str, field: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid_field(field, "plugin name is empty"));
    }
    Ok(trimmed.to_string())
}

fn expect_str<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| mismatch(field, "a string", value))
}

fn expect_bool(value: &Value, field: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| mismatch(field, "a boolean", value))
}

fn expect_seq<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| mismatch(field, "a sequence", value))
}

fn expect_map<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| mismatch(field, "a mapping", value))
}

fn mismatch(field: &str, expected: &str, found: &Value) -> ConfigError {
    ConfigError::invalid_field(field, format!("expected {}, found {}", expected, kind(found)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::InvalidField { field, .. } => field,
            other => panic!("expected InvalidField, got {other}"),
        }
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(from_value(Value::Null).unwrap(), StyleConfig::default());
        assert_eq!(from_value(json!({})).unwrap(), StyleConfig::default());
    }

    #[test]
    fn test_scalar_top_level_is_malformed() {
        let err = from_value(json!(["content"])).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedConfig { .. }));
    }

    #[test]
    fn test_full_document() {
        let config = from_value(json!({
            "mode": "all",
            "content": ["./src/**/*.rs"],
            "prefix": "tw-",
            "important": true,
            "darkMode": "class",
            "theme": {
                "screens": { "tablet": "640px" },
                "extend": {
                    "gridTemplateColumns": { "14": "repeat(14, minmax(0, 1fr))" },
                    "zIndex": { "60": 60 }
                }
            },
            "plugins": ["forms", { "name": "typography", "options": { "className": "prose" } }]
        }))
        .unwrap();

        assert_eq!(config.mode, Some(Mode::All));
        assert_eq!(config.content, vec!["./src/**/*.rs"]);
        assert_eq!(config.prefix.as_deref(), Some("tw-"));
        assert!(config.important);
        assert_eq!(config.dark_mode, Some(DarkMode::Class));
        assert_eq!(config.theme.overrides["screens"]["tablet"], "640px");
        assert_eq!(
            config.theme.extend["gridTemplateColumns"]["14"],
            "repeat(14, minmax(0, 1fr))"
        );
        assert_eq!(config.theme.extend["zIndex"]["60"], "60");
        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins[1].name(), "typography");
    }

    #[test]
    fn test_null_fields_are_absent() {
        let config = from_value(json!({
            "mode": null,
            "content": null,
            "theme": { "extend": null },
            "plugins": null
        }))
        .unwrap();
        assert_eq!(config, StyleConfig::default());
    }

    #[test]
    fn test_empty_content_is_valid() {
        let config = from_value(json!({ "content": [] })).unwrap();
        assert!(config.content.is_empty());
    }

    #[test]
    fn test_content_wrong_shapes() {
        assert_eq!(field_of(from_value(json!({ "content": "src/*.rs" })).unwrap_err()), "content");
        assert_eq!(
            field_of(from_value(json!({ "content": ["a/*.rs", 3] })).unwrap_err()),
            "content[1]"
        );
        assert_eq!(
            field_of(from_value(json!({ "content": ["src/*.{rs"] })).unwrap_err()),
            "content[0]"
        );
    }

    #[test]
    fn test_mode_wrong_values() {
        assert_eq!(field_of(from_value(json!({ "mode": "purge" })).unwrap_err()), "mode");
        assert_eq!(field_of(from_value(json!({ "mode": 1 })).unwrap_err()), "mode");
    }

    #[test]
    fn test_theme_wrong_shapes() {
        assert_eq!(field_of(from_value(json!({ "theme": [] })).unwrap_err()), "theme");
        assert_eq!(
            field_of(from_value(json!({ "theme": { "extend": "x" } })).unwrap_err()),
            "theme.extend"
        );
        assert_eq!(
            field_of(
                from_value(json!({ "theme": { "extend": { "maxWidth": ["90rem"] } } }))
                    .unwrap_err()
            ),
            "theme.extend.maxWidth"
        );
        assert_eq!(
            field_of(
                from_value(json!({ "theme": { "extend": { "maxWidth": { "8xl": { "a": 1 } } } } }))
                    .unwrap_err()
            ),
            "theme.extend.maxWidth.8xl"
        );
        assert_eq!(
            field_of(from_value(json!({ "theme": { "spacing": { "1": null } } })).unwrap_err()),
            "theme.spacing.1"
        );
    }

    #[test]
    fn test_plugin_wrong_shapes() {
        assert_eq!(field_of(from_value(json!({ "plugins": {} })).unwrap_err()), "plugins");
        assert_eq!(field_of(from_value(json!({ "plugins": [7] })).unwrap_err()), "plugins[0]");
        assert_eq!(field_of(from_value(json!({ "plugins": ["  "] })).unwrap_err()), "plugins[0]");
        assert_eq!(
            field_of(from_value(json!({ "plugins": ["a", { "options": {} }] })).unwrap_err()),
            "plugins[1].name"
        );
        assert_eq!(
            field_of(from_value(json!({ "plugins": [{ "name": "a", "opts": {} }] })).unwrap_err()),
            "plugins[0].opts"
        );
        assert_eq!(
            field_of(from_value(json!({ "plugins": [{ "name": "a", "options": [1] }] })).unwrap_err()),
            "plugins[0].options"
        );
    }

    #[test]
    fn test_plugin_options_reject_null() {
        assert_eq!(
            field_of(
                from_value(json!({ "plugins": [{ "name": "forms", "options": { "a": null } }] }))
                    .unwrap_err()
            ),
            "plugins[0].options.a"
        );
        assert_eq!(
            field_of(
                from_value(json!({
                    "plugins": ["x", { "name": "forms", "options": { "a": { "b": [1, null] } } }]
                }))
                .unwrap_err()
            ),
            "plugins[1].options.a.b[1]"
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = from_value(json!({ "content": [], "corePlugins": { "float": false } })).unwrap();
        assert_eq!(config, StyleConfig::default());
    }
}
