//! Built-in default tokens.
//!
//! These mirror the stock scale shipped by common utility-first toolchains for
//! the dimensions a configuration usually extends. Engines with their own
//! defaults can build a [`Theme`] themselves and pass it to
//! [`StyleConfig::merge_theme`](crate::StyleConfig::merge_theme) instead.

use super::Theme;

const SCREENS: &[(&str, &str)] = &[
    ("sm", "640px"),
    ("md", "768px"),
    ("lg", "1024px"),
    ("xl", "1280px"),
    ("2xl", "1536px"),
];

const SPACING: &[(&str, &str)] = &[
    ("px", "1px"),
    ("0", "0px"),
    ("0.5", "0.125rem"),
    ("1", "0.25rem"),
    ("2", "0.5rem"),
    ("3", "0.75rem"),
    ("4", "1rem"),
    ("6", "1.5rem"),
    ("8", "2rem"),
    ("12", "3rem"),
    ("16", "4rem"),
    ("24", "6rem"),
    ("32", "8rem"),
    ("64", "16rem"),
    ("96", "24rem"),
];

const GRID_TEMPLATE_COLUMNS: &[(&str, &str)] = &[
    ("none", "none"),
    ("1", "repeat(1, minmax(0, 1fr))"),
    ("2", "repeat(2, minmax(0, 1fr))"),
    ("3", "repeat(3, minmax(0, 1fr))"),
    ("4", "repeat(4, minmax(0, 1fr))"),
    ("5", "repeat(5, minmax(0, 1fr))"),
    ("6", "repeat(6, minmax(0, 1fr))"),
    ("7", "repeat(7, minmax(0, 1fr))"),
    ("8", "repeat(8, minmax(0, 1fr))"),
    ("9", "repeat(9, minmax(0, 1fr))"),
    ("10", "repeat(10, minmax(0, 1fr))"),
    ("11", "repeat(11, minmax(0, 1fr))"),
    ("12", "repeat(12, minmax(0, 1fr))"),
];

const MAX_WIDTH: &[(&str, &str)] = &[
    ("none", "none"),
    ("0", "0rem"),
    ("xs", "20rem"),
    ("sm", "24rem"),
    ("md", "28rem"),
    ("lg", "32rem"),
    ("xl", "36rem"),
    ("2xl", "42rem"),
    ("3xl", "48rem"),
    ("4xl", "56rem"),
    ("5xl", "64rem"),
    ("6xl", "72rem"),
    ("7xl", "80rem"),
    ("full", "100%"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
    ("prose", "65ch"),
];

const FONT_FAMILY: &[(&str, &str)] = &[
    (
        "sans",
        "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\"",
    ),
    (
        "serif",
        "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif",
    ),
    (
        "mono",
        "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace",
    ),
];

const BORDER_RADIUS: &[(&str, &str)] = &[
    ("none", "0px"),
    ("sm", "0.125rem"),
    ("DEFAULT", "0.25rem"),
    ("md", "0.375rem"),
    ("lg", "0.5rem"),
    ("xl", "0.75rem"),
    ("full", "9999px"),
];

const Z_INDEX: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("0", "0"),
    ("10", "10"),
    ("20", "20"),
    ("30", "30"),
    ("40", "40"),
    ("50", "50"),
];

const DIMENSIONS: &[(&str, &[(&str, &str)])] = &[
    ("screens", SCREENS),
    ("spacing", SPACING),
    ("gridTemplateColumns", GRID_TEMPLATE_COLUMNS),
    ("maxWidth", MAX_WIDTH),
    ("fontFamily", FONT_FAMILY),
    ("borderRadius", BORDER_RADIUS),
    ("zIndex", Z_INDEX),
];

/// Returns the built-in default theme.
pub fn default_theme() -> Theme {
    let mut theme = Theme::new();
    for (dimension, tokens) in DIMENSIONS {
        for (name, value) in *tokens {
            theme.insert_token(*dimension, *name, *value);
        }
    }
    theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_columns_stop_at_twelve() {
        let theme = default_theme();
        let grid = theme.dimension("gridTemplateColumns").unwrap();
        assert_eq!(grid.len(), 13);
        assert_eq!(theme.token("gridTemplateColumns", "12"), Some("repeat(12, minmax(0, 1fr))"));
        assert_eq!(theme.token("gridTemplateColumns", "14"), None);
    }

    #[test]
    fn test_default_has_every_dimension() {
        let theme = default_theme();
        let names: Vec<_> = theme.dimension_names().collect();
        for (dimension, _) in DIMENSIONS {
            assert!(names.contains(dimension), "missing {}", dimension);
        }
    }
}
