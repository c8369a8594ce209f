//! Content globs: which source files the engine scans for class usage.
//!
//! Patterns are relative to the project root and use the usual glob syntax,
//! plus two conveniences found in most frontend toolchains:
//!
//! - Brace groups: `src/**/*.{html,rs}` expands to one pattern per alternative.
//!   Groups may nest.
//! - Exclusions: a leading `!` removes matches, e.g. `!src/vendor/**`.
//!
//! Patterns are always relative: a leading `/` or any `..` component is
//! rejected. Brace groups may not contain empty alternatives (`{}`, `{,a}`).
//!
//! An empty set is valid and matches nothing.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use stylecfg::ContentSet;
//!
//! let set = ContentSet::new(&[
//!     "./src/**/*.{html,rs}".to_string(),
//!     "!src/generated/**".to_string(),
//! ]).unwrap();
//!
//! assert!(set.matches(Path::new("src/ui/page.rs")));
//! assert!(!set.matches(Path::new("src/generated/out.rs")));
//! assert!(!set.matches(Path::new("src/ui/page.css")));
//! ```

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One entry of the `content` list, compiled.
#[derive(Debug, Clone)]
struct ContentPattern {
    source: String,
    exclude: bool,
    patterns: Vec<Pattern>,
}

/// A compiled set of content globs.
#[derive(Debug, Clone, Default)]
pub struct ContentSet {
    entries: Vec<ContentPattern>,
}

impl ContentSet {
    /// Compiles the given globs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] naming `content[i]` for the first
    /// entry that is empty, escapes the root, has unbalanced braces or an empty
    /// alternative, or is not a valid glob.
    pub fn new(globs: &[String]) -> Result<Self> {
        let entries = globs
            .iter()
            .enumerate()
            .map(|(index, glob)| {
                compile(glob)
                    .map_err(|message| ConfigError::invalid_field(format!("content[{index}]"), message))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Whether the set has no patterns at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries, counting exclusions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The original pattern strings, in declaration order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.source.as_str())
    }

    /// Whether a root-relative path is selected by the set.
    ///
    /// A path is selected when at least one inclusion matches it and no
    /// exclusion does.
    pub fn matches(&self, path: &Path) -> bool {
        let path = strip_dot(path);
        let hit = |entry: &ContentPattern| {
            entry
                .patterns
                .iter()
                .any(|p| p.matches_path_with(path, MATCH_OPTIONS))
        };

        let included = self.entries.iter().filter(|e| !e.exclude).any(hit);
        included && !self.entries.iter().filter(|e| e.exclude).any(hit)
    }

    /// Lists existing files under `root` selected by the set.
    ///
    /// Results are root-joined, sorted and free of duplicates. Entries that
    /// cannot be read while walking are skipped with a warning.
    pub fn files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let escaped_root = Pattern::escape(&root.to_string_lossy());
        let mut found = BTreeSet::new();

        for entry in self.entries.iter().filter(|e| !e.exclude) {
            for pattern in &entry.patterns {
                let full = format!("{}/{}", escaped_root.trim_end_matches('/'), pattern.as_str());
                let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| {
                    ConfigError::invalid_field("content", format!("{}: {}", entry.source, e))
                })?;
                for item in paths {
                    match item {
                        Ok(path) if path.is_file() => {
                            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                            if self.matches(&relative) {
                                found.insert(path);
                            }
                        }
                        Ok(_) => {}
                        Err(err) => warn!(error = %err, "skipping unreadable content path"),
                    }
                }
            }
        }

        debug!(root = %root.display(), files = found.len(), "content scan complete");
        Ok(found.into_iter().collect())
    }
}

fn compile(glob: &str) -> std::result::Result<ContentPattern, String> {
    let (exclude, body) = match glob.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, glob),
    };
    let body = body.strip_prefix("./").unwrap_or(body);
    if body.is_empty() {
        return Err("glob pattern is empty".to_string());
    }
    if body.starts_with('/') || Path::new(body).components().any(|c| c == Component::ParentDir) {
        return Err(format!("glob '{}' points outside the project root", glob));
    }

    let patterns = expand_braces(body)?
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| format!("invalid glob '{}': {}", glob, e.msg)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(ContentPattern {
        source: glob.to_string(),
        exclude,
        patterns,
    })
}

/// Expands `{a,b}` groups into one pattern per alternative.
fn expand_braces(pattern: &str) -> std::result::Result<Vec<String>, String> {
    let Some(open) = pattern.find('{') else {
        if pattern.contains('}') {
            return Err(format!("unmatched '}}' in '{}'", pattern));
        }
        return Ok(vec![pattern.to_string()]);
    };
    if pattern[..open].contains('}') {
        return Err(format!("unmatched '}}' in '{}'", pattern));
    }

    let mut depth = 0usize;
    let mut bounds = vec![open];
    let mut close = None;
    for (offset, c) in pattern[open..].char_indices() {
        let i = open + offset;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => bounds.push(i),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| format!("unmatched '{{' in '{}'", pattern))?;
    bounds.push(close);

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut expanded = Vec::new();
    for pair in bounds.windows(2) {
        let alternative = &pattern[pair[0] + 1..pair[1]];
        if alternative.is_empty() {
            return Err(format!("empty alternative in brace group of '{}'", pattern));
        }
        expanded.extend(expand_braces(&format!("{prefix}{alternative}{suffix}"))?);
    }
    Ok(expanded)
}

fn strip_dot(path: &Path) -> &Path {
    path.strip_prefix("./").unwrap_or(path)
}
