//! Subcommand implementations. Each returns the text to print.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use console::style;
use stylecfg::{default_theme, locate, ConfigFormat, PackageDirResolver, StyleConfig};
use tracing::{debug, info};

/// A loaded configuration and the root it belongs to.
pub struct Project {
    pub root: PathBuf,
    pub path: PathBuf,
    pub config: StyleConfig,
}

impl Project {
    /// Loads `config` if given, otherwise discovers the file under `root`.
    pub fn open(root: &Path, config: Option<&Path>) -> anyhow::Result<Self> {
        let path = match config {
            Some(path) => path.to_path_buf(),
            None => locate(root)?,
        };
        debug!(path = %path.display(), explicit = config.is_some(), "using configuration file");
        let config = StyleConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        debug!(
            content = config.content.len(),
            plugins = config.plugins.len(),
            "configuration loaded"
        );
        Ok(Self {
            root: root.to_path_buf(),
            path,
            config,
        })
    }

    fn resolver(&self) -> PackageDirResolver {
        PackageDirResolver::new(&self.root).search_ancestors(true)
    }
}

pub fn check(project: &Project) -> anyhow::Result<String> {
    let resolved = project
        .config
        .resolve(&default_theme(), &project.resolver())
        .with_context(|| format!("resolving {}", project.path.display()))?;
    info!(
        path = %project.path.display(),
        dimensions = resolved.theme.len(),
        plugins = resolved.plugins.len(),
        "configuration resolved"
    );

    let mut out = String::new();
    writeln!(out, "{} {}", style("ok").green().bold(), project.path.display())?;
    if resolved.content.is_empty() {
        writeln!(
            out,
            "  {} no content globs; the engine will scan no files",
            style("warning:").yellow()
        )?;
    }
    writeln!(out, "  content globs: {}", resolved.content.len())?;
    writeln!(out, "  theme dimensions: {}", resolved.theme.len())?;
    for plugin in &resolved.plugins {
        let version = plugin.package.version.as_deref().unwrap_or("unversioned");
        writeln!(out, "  plugin {} {}", style(plugin.name()).cyan(), style(version).dim())?;
    }
    Ok(out)
}

pub fn show(project: &Project, format: ConfigFormat) -> anyhow::Result<String> {
    Ok(project.config.to_string_as(format)?)
}

pub fn theme(project: &Project, dimension: Option<&str>) -> anyhow::Result<String> {
    let theme = project.config.merge_theme(&default_theme());
    let mut json = match dimension {
        Some(name) => match theme.dimension(name) {
            Some(tokens) => serde_json::to_string_pretty(tokens)?,
            None => bail!("theme has no dimension '{}'", name),
        },
        None => serde_json::to_string_pretty(&theme)?,
    };
    json.push('\n');
    Ok(json)
}

pub fn files(project: &Project) -> anyhow::Result<String> {
    let set = project.config.content_set()?;
    let mut out = String::new();
    for file in set.files(&project.root)? {
        let shown = file.strip_prefix(&project.root).unwrap_or(&file);
        writeln!(out, "{}", shown.display())?;
    }
    Ok(out)
}
