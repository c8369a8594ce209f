//! `stylecfg` - inspect and validate a project's stylesheet configuration.
//!
//! ```text
//! stylecfg check                 # load, merge theme, resolve plugins
//! stylecfg show --format json    # print the normalized configuration
//! stylecfg theme maxWidth        # print merged tokens as JSON
//! stylecfg files                 # list files matched by the content globs
//! ```
//!
//! Logging goes to stderr and follows `RUST_LOG`; `-v` raises the default
//! level to `debug`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stylecfg::ConfigFormat;
use tracing_subscriber::EnvFilter;

/// Validate and inspect stylecfg configuration files
#[derive(Parser)]
#[command(name = "stylecfg", version)]
struct Cli {
    /// Project root holding the configuration file and installed packages
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file to use instead of discovering one under the root
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log load and resolution steps
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the configuration, merge the theme and resolve every plugin
    Check,
    /// Print the normalized configuration
    Show {
        /// Output format: yaml, json or toml
        #[arg(long, default_value = "yaml")]
        format: ConfigFormat,
    },
    /// Print the merged theme as JSON
    Theme {
        /// Only print this dimension
        dimension: Option<String>,
    },
    /// List files matched by the content globs
    Files,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let project = commands::Project::open(&cli.root, cli.config.as_deref())?;
    let output = match cli.command {
        Command::Check => commands::check(&project)?,
        Command::Show { format } => commands::show(&project, format)?,
        Command::Theme { dimension } => commands::theme(&project, dimension.as_deref())?,
        Command::Files => commands::files(&project)?,
    };
    print!("{}", output);
    Ok(())
}
