//! Command implementations for the cq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod explain;
pub mod fields;
pub mod search;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter parsing error.
    #[error("filter error: {0}")]
    Filter(#[from] cardquery::FilterError),

    /// Catalog loading error.
    #[error("catalog error: {0}")]
    Catalog(#[from] cardquery::CatalogError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are on unless `--no-color` is given, `NO_COLOR` is set, or the
    /// config file turns them off.
    pub fn from_cli(cli: &Cli, config: &config::Config) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}
