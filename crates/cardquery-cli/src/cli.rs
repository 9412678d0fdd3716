//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the cq CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// cq - Search a card catalog with filter queries
#[derive(Parser, Debug)]
#[command(name = "cq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog with a filter query
    #[command(alias = "s")]
    Search {
        /// Filter query (e.g., 't:creature cmc<=2'); words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,

        /// Catalog file (default: from config, then the data directory)
        #[arg(long, env = "CQ_CATALOG")]
        catalog: Option<PathBuf>,

        /// Limit results (default: from config, then 50)
        #[arg(long)]
        limit: Option<usize>,

        /// Show all matching cards (no limit)
        #[arg(long)]
        all: bool,
    },

    /// Show how a query is parsed
    Explain {
        /// Filter query; words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        query: Vec<String>,
    },

    /// List the fields a query can test
    Fields,

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show config file path
    Path,
    /// Write the default config file if none exists
    Init,
}

/// Supported shells for completions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
