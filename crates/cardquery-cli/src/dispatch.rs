//! Command dispatch module for routing CLI commands to their handlers.

use std::path::PathBuf;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::config::Config;
use crate::commands::search::SearchOptions;
use crate::commands::{self, CommandContext, CommandError, Result};

/// A parsed command, ready to run.
#[derive(Debug)]
pub enum Dispatch<'a> {
    Search {
        query: String,
        catalog: &'a Option<PathBuf>,
        limit: Option<usize>,
        all: bool,
    },
    Explain {
        query: String,
    },
    Fields,
    Config(&'a Option<ConfigCommands>),
    Completions(Shell),
    Help,
}

impl<'a> Dispatch<'a> {
    /// Creates a dispatch from the CLI command.
    ///
    /// Query words are joined with single spaces, so `cq search t:elf cmc<3`
    /// and `cq search "t:elf cmc<3"` run the same query.
    pub fn from_cli(cli: &'a Cli) -> Self {
        match &cli.command {
            Some(Commands::Search {
                query,
                catalog,
                limit,
                all,
            }) => Self::Search {
                query: query.join(" "),
                catalog,
                limit: *limit,
                all: *all,
            },
            Some(Commands::Explain { query }) => Self::Explain {
                query: query.join(" "),
            },
            Some(Commands::Fields) => Self::Fields,
            Some(Commands::Config { command }) => Self::Config(command),
            Some(Commands::Completions { shell }) => Self::Completions(*shell),
            None => Self::Help,
        }
    }

    /// Whether an unreadable config file fails the command. Other commands
    /// fall back to the default config so `cq config path` still works.
    pub fn needs_config(&self) -> bool {
        matches!(self, Self::Search { .. })
    }

    /// Executes the command.
    pub fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()> {
        match self {
            Self::Search {
                query,
                catalog,
                limit,
                all,
            } => {
                let opts = SearchOptions {
                    query: query.clone(),
                    catalog: (*catalog).clone(),
                    limit: *limit,
                    all: *all,
                };
                commands::search::execute(ctx, &opts, config)
            }
            Self::Explain { query } => commands::explain::execute(ctx, query),
            Self::Fields => commands::fields::execute(ctx),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(*shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("cq - card catalog search");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init) => commands::config::execute_init(ctx),
    }
}
