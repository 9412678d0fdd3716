use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::Dispatch;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let dispatch = Dispatch::from_cli(cli);
    let config = if dispatch.needs_config() {
        load_config()?
    } else {
        load_config().unwrap_or_default()
    };
    let ctx = CommandContext::from_cli(cli, &config);

    dispatch.execute(&ctx, &config)
}

/// Installs the log subscriber. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(cli)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The log directive used when `RUST_LOG` is not set.
fn default_log_directive(cli: &Cli) -> &'static str {
    if cli.verbose {
        "cardquery=debug,cq=debug"
    } else if cli.quiet {
        "error"
    } else {
        "cardquery=warn,cq=warn"
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(err) if err.is_configuration() => "FILTER_CONFIG_ERROR",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Catalog(_) => "CATALOG_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Catalog(cardquery::CatalogError::Json(_)) => ExitCode::from(4),
        CommandError::Catalog(_) => ExitCode::from(3),
        CommandError::Config(_) => ExitCode::from(5),
    }
}
