//! Config command implementation.
//!
//! View and initialize configuration settings.
//! Config file is located at ~/.config/cq/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "CQ_CONFIG";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# cq - Card Query Configuration

# Config schema version (do not modify)
version = 1

# Default catalog file (can also use --catalog or the CQ_CATALOG env var)
# catalog = "/path/to/cards.json"

# Output preferences
[output]
# color = true    # Enable colors (respects NO_COLOR env)
# limit = 50      # Cards shown by `cq search` unless --all is given
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default catalog file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            catalog: None,
            output: OutputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Default search result limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/cq/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("cq"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("cq"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    debug!(path = %path.display(), "Loaded config");
    migrate_config(config)
}

/// Migrates config to current version if needed.
///
/// Files without a version read as the current schema. A version newer than
/// this build understands is rejected rather than silently reinterpreted.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref catalog) = config.catalog {
                println!("  catalog: {}", catalog.display());
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
            if let Some(limit) = config.output.limit {
                println!("  limit: {}", limit);
            }
        } else {
            println!("(No config file exists. Run 'cq config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
///
/// Writes the commented default config. An existing file is left untouched.
pub fn execute_init(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let created = write_default_config(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if created { "created" } else { "exists" },
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if created {
            println!("Created default config at: {}", path.display());
        } else {
            println!("Config already exists at: {}", path.display());
        }
    }

    Ok(())
}

/// Writes [`DEFAULT_CONFIG`] to `path` unless a file is already there.
/// Returns true if the file was created.
fn write_default_config(path: &std::path::Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

    Ok(true)
}
