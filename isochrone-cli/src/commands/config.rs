//! Configuration management CLI commands.
//!
//! `config get`, `config set`, `config list`, and `config path` read and edit
//! the INI file from the command line.

use std::path::Path;

use clap::Subcommand;
use isochrone::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

const SECRET_MASK: &str = "********";

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., engine.point_count)
        key: String,
    },

    /// Set a configuration value (empty string clears optional keys)
    Set {
        /// Configuration key in format section.key (e.g., defaults.mode)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the user's config file.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    run_at(command, &config_file_path())
}

fn run_at(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            println!("{}", get_value(path, &key)?);
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let name = set_value(path, &key, &value)?;
            println!("Set {} = {}", name, value);
            Ok(())
        }
        ConfigCommands::List => {
            print!("{}", list_values(path)?);
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'isochrone config list' to see available keys.",
            key
        ))
    })
}

/// Value of one key, or `(not set)`.
fn get_value(path: &Path, key: &str) -> Result<String, CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load_from(path)?;
    let value = config_key.get(&config);

    Ok(if value.is_empty() {
        "(not set)".to_string()
    } else {
        value
    })
}

/// Validates and stores one value. Returns the canonical key name.
fn set_value(path: &Path, key: &str, value: &str) -> Result<&'static str, CliError> {
    let config_key = parse_key(key)?;
    let mut config = ConfigFile::load_from(path)?;
    config_key.set(&mut config, value)?;
    config.save_to(path)?;
    Ok(config_key.name())
}

/// All settings grouped by section, secrets masked.
fn list_values(path: &Path) -> Result<String, CliError> {
    let config = ConfigFile::load_from(path)?;

    let mut out = String::new();
    out.push_str("Configuration Settings\n");
    out.push_str("======================\n");

    let mut current_section = "";
    for key in ConfigKey::all() {
        let section = key.section();

        // Section header when the section changes
        if section != current_section {
            out.push('\n');
            out.push_str(&format!("[{}]\n", section));
            current_section = section;
        }

        let value = key.get(&config);
        let shown = if value.is_empty() {
            "(not set)"
        } else if key.is_secret() {
            SECRET_MASK
        } else {
            value.as_str()
        };
        out.push_str(&format!("  {} = {}\n", key.key_name(), shown));
    }

    Ok(out)
}
