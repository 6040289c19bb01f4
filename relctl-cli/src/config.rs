//! relctl configuration
//!
//! Database URL precedence: `--database-url` flag, then `RELCTL_DATABASE_URL`,
//! then `~/.relctl/config.toml`, then a database file under `~/.relctl`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Contents of `~/.relctl/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelctlConfig {
    /// SQLite URL, e.g. `sqlite:///home/me/.relctl/relctl.db`
    pub database_url: Option<String>,
    /// Default log level when RUST_LOG is unset (e.g. "warn")
    pub log_level: Option<String>,
}

impl RelctlConfig {
    /// Load config from ~/.relctl/config.toml, or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    /// Get config file path: ~/.relctl/config.toml
    pub fn config_path() -> PathBuf {
        relctl_home().join("config.toml")
    }

    /// Pick the database URL: explicit value first, then config, then default.
    pub fn resolve_database_url(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.database_url.clone())
            .unwrap_or_else(default_database_url)
    }
}

fn relctl_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".relctl")
}

pub fn default_database_url() -> String {
    format!("sqlite://{}", relctl_home().join("relctl.db").display())
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the effective configuration
    Show,
}

pub fn run_config(args: ConfigArgs, config: &RelctlConfig, database_url: &str) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", RelctlConfig::config_path().display());
        }
        ConfigCommands::Show => {
            let effective = RelctlConfig {
                database_url: Some(database_url.to_owned()),
                log_level: config.log_level.clone(),
            };
            print!("{}", toml::to_string_pretty(&effective)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RelctlConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, RelctlConfig::default());
    }

    #[test]
    fn parses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "database_url = \"sqlite://demo.db\"\nlog_level = \"warn\"\n",
        )
        .unwrap();

        let config = RelctlConfig::load_from(&path).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite://demo.db"));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_url = ").unwrap();

        assert!(RelctlConfig::load_from(&path).is_err());
    }

    #[test]
    fn explicit_url_wins() {
        let config = RelctlConfig {
            database_url: Some("sqlite://from-file.db".into()),
            log_level: None,
        };
        assert_eq!(
            config.resolve_database_url(Some("sqlite::memory:")),
            "sqlite::memory:"
        );
        assert_eq!(config.resolve_database_url(None), "sqlite://from-file.db");
        assert!(RelctlConfig::default()
            .resolve_database_url(None)
            .ends_with("relctl.db"));
    }
}
