//! Merges CLI argument overrides on top of file-based configuration.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides to loaded settings.
///
/// Precedence, lowest first: configuration files, `USERBASE_*` variables,
/// command-line flags.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base settings from `config_path`, or from the layered
    /// configuration directory when no path is given.
    pub fn from_config_path(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        Ok(Self::new(loader.load()?))
    }

    /// Return the base settings with CLI overrides applied and re-validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(level) = cli.log_level_override() {
            config.logger.level = level.to_string();
        }

        if let Some(Commands::Serve { host, port, .. }) = &cli.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        assert_eq!(merge(&["userbase"]), Settings::default());
    }

    #[test]
    fn test_serve_overrides_address() {
        let settings = merge(&["userbase", "serve", "--host", "127.0.0.1", "--port", "9000"]);
        assert_eq!(settings.server.address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_verbose_overrides_level() {
        assert_eq!(merge(&["userbase", "-v", "migrate"]).logger.level, "debug");
        assert_eq!(merge(&["userbase", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_config_file_is_loaded() {
        let _lock = crate::config::loader::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[server]\nport = 4321\n").unwrap();

        let merger = ConfigurationMerger::from_config_path(Some(&path)).unwrap();
        let cli = Cli::try_parse_from(["userbase"]).unwrap();
        let settings = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(settings.server.port, 4321);
    }
}
