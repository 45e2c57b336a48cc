//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml`
//! 4. `USERBASE_*` environment variables
//!
//! Every file layer is optional. With nothing on disk the serde defaults in
//! [`Settings`] apply.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory
pub const CONFIG_DIR_ENV: &str = "USERBASE_CONFIG_DIR";

/// Environment variable for a single configuration file
pub const CONFIG_FILE_ENV: &str = "USERBASE_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix of environment overrides, e.g. `USERBASE_SERVER__PORT`
const ENV_PREFIX: &str = "USERBASE";

const ENV_SEPARATOR: &str = "__";

/// Where file-based settings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    /// `default.toml`, `{environment}.toml` and `local.toml` from one directory
    Layered(PathBuf),
    /// Exactly one file, which must exist
    Single(PathBuf),
}

/// Configuration loader that handles layered configuration loading
#[derive(Debug)]
pub struct ConfigLoader {
    source: Source,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `USERBASE_CONFIG_DIR`, `USERBASE_CONFIG_FILE` and
    /// `USERBASE_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `USERBASE_CONFIG_DIR` and `USERBASE_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok();

        let source = match (config_dir, config_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::MutualExclusivityError(format!(
                    "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set. \
                     Use {CONFIG_DIR_ENV} for layered configuration or \
                     {CONFIG_FILE_ENV} for a single configuration file."
                )));
            }
            (None, Some(file)) => Source::Single(PathBuf::from(file)),
            (Some(dir), None) => Source::Layered(PathBuf::from(dir)),
            (None, None) => Source::Layered(PathBuf::from(DEFAULT_CONFIG_DIR)),
        };

        Ok(Self {
            source,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load from one explicit file, as given by `--config`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Single(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Load layered files from `dir` for the given environment.
    pub fn from_dir(dir: impl Into<PathBuf>, environment: AppEnvironment) -> Self {
        Self {
            source: Source::Layered(dir.into()),
            environment,
        }
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load, deserialize and validate the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self
            .build_config()?
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.source {
            Source::Single(path) => {
                if !path.is_file() {
                    return Err(ConfigError::file_not_found(path));
                }
                add_file(builder, path, true)
            }
            Source::Layered(dir) => {
                let builder = add_file(builder, &dir.join("default.toml"), false);
                let builder =
                    add_file(builder, &dir.join(self.environment.config_file_name()), false);
                add_file(builder, &dir.join("local.toml"), false)
            }
        };

        // USERBASE_DATABASE__URL -> database.url
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)
    }
}

/// Serializes tests that read or write process-wide environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).format(FileFormat::Toml).required(required))
}
