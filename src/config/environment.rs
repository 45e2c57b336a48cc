//! Deployment environment selection.
//!
//! The environment decides which `{environment}.toml` layer the loader
//! stacks on top of `default.toml`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Environment variable name for reading the current environment
    pub const ENV_VAR: &'static str = "USERBASE_APP_ENV";

    /// Reads `USERBASE_APP_ENV`, falling back to `Development` when the
    /// variable is unset or holds an unknown name.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(Self::ENV_VAR).ok().as_deref())
    }

    /// Resolves an optional raw value the same way `from_env` does.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::parse::<Environment>) {
            Some(Ok(environment)) => environment,
            Some(Err(e)) => {
                eprintln!("Ignoring {}: {}", Self::ENV_VAR, e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Name of the layer file for this environment, e.g. `production.toml`.
    pub fn config_file_name(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::EnvVarError(format!(
                "unknown environment '{}' (expected development, test, staging or production)",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
