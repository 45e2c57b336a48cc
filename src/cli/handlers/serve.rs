//! Serve command handler

use crate::config::Settings;
use crate::error::AppResult;

/// Handler for `serve --dry-run`; a real start is left to `Server`.
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate the configuration and print what the server would do.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        let database = &self.config.database;
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database file: {} (pool {}..={}, auto_migrate = {})",
            database.connection_path(),
            database.min_connections,
            database.max_connections,
            database.auto_migrate
        );
        println!("✓ Log level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_with_defaults() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.validate_only().is_ok());
        assert_eq!(handler.config(), &Settings::default());
    }

    #[test]
    fn test_dry_run_rejects_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);
        assert!(handler.validate_only().is_err());
    }
}
