//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// HTTP service for managing users
#[derive(Parser, Debug)]
#[command(name = "userbase")]
#[command(about = "HTTP service exposing CRUD operations over users")]
#[command(long_about = "
userbase serves a JSON API for listing, creating, editing and deleting users
stored in SQLite.

EXAMPLES:
    # Start the server with default configuration (0.0.0.0:8080, ./test.db)
    userbase serve

    # Bind elsewhere
    userbase serve --host 127.0.0.1 --port 3000

    # Use a single configuration file
    userbase --config /etc/userbase/userbase.toml serve

    # Check configuration without starting the server
    userbase serve --dry-run

    # Create the users table without serving
    userbase migrate
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads only this TOML file (plus USERBASE_* environment overrides)
    /// instead of the layered files in the configuration directory.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Create the users table if it does not exist
    Migrate {
        /// List pending migrations without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// Log level forced by `--verbose` or `--quiet`, if any.
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["userbase", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["userbase"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.log_level_override(), None);
    }

    #[test]
    fn test_serve_command() {
        let cli =
            Cli::try_parse_from(["userbase", "serve", "--host", "127.0.0.1", "--port", "3000"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: Some("127.0.0.1".to_string()),
                port: Some(3000),
                dry_run: false,
            })
        );
    }

    #[test]
    fn test_port_zero_rejected() {
        assert!(Cli::try_parse_from(["userbase", "serve", "--port", "0"]).is_err());
    }

    #[test]
    fn test_migrate_dry_run() {
        let cli = Cli::try_parse_from(["userbase", "migrate", "--dry-run"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Migrate { dry_run: true }));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let err = Cli::try_parse_from(["userbase", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_quiet_sets_error_level() {
        let cli = Cli::try_parse_from(["userbase", "-q"]).unwrap();
        assert_eq!(cli.log_level_override(), Some("error"));
    }

    #[test]
    fn test_missing_config_file_rejected() {
        let result = Cli::try_parse_from(["userbase", "--config", "/definitely/not/here.toml"]);
        assert!(result.is_err());
    }
}
