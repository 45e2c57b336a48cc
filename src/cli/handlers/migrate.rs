//! Migrate command handler

use crate::config::Settings;
use crate::db::{pending_migrations, run_migrations};
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Apply pending migrations, or only list them when `dry_run` is set.
    ///
    /// Returns the versions that were applied, or would be.
    pub async fn execute(&self, dry_run: bool) -> AppResult<Vec<String>> {
        self.config.database.validate()?;
        let path = self.config.database.connection_path();

        if dry_run {
            let pending = pending_migrations(&path).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for version in &pending {
                    println!("  - {}", version);
                }
                println!("Run without --dry-run to apply them");
            }
            return Ok(pending);
        }

        let applied = run_migrations(&path).await?;
        tracing::info!(database = %path, count = applied.len(), "Migrations applied");
        if applied.is_empty() {
            println!("✓ No pending migrations - database is up to date");
        } else {
            for version in &applied {
                println!("✓ Applied {}", version);
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_for(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.database.url = dir.path().join("migrate.db").display().to_string();
        settings
    }

    #[tokio::test]
    async fn test_dry_run_does_not_apply() {
        let dir = TempDir::new().unwrap();
        let handler = MigrateCommandHandler::new(settings_for(&dir));

        assert_eq!(handler.execute(true).await.unwrap().len(), 1);
        assert_eq!(handler.execute(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_apply_then_nothing_pending() {
        let dir = TempDir::new().unwrap();
        let handler = MigrateCommandHandler::new(settings_for(&dir));

        assert_eq!(handler.execute(false).await.unwrap().len(), 1);
        assert!(handler.execute(false).await.unwrap().is_empty());
        assert!(handler.execute(true).await.unwrap().is_empty());
    }
}
