//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Manual control: nothing is applied on connect
    let db = Database::connect_without_migrations(config.database_url.as_str())
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match &args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations");
            db.run_migrations().await?;
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration");
            db.rollback_migration().await?;
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("{:<48} {}", name, if applied { "applied" } else { "pending" });
            }
            return Ok(());
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping habits and marks, then re-running all migrations");
            db.fresh_migrations().await?;
        }
    }

    tracing::info!(action = ?args.action, "Migration command finished");
    Ok(())
}
