//! Migrate command - Applies schema changes to the user store.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations are applied manually here, so skip the automatic run
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Could not reach the database: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await.map_err(migration_error)?;
            tracing::info!("User store schema is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration().await.map_err(migration_error)?;
            tracing::info!("Rolled back one migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await.map_err(migration_error)? {
                let marker = if applied { "applied" } else { "pending" };
                println!("{:8} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping the users table and re-applying all migrations");
            db.fresh_migrations().await.map_err(migration_error)?;
            tracing::info!("User store rebuilt from scratch");
        }
    }

    Ok(())
}

fn migration_error(err: sea_orm::DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", err))
}
