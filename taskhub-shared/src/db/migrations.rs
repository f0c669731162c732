/// Database migration runner
///
/// Migrations live in `migrations/` at the workspace root as up/down SQL
/// pairs and are embedded into the binary at compile time, so deployments
/// need no migration files on disk.

use sqlx::PgPool;
use tracing::info;

/// Runs all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply; already-applied
/// migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    sqlx::migrate!("../migrations").run(pool).await?;

    info!("Database migrations up to date");
    Ok(())
}
