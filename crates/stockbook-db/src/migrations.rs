//! # Database Migrations
//!
//! Embedded SQL migrations. The `sqlx::migrate!` macro compiles every file
//! under `migrations/sqlite/` into the binary; applied versions are tracked
//! in `_sqlx_migrations`, so running them again is a no-op.
//!
//! Adding a migration: create `NNN_description.sql` with the next sequence
//! number and never modify an existing file.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations. Idempotent and transactional per migration.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!("all migrations applied");
    Ok(())
}
