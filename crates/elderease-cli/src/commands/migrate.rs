//! Database migration command.

use tracing::info;

use elderease_core::config::AppConfig;
use elderease_core::error::AppError;

use crate::output;

/// Run all pending migrations
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;

    println!("Running database migrations...");
    elderease_database::migration::run_migrations(pool.pool()).await?;
    info!(backend = %config.database.backend, "Migrations applied");
    output::print_success("All migrations applied successfully.");

    pool.close().await;
    Ok(())
}
