use crate::error::DbError;
use configuration::DatabaseConfig;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// All settings come from the `DatabaseConfig` the caller passes in; nothing
/// is read from process-wide state here.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    if config.url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "database.url must be set.".to_string(),
        ));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(max_connections = config.max_connections, "Connected to the price database.");
    Ok(pool)
}

/// Applies the embedded migrations, creating the `contracts` table if needed.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
