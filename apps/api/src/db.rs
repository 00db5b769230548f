use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
///
/// Connections are opened lazily so an unreachable database degrades the
/// first load to the local cache instead of stopping startup.
pub fn create_pool(database_url: &str) -> Result<PgPool> {
    // One operator, one document: a handful of connections is plenty.
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)?;

    info!("PostgreSQL connection pool configured");
    Ok(pool)
}

/// Creates the document table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_documents (
            key        TEXT PRIMARY KEY,
            body       JSONB NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
