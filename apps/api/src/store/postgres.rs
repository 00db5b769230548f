use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{DocumentStore, StoreError};
use crate::models::content::ContentDocument;

/// Stores the document as one JSONB row per key in `content_documents`.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn fetch(&self, key: &str) -> Result<Option<ContentDocument>, StoreError> {
        let row: Option<Json<ContentDocument>> =
            sqlx::query_scalar("SELECT body FROM content_documents WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn put(&self, key: &str, doc: &ContentDocument) -> Result<(), StoreError> {
        // Whole-document replace; never merge into the stored body.
        sqlx::query(
            r#"
            INSERT INTO content_documents (key, body, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE
                SET body = EXCLUDED.body, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(Json(doc))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
