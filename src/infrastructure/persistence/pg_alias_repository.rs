//! PostgreSQL implementation of the alias repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AliasRecord, NewAliasRecord};
use crate::domain::errors::RegistryError;
use crate::domain::repositories::AliasRepository;

const RECORD_COLUMNS: &str =
    "id, original_url, short_key, is_active, expires_at, created_at, click_count, owner_id";

/// PostgreSQL repository for alias records.
///
/// Uniqueness of `short_key` is enforced by the `urls_short_key_key`
/// constraint; click increments are a single atomic `UPDATE`.
pub struct PgAliasRepository {
    pool: Arc<PgPool>,
}

impl PgAliasRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AliasRepository for PgAliasRepository {
    async fn insert(&self, new_record: NewAliasRecord) -> Result<AliasRecord, RegistryError> {
        let sql = format!(
            "INSERT INTO urls (original_url, short_key, owner_id, created_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {RECORD_COLUMNS}"
        );

        let record = sqlx::query_as::<_, AliasRecord>(&sql)
            .bind(&new_record.original_url)
            .bind(&new_record.short_key)
            .bind(new_record.owner_id)
            .bind(new_record.created_at)
            .bind(new_record.expires_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<AliasRecord>, RegistryError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM urls WHERE short_key = $1");

        let record = sqlx::query_as::<_, AliasRecord>(&sql)
            .bind(short_key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AliasRecord>, RegistryError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM urls WHERE id = $1");

        let record = sqlx::query_as::<_, AliasRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), RegistryError> {
        sqlx::query("UPDATE urls SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, RegistryError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: i64,
        per_page: i64,
        active: Option<bool>,
    ) -> Result<(Vec<AliasRecord>, i64), RegistryError> {
        let offset = (page - 1).saturating_mul(per_page).max(0);
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM urls \
             WHERE owner_id = $1 AND ($2::boolean IS NULL OR is_active = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );

        let items_query = sqlx::query_as::<_, AliasRecord>(&sql)
            .bind(owner_id)
            .bind(active)
            .bind(per_page)
            .bind(offset)
            .fetch_all(self.pool.as_ref());

        let count_query = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM urls \
             WHERE owner_id = $1 AND ($2::boolean IS NULL OR is_active = $2)",
        )
        .bind(owner_id)
        .bind(active)
        .fetch_one(self.pool.as_ref());

        let (items, total) = tokio::try_join!(items_query, count_query)?;

        Ok((items, total))
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<bool, RegistryError> {
        let result = sqlx::query("UPDATE urls SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
