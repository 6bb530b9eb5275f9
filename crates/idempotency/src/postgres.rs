//! PostgreSQL idempotency record store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kv_store::CachedPool;
use sqlx::Row;

use crate::error::RecordStoreError;
use crate::store::{Claim, IdempotencyStore};

/// Record store over an externally named table with columns
/// `(fingerprint TEXT PK, status TEXT, payload JSONB, expires_at TIMESTAMPTZ)`.
#[derive(Clone)]
pub struct PgIdempotencyStore {
    pool: Arc<CachedPool>,
    table: String,
}

impl PgIdempotencyStore {
    /// Creates a record store over the given table. The table name is
    /// interpolated into statements directly, so it must come from
    /// deployment configuration, never from request data.
    pub fn new(pool: Arc<CachedPool>, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }
}

#[async_trait]
impl IdempotencyStore for PgIdempotencyStore {
    async fn claim(
        &self,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Claim, RecordStoreError> {
        let pool = self.pool.get().await.map_err(RecordStoreError)?;

        // Conditional create: only one concurrent caller wins the insert.
        let inserted = sqlx::query(&format!(
            "INSERT INTO {} (fingerprint, status, expires_at) VALUES ($1, 'in_progress', $2) \
             ON CONFLICT (fingerprint) DO NOTHING",
            self.table
        ))
        .bind(key)
        .bind(expires_at)
        .execute(&pool)
        .await?;

        if inserted.rows_affected() == 1 {
            return Ok(Claim::Acquired);
        }

        let row = sqlx::query(&format!(
            "SELECT status, payload, expires_at FROM {} WHERE fingerprint = $1",
            self.table
        ))
        .bind(key)
        .fetch_optional(&pool)
        .await?;

        // The record was released between our insert and select; let the
        // caller retry rather than racing a second insert.
        let Some(row) = row else {
            return Ok(Claim::Pending);
        };

        let record_expiry: DateTime<Utc> = row.try_get("expires_at")?;
        if record_expiry <= Utc::now() {
            // Take over the expired claim; the WHERE guard keeps two
            // takers from both winning.
            let taken = sqlx::query(&format!(
                "UPDATE {} SET status = 'in_progress', payload = NULL, expires_at = $2 \
                 WHERE fingerprint = $1 AND expires_at <= now()",
                self.table
            ))
            .bind(key)
            .bind(expires_at)
            .execute(&pool)
            .await?;

            return Ok(if taken.rows_affected() == 1 {
                Claim::Acquired
            } else {
                Claim::Pending
            });
        }

        let status: String = row.try_get("status")?;
        let payload: Option<serde_json::Value> = row.try_get("payload")?;
        match (status.as_str(), payload) {
            ("completed", Some(payload)) => Ok(Claim::Completed(payload)),
            _ => Ok(Claim::Pending),
        }
    }

    async fn complete(
        &self,
        key: &str,
        payload: serde_json::Value,
    ) -> Result<(), RecordStoreError> {
        let pool = self.pool.get().await.map_err(RecordStoreError)?;
        sqlx::query(&format!(
            "UPDATE {} SET status = 'completed', payload = $2 WHERE fingerprint = $1",
            self.table
        ))
        .bind(key)
        .bind(payload)
        .execute(&pool)
        .await?;
        Ok(())
    }

    async fn release(&self, key: &str) -> Result<(), RecordStoreError> {
        let pool = self.pool.get().await.map_err(RecordStoreError)?;
        sqlx::query(&format!("DELETE FROM {} WHERE fingerprint = $1", self.table))
            .bind(key)
            .execute(&pool)
            .await?;
        Ok(())
    }
}
