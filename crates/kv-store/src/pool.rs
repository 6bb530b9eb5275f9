//! TTL-bounded cache around the PostgreSQL connection pool.

use std::time::{Duration, Instant};

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;

use crate::Result;

/// Default lifetime of a cached pool handle.
pub const DEFAULT_POOL_TTL: Duration = Duration::from_secs(300);

/// Lazily constructed PostgreSQL pool handle, cached for a bounded
/// duration to amortize setup cost.
///
/// Expiry is observable only as latency: readers holding a clone of the
/// pool keep working, and refresh replaces the whole slot rather than
/// mutating it in place. Concurrent refreshes race benignly; the second
/// writer sees a fresh slot and reuses it.
pub struct CachedPool {
    url: String,
    ttl: Duration,
    slot: RwLock<Option<(PgPool, Instant)>>,
}

impl CachedPool {
    /// Creates a cache around the given connection URL with the default
    /// five-minute TTL.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_ttl(url, DEFAULT_POOL_TTL)
    }

    /// Creates a cache with an explicit TTL.
    pub fn with_ttl(url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            url: url.into(),
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns a live pool handle, connecting if the cached one is
    /// absent or older than the TTL.
    pub async fn get(&self) -> Result<PgPool> {
        if let Some((pool, acquired_at)) = self.slot.read().await.as_ref() {
            if acquired_at.elapsed() < self.ttl {
                return Ok(pool.clone());
            }
        }

        let mut slot = self.slot.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some((pool, acquired_at)) = slot.as_ref() {
            if acquired_at.elapsed() < self.ttl {
                return Ok(pool.clone());
            }
        }

        tracing::info!("opening connection pool to database");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&self.url)
            .await?;
        *slot = Some((pool.clone(), Instant::now()));
        Ok(pool)
    }

    /// Runs the workspace migrations through a cached handle.
    pub async fn run_migrations(&self) -> Result<()> {
        let pool = self.get().await?;
        sqlx::migrate!("../../migrations").run(&pool).await?;
        Ok(())
    }
}
