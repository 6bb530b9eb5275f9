//! PostgreSQL-backed store implementations.
//!
//! Each store is bound to an externally supplied table name and reaches
//! its pool through a shared [`CachedPool`].

use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, UserId};
use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    CachedPool, OrderKey, OrderRecord, OrderStore, Result, StoreError, UserKey, UserRecord,
    UserStore,
};

fn row_to_order(row: PgRow) -> Result<OrderRecord> {
    let count: i64 = row.try_get("order_item_count")?;
    let order_item_count = u32::try_from(count).map_err(|e| {
        StoreError::Serialization(serde_json::Error::io(std::io::Error::other(e.to_string())))
    })?;

    Ok(OrderRecord {
        order_id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
        customer_name: row.try_get("customer_name")?,
        order_item_count,
    })
}

/// PostgreSQL order store.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: Arc<CachedPool>,
    table: String,
}

impl PgOrderStore {
    /// Creates an order store over the given table. The table name is
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
impl OrderStore for PgOrderStore {
    async fn create_order(
        &self,
        customer_name: &str,
        order_item_count: u32,
    ) -> Result<OrderRecord> {
        let order_id = OrderId::new();
        tracing::info!(%order_id, table = %self.table, "saving order");

        let pool = self.pool.get().await?;
        sqlx::query(&format!(
            "INSERT INTO {} (order_id, customer_name, order_item_count) VALUES ($1, $2, $3)",
            self.table
        ))
        .bind(order_id.as_uuid())
        .bind(customer_name)
        .bind(i64::from(order_item_count))
        .execute(&pool)
        .await?;

        Ok(OrderRecord {
            order_id,
            customer_name: customer_name.to_string(),
            order_item_count,
        })
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderRecord>> {
        let pool = self.pool.get().await?;
        let row = sqlx::query(&format!(
            "SELECT order_id, customer_name, order_item_count FROM {} WHERE order_id = $1",
            self.table
        ))
        .bind(order_id.as_uuid())
        .fetch_optional(&pool)
        .await?;

        row.map(row_to_order).transpose()
    }

    async fn delete_order(&self, order_id: OrderId) -> Result<OrderKey> {
        tracing::info!(%order_id, table = %self.table, "deleting order");

        let pool = self.pool.get().await?;
        sqlx::query(&format!("DELETE FROM {} WHERE order_id = $1", self.table))
            .bind(order_id.as_uuid())
            .execute(&pool)
            .await?;

        Ok(OrderKey { order_id })
    }
}

/// PostgreSQL user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: Arc<CachedPool>,
    table: String,
}

impl PgUserStore {
    /// Creates a user store over the given table. Same contract as
    /// [`PgOrderStore::new`]: the table name is trusted configuration.
    pub fn new(pool: Arc<CachedPool>, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, user_name: &str, email: &str) -> Result<UserRecord> {
        let user_id = UserId::new();
        tracing::info!(%user_id, table = %self.table, "saving user");

        let pool = self.pool.get().await?;
        sqlx::query(&format!(
            "INSERT INTO {} (user_id, user_name, email) VALUES ($1, $2, $3)",
            self.table
        ))
        .bind(user_id.as_uuid())
        .bind(user_name)
        .bind(email)
        .execute(&pool)
        .await?;

        Ok(UserRecord {
            user_id,
            user_name: user_name.to_string(),
            email: email.to_string(),
        })
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        let pool = self.pool.get().await?;
        let row = sqlx::query(&format!(
            "SELECT user_id, user_name, email FROM {} WHERE user_id = $1",
            self.table
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&pool)
        .await?;

        match row {
            Some(row) => Ok(Some(UserRecord {
                user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
                user_name: row.try_get("user_name")?,
                email: row.try_get("email")?,
            })),
            None => Ok(None),
        }
    }

    async fn delete_user(&self, user_id: UserId) -> Result<UserKey> {
        tracing::info!(%user_id, table = %self.table, "deleting user");

        let pool = self.pool.get().await?;
        sqlx::query(&format!("DELETE FROM {} WHERE user_id = $1", self.table))
            .bind(user_id.as_uuid())
            .execute(&pool)
            .await?;

        Ok(UserKey { user_id })
    }
}
