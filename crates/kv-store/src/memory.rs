//! In-memory store backends for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::{OrderId, UserId};
use tokio::sync::RwLock;

use crate::{
    OrderKey, OrderRecord, OrderStore, Result, StoreError, UserKey, UserRecord, UserStore,
};

/// In-memory order store.
///
/// Provides the same interface as the PostgreSQL implementation and a
/// failure toggle for exercising backend-error paths in tests.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    rows: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
    fail_requests: Arc<AtomicBool>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every subsequent call.
    pub fn set_fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory order store configured to fail".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(
        &self,
        customer_name: &str,
        order_item_count: u32,
    ) -> Result<OrderRecord> {
        self.check_available()?;

        let record = OrderRecord {
            order_id: OrderId::new(),
            customer_name: customer_name.to_string(),
            order_item_count,
        };
        tracing::info!(order_id = %record.order_id, "saving order");
        self.rows
            .write()
            .await
            .insert(record.order_id, record.clone());
        Ok(record)
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderRecord>> {
        self.check_available()?;
        Ok(self.rows.read().await.get(&order_id).cloned())
    }

    async fn delete_order(&self, order_id: OrderId) -> Result<OrderKey> {
        self.check_available()?;
        self.rows.write().await.remove(&order_id);
        Ok(OrderKey { order_id })
    }
}

/// In-memory user store.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    rows: Arc<RwLock<HashMap<UserId, UserRecord>>>,
    fail_requests: Arc<AtomicBool>,
}

impl InMemoryUserStore {
    /// Creates a new empty in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every subsequent call.
    pub fn set_fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory user store configured to fail".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user_name: &str, email: &str) -> Result<UserRecord> {
        self.check_available()?;

        let record = UserRecord {
            user_id: UserId::new(),
            user_name: user_name.to_string(),
            email: email.to_string(),
        };
        tracing::info!(user_id = %record.user_id, "saving user");
        self.rows
            .write()
            .await
            .insert(record.user_id, record.clone());
        Ok(record)
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        self.check_available()?;
        Ok(self.rows.read().await.get(&user_id).cloned())
    }

    async fn delete_user(&self, user_id: UserId) -> Result<UserKey> {
        self.check_available()?;
        self.rows.write().await.remove(&user_id);
        Ok(UserKey { user_id })
    }
}
