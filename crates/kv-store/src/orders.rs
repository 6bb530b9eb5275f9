//! Order record types and the order store contract.

use async_trait::async_trait;
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A fully populated order row.
///
/// A stored order always carries all three fields; the key-only
/// projection is [`OrderKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub customer_name: String,
    pub order_item_count: u32,
}

/// Key-only projection of an order, used to confirm deletes when the
/// full attributes are not needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderKey {
    pub order_id: OrderId,
}

impl From<&OrderRecord> for OrderKey {
    fn from(record: &OrderRecord) -> Self {
        Self {
            order_id: record.order_id,
        }
    }
}

/// Keyed storage contract for orders.
///
/// Implementations must be thread-safe (Send + Sync). The port performs
/// no implicit retries: a failed call is surfaced immediately and retry
/// policy, if any, belongs to the caller.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order under a freshly generated v4 UUID key and
    /// returns the stored record. Client-supplied keys are never used.
    async fn create_order(&self, customer_name: &str, order_item_count: u32)
    -> Result<OrderRecord>;

    /// Returns the stored order, or `None` if the key is absent.
    /// A miss is not an error.
    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderRecord>>;

    /// Removes the order if present. Deleting an absent key succeeds;
    /// the key projection is returned either way.
    async fn delete_order(&self, order_id: OrderId) -> Result<OrderKey>;
}
