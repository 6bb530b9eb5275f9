//! The order-created event payload.

use common::OrderId;
use serde::{Deserialize, Serialize};

/// Event emitted after an order is successfully persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub customer_name: String,
    pub order_item_count: u32,
}

impl OrderCreated {
    /// Subject line for human-facing notifications.
    pub fn subject(&self) -> String {
        format!("Order {} created", self.order_id)
    }

    /// Rendered notification body.
    pub fn message(&self) -> String {
        format!(
            "Order Id: [{}]\nCustomer Name: [{}]\nQty: [{}]",
            self.order_id, self.customer_name, self.order_item_count
        )
    }
}
