//! Order service: validate the request, then drive the storage port.

use common::OrderId;
use kv_store::{OrderKey, OrderRecord, OrderStore};
use validator::Validate;

use crate::error::DomainError;
use crate::validate::parse_v4_key;

use super::{CreateOrderRequest, DeleteOrderRequest, GetOrderRequest};

/// Service for managing orders over any [`OrderStore`] backend.
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new order; the key is server-generated.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(&self, request: &CreateOrderRequest) -> Result<OrderRecord, DomainError> {
        request.validate()?;
        tracing::info!(
            customer_name = %request.customer_name,
            order_item_count = request.order_item_count,
            "handling create order request"
        );
        let record = self
            .store
            .create_order(&request.customer_name, request.order_item_count)
            .await?;
        tracing::info!(order_id = %record.order_id, "finished create order");
        Ok(record)
    }

    /// Loads an order by key. Returns `None` when the key is absent.
    #[tracing::instrument(skip(self, request))]
    pub async fn get(&self, request: &GetOrderRequest) -> Result<Option<OrderRecord>, DomainError> {
        request.validate()?;
        let order_id = OrderId::from_uuid(parse_v4_key(&request.order_id)?);
        tracing::info!(%order_id, "handling get order request");
        Ok(self.store.get_order(order_id).await?)
    }

    /// Deletes an order by key. Succeeds whether or not the key existed
    /// and returns the key projection.
    #[tracing::instrument(skip(self, request))]
    pub async fn delete(&self, request: &DeleteOrderRequest) -> Result<OrderKey, DomainError> {
        request.validate()?;
        let order_id = OrderId::from_uuid(parse_v4_key(&request.order_id)?);
        tracing::info!(%order_id, "handling delete order request");
        Ok(self.store.delete_order(order_id).await?)
    }
}
