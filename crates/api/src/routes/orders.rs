//! Order CRUD endpoints.
//!
//! Creation is idempotent on the raw request body: a retry with identical
//! bytes within the retention window replays the stored response and skips
//! both the write and the notification publish.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use domain::{CreateOrderRequest, DeleteOrderRequest, DomainError, GetOrderRequest};
use events::{EventPublisher, OrderCreated};
use idempotency::{Fingerprint, IdempotencyStore};
use kv_store::{OrderKey, OrderRecord, OrderStore, UserStore};
use metrics::counter;
use validator::Validate;

use super::{AppState, key_header, parse_json};
use crate::error::ApiError;

/// POST /api/orders — create a new order with a server-generated key.
#[tracing::instrument(skip_all)]
pub async fn create<S, U, I, P>(
    State(state): State<Arc<AppState<S, U, I, P>>>,
    body: Bytes,
) -> Result<Json<OrderRecord>, ApiError>
where
    S: OrderStore + 'static,
    U: UserStore + 'static,
    I: IdempotencyStore + 'static,
    P: EventPublisher + 'static,
{
    state.features.current().await?;
    let request: CreateOrderRequest = parse_json(&body)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    counter!("valid_create_order_events_total").increment(1);

    let fingerprint = Fingerprint::from_payload("create_order", &body);
    let worker = state.clone();
    let outcome = state
        .idempotency
        .execute(&fingerprint, move || async move {
            let record = worker.orders.create(&request).await?;
            let event = OrderCreated {
                order_id: record.order_id,
                customer_name: record.customer_name.clone(),
                order_item_count: record.order_item_count,
            };
            worker
                .publisher
                .publish(&worker.order_created_topic, &event)
                .await?;
            Ok::<_, DomainError>(record)
        })
        .await?;

    if outcome.is_replayed() {
        counter!("replayed_create_order_events_total").increment(1);
    }
    Ok(Json(outcome.into_inner()))
}

/// GET /api/orders — fetch one order; the key is the `order_id` header.
#[tracing::instrument(skip_all)]
pub async fn get<S, U, I, P>(
    State(state): State<Arc<AppState<S, U, I, P>>>,
    headers: HeaderMap,
) -> Result<Json<OrderRecord>, ApiError>
where
    S: OrderStore + 'static,
    U: UserStore + 'static,
    I: IdempotencyStore + 'static,
    P: EventPublisher + 'static,
{
    state.features.current().await?;
    let request = GetOrderRequest {
        order_id: key_header(&headers, "order_id")?,
    };
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    counter!("valid_get_order_events_total").increment(1);

    match state.orders.get(&request).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/orders — delete by key; succeeds whether or not the key
/// existed and echoes the key back.
#[tracing::instrument(skip_all)]
pub async fn delete<S, U, I, P>(
    State(state): State<Arc<AppState<S, U, I, P>>>,
    body: Bytes,
) -> Result<Json<OrderKey>, ApiError>
where
    S: OrderStore + 'static,
    U: UserStore + 'static,
    I: IdempotencyStore + 'static,
    P: EventPublisher + 'static,
{
    state.features.current().await?;
    let request: DeleteOrderRequest = parse_json(&body)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    counter!("valid_delete_order_events_total").increment(1);

    Ok(Json(state.orders.delete(&request).await?))
}
