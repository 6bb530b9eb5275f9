//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod orders;
pub mod users;

use axum::http::HeaderMap;
use domain::{OrderService, UserService};
use events::EventPublisher;
use idempotency::{IdempotencyLayer, IdempotencyStore};
use kv_store::{OrderStore, UserStore};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::features::CachedConfiguration;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore, U: UserStore, I: IdempotencyStore, P: EventPublisher> {
    pub orders: OrderService<S>,
    pub users: UserService<U>,
    pub idempotency: IdempotencyLayer<I>,
    pub publisher: P,
    pub features: CachedConfiguration,
    pub order_created_topic: String,
    pub service_name: String,
}

/// Parses a raw request body into `T`. Malformed or mis-shaped JSON is a
/// validation failure, not a server error.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Extracts an entity key carried in a request header.
pub(crate) fn key_header(headers: &HeaderMap, name: &str) -> Result<String, ApiError> {
    let value = headers
        .get(name)
        .ok_or_else(|| ApiError::Validation(format!("missing `{name}` header")))?;
    let value = value
        .to_str()
        .map_err(|_| ApiError::Validation(format!("`{name}` header is not valid UTF-8")))?;
    Ok(value.to_string())
}
