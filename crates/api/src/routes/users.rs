//! User CRUD endpoints.
//!
//! Creation is idempotent on the raw request body, same as orders, but no
//! notification is published.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use domain::{CreateUserRequest, DeleteUserRequest, DomainError, GetUserRequest};
use events::EventPublisher;
use idempotency::{Fingerprint, IdempotencyStore};
use kv_store::{OrderStore, UserKey, UserRecord, UserStore};
use metrics::counter;
use validator::Validate;

use super::{AppState, key_header, parse_json};
use crate::error::ApiError;

/// POST /api/users — create a new user with a server-generated key.
#[tracing::instrument(skip_all)]
pub async fn create<S, U, I, P>(
    State(state): State<Arc<AppState<S, U, I, P>>>,
    body: Bytes,
) -> Result<Json<UserRecord>, ApiError>
where
    S: OrderStore + 'static,
    U: UserStore + 'static,
    I: IdempotencyStore + 'static,
    P: EventPublisher + 'static,
{
    state.features.current().await?;
    let request: CreateUserRequest = parse_json(&body)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    counter!("valid_create_user_events_total").increment(1);

    let fingerprint = Fingerprint::from_payload("create_user", &body);
    let worker = state.clone();
    let outcome = state
        .idempotency
        .execute(&fingerprint, move || async move {
            Ok::<_, DomainError>(worker.users.create(&request).await?)
        })
        .await?;

    if outcome.is_replayed() {
        counter!("replayed_create_user_events_total").increment(1);
    }
    Ok(Json(outcome.into_inner()))
}

/// GET /api/users — fetch one user; the key is the `user_id` header.
#[tracing::instrument(skip_all)]
pub async fn get<S, U, I, P>(
    State(state): State<Arc<AppState<S, U, I, P>>>,
    headers: HeaderMap,
) -> Result<Json<UserRecord>, ApiError>
where
    S: OrderStore + 'static,
    U: UserStore + 'static,
    I: IdempotencyStore + 'static,
    P: EventPublisher + 'static,
{
    state.features.current().await?;
    let request = GetUserRequest {
        user_id: key_header(&headers, "user_id")?,
    };
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    counter!("valid_get_user_events_total").increment(1);

    match state.users.get(&request).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/users — delete by key; succeeds whether or not the key
/// existed and echoes the key back.
#[tracing::instrument(skip_all)]
pub async fn delete<S, U, I, P>(
    State(state): State<Arc<AppState<S, U, I, P>>>,
    body: Bytes,
) -> Result<Json<UserKey>, ApiError>
where
    S: OrderStore + 'static,
    U: UserStore + 'static,
    I: IdempotencyStore + 'static,
    P: EventPublisher + 'static,
{
    state.features.current().await?;
    let request: DeleteUserRequest = parse_json(&body)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    counter!("valid_delete_user_events_total").increment(1);

    Ok(Json(state.users.delete(&request).await?))
}
