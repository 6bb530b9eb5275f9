//! HTTP API server for the orderdesk service.
//!
//! Exposes CRUD endpoints for orders and users over pluggable key-value
//! backends, with body-fingerprint idempotency on creates, fan-out
//! notification on order creation, structured logging (tracing), and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod features;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{OrderService, UserService};
use events::{EventPublisher, InMemoryPublisher};
use idempotency::{IdempotencyLayer, IdempotencyStore, InMemoryIdempotencyStore};
use kv_store::{InMemoryOrderStore, InMemoryUserStore, OrderStore, UserStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use features::{CachedConfiguration, ConfigurationSource, StaticConfigurationSource};
pub use routes::AppState;

/// Application state wired entirely with in-memory backends.
pub type InMemoryAppState =
    AppState<InMemoryOrderStore, InMemoryUserStore, InMemoryIdempotencyStore, InMemoryPublisher>;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, U, I, P>(
    state: Arc<AppState<S, U, I, P>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    S: OrderStore + 'static,
    U: UserStore + 'static,
    I: IdempotencyStore + 'static,
    P: EventPublisher + 'static,
{
    let health_router = Router::new()
        .route("/health", get(routes::health::check))
        .with_state(state.service_name.clone());

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route(
            "/api/orders",
            post(routes::orders::create::<S, U, I, P>)
                .get(routes::orders::get::<S, U, I, P>)
                .delete(routes::orders::delete::<S, U, I, P>),
        )
        .route(
            "/api/users",
            post(routes::users::create::<S, U, I, P>)
                .get(routes::users::get::<S, U, I, P>)
                .delete(routes::users::delete::<S, U, I, P>),
        )
        .with_state(state)
        .merge(health_router)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state backed by in-memory stores and publisher.
///
/// Returns the shared backend handles alongside the state so callers can
/// observe and fault-inject the stores underneath the services.
pub fn create_in_memory_state(
    config: &Config,
) -> (
    Arc<InMemoryAppState>,
    InMemoryOrderStore,
    InMemoryUserStore,
    InMemoryIdempotencyStore,
) {
    let order_store = InMemoryOrderStore::new();
    let user_store = InMemoryUserStore::new();
    let idempotency_store = InMemoryIdempotencyStore::new();

    let state = Arc::new(AppState {
        orders: OrderService::new(order_store.clone()),
        users: UserService::new(user_store.clone()),
        idempotency: IdempotencyLayer::new(idempotency_store.clone()),
        publisher: InMemoryPublisher::new(),
        features: CachedConfiguration::new(
            Arc::new(StaticConfigurationSource::default()),
            config.configuration_app.clone(),
            config.configuration_env.clone(),
            config.configuration_name.clone(),
            config.configuration_max_age_minutes,
        ),
        order_created_topic: config.order_created_topic.clone(),
        service_name: config.service_name.clone(),
    });

    (state, order_store, user_store, idempotency_store)
}
