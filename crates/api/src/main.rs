//! API server entry point.

use std::sync::Arc;

use api::routes::AppState;
use api::{CachedConfiguration, Config, StaticConfigurationSource};
use domain::{OrderService, UserService};
use events::{notification_channel, spawn_email_notifier};
use idempotency::{IdempotencyLayer, InMemoryIdempotencyStore, PgIdempotencyStore};
use kv_store::{
    CachedPool, InMemoryOrderStore, InMemoryUserStore, PgOrderStore, PgUserStore,
};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

fn feature_configuration(config: &Config) -> CachedConfiguration {
    CachedConfiguration::new(
        Arc::new(StaticConfigurationSource::default()),
        config.configuration_app.clone(),
        config.configuration_env.clone(),
        config.configuration_name.clone(),
        config.configuration_max_age_minutes,
    )
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(service = %config.service_name, "starting API server");

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Wire the notification fan-out
    let (publisher, rx) = notification_channel();
    let notifier = spawn_email_notifier(rx);

    // 4. Build application state on the configured backend
    let app = match &config.database_url {
        Some(url) => {
            let pool = Arc::new(CachedPool::new(url.clone()));
            pool.run_migrations().await.expect("failed to run migrations");
            tracing::info!("using Postgres backends");

            let state = Arc::new(AppState {
                orders: OrderService::new(PgOrderStore::new(
                    pool.clone(),
                    config.orders_table.clone(),
                )),
                users: UserService::new(PgUserStore::new(
                    pool.clone(),
                    config.users_table.clone(),
                )),
                idempotency: IdempotencyLayer::new(PgIdempotencyStore::new(
                    pool,
                    config.idempotency_table.clone(),
                )),
                publisher,
                features: feature_configuration(&config),
                order_created_topic: config.order_created_topic.clone(),
                service_name: config.service_name.clone(),
            });
            api::create_app(state, metrics_handle)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory backends");

            let state = Arc::new(AppState {
                orders: OrderService::new(InMemoryOrderStore::new()),
                users: UserService::new(InMemoryUserStore::new()),
                idempotency: IdempotencyLayer::new(InMemoryIdempotencyStore::new()),
                publisher,
                features: feature_configuration(&config),
                order_created_topic: config.order_created_topic.clone(),
                service_name: config.service_name.clone(),
            });
            api::create_app(state, metrics_handle)
        }
    };

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    // The router (and its publisher) is dropped once serve returns, which
    // closes the channel and lets the notifier drain and stop.
    notifier.await.expect("notifier task panicked");
    tracing::info!("server shut down gracefully");
}
