//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `SERVICE_NAME` — logical service name for logs (default: `"orderdesk"`)
/// - `DATABASE_URL` — Postgres connection string; in-memory backends when unset
/// - `ORDERS_TABLE_NAME` / `USERS_TABLE_NAME` / `IDEMPOTENCY_TABLE_NAME` — table names
/// - `ORDER_CREATED_TOPIC` — topic published on order creation (default: `"order-created"`)
/// - `CONFIGURATION_APP` / `CONFIGURATION_ENV` / `CONFIGURATION_NAME` — dynamic
///   configuration coordinates
/// - `CONFIGURATION_MAX_AGE_MINUTES` — dynamic configuration cache age (default: `5`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub service_name: String,
    pub database_url: Option<String>,
    pub orders_table: String,
    pub users_table: String,
    pub idempotency_table: String,
    pub order_created_topic: String,
    pub configuration_app: String,
    pub configuration_env: String,
    pub configuration_name: String,
    pub configuration_max_age_minutes: u64,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: env_or("RUST_LOG", "info"),
            service_name: env_or("SERVICE_NAME", "orderdesk"),
            database_url: std::env::var("DATABASE_URL").ok(),
            orders_table: env_or("ORDERS_TABLE_NAME", "orders"),
            users_table: env_or("USERS_TABLE_NAME", "users"),
            idempotency_table: env_or("IDEMPOTENCY_TABLE_NAME", "idempotency"),
            order_created_topic: env_or("ORDER_CREATED_TOPIC", "order-created"),
            configuration_app: env_or("CONFIGURATION_APP", "orderdesk"),
            configuration_env: env_or("CONFIGURATION_ENV", "dev"),
            configuration_name: env_or("CONFIGURATION_NAME", "features"),
            configuration_max_age_minutes: std::env::var("CONFIGURATION_MAX_AGE_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            service_name: "orderdesk".to_string(),
            database_url: None,
            orders_table: "orders".to_string(),
            users_table: "users".to_string(),
            idempotency_table: "idempotency".to_string(),
            order_created_topic: "order-created".to_string(),
            configuration_app: "orderdesk".to_string(),
            configuration_env: "dev".to_string(),
            configuration_name: "features".to_string(),
            configuration_max_age_minutes: 5,
        }
    }
}
