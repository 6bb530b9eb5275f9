//! Dynamic feature configuration, fetched through a pluggable source and
//! cached for a bounded age.
//!
//! Every request handler resolves the current configuration before doing any
//! work, so a configuration outage fails the request rather than silently
//! running with stale flags past the cache age.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised while fetching or decoding dynamic configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("configuration fetch failed: {0}")]
    Fetch(String),
    #[error("configuration schema invalid: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Typed view of the feature-flag document.
///
/// Unknown fields are ignored and missing fields default to off, so the
/// document can grow without redeploying the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeatureConfiguration {
    #[serde(default)]
    pub premium_features_enabled: bool,
    #[serde(default)]
    pub campaign_discount_enabled: bool,
}

/// Where configuration documents come from.
#[async_trait]
pub trait ConfigurationSource: Send + Sync {
    /// Fetches the raw configuration document for the given coordinates.
    async fn fetch(
        &self,
        app: &str,
        environment: &str,
        name: &str,
    ) -> Result<serde_json::Value, ConfigurationError>;
}

/// A source that always returns the same document. Used when no external
/// configuration service is wired in, and in tests.
pub struct StaticConfigurationSource {
    value: serde_json::Value,
}

impl StaticConfigurationSource {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }
}

impl Default for StaticConfigurationSource {
    fn default() -> Self {
        Self::new(serde_json::json!({}))
    }
}

#[async_trait]
impl ConfigurationSource for StaticConfigurationSource {
    async fn fetch(
        &self,
        _app: &str,
        _environment: &str,
        _name: &str,
    ) -> Result<serde_json::Value, ConfigurationError> {
        Ok(self.value.clone())
    }
}

/// Caches the decoded configuration and refetches once it is older than
/// `max_age`. Concurrent readers share the cached value without refetching.
pub struct CachedConfiguration {
    source: Arc<dyn ConfigurationSource>,
    app: String,
    environment: String,
    name: String,
    max_age: Duration,
    slot: RwLock<Option<(FeatureConfiguration, Instant)>>,
}

impl CachedConfiguration {
    pub fn new(
        source: Arc<dyn ConfigurationSource>,
        app: impl Into<String>,
        environment: impl Into<String>,
        name: impl Into<String>,
        max_age_minutes: u64,
    ) -> Self {
        Self {
            source,
            app: app.into(),
            environment: environment.into(),
            name: name.into(),
            max_age: Duration::from_secs(max_age_minutes * 60),
            slot: RwLock::new(None),
        }
    }

    /// Returns the current configuration, refetching when the cached copy
    /// has aged out.
    pub async fn current(&self) -> Result<FeatureConfiguration, ConfigurationError> {
        {
            let slot = self.slot.read().await;
            if let Some((config, fetched_at)) = slot.as_ref()
                && fetched_at.elapsed() < self.max_age
            {
                return Ok(config.clone());
            }
        }

        let mut slot = self.slot.write().await;
        // Another task may have refreshed while we waited for the write lock.
        if let Some((config, fetched_at)) = slot.as_ref()
            && fetched_at.elapsed() < self.max_age
        {
            return Ok(config.clone());
        }

        tracing::debug!(
            app = %self.app,
            environment = %self.environment,
            name = %self.name,
            "fetching dynamic configuration"
        );
        let raw = self
            .source
            .fetch(&self.app, &self.environment, &self.name)
            .await?;
        let config: FeatureConfiguration = serde_json::from_value(raw)?;
        *slot = Some((config.clone(), Instant::now()));
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        value: serde_json::Value,
    }

    #[async_trait]
    impl ConfigurationSource for CountingSource {
        async fn fetch(
            &self,
            _app: &str,
            _environment: &str,
            _name: &str,
        ) -> Result<serde_json::Value, ConfigurationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ConfigurationSource for FailingSource {
        async fn fetch(
            &self,
            _app: &str,
            _environment: &str,
            _name: &str,
        ) -> Result<serde_json::Value, ConfigurationError> {
            Err(ConfigurationError::Fetch("unreachable".to_string()))
        }
    }

    fn cached(source: Arc<dyn ConfigurationSource>, max_age_minutes: u64) -> CachedConfiguration {
        CachedConfiguration::new(source, "orderdesk", "dev", "features", max_age_minutes)
    }

    #[tokio::test]
    async fn decodes_known_flags_and_ignores_unknown_fields() {
        let source = StaticConfigurationSource::new(serde_json::json!({
            "premium_features_enabled": true,
            "some_future_flag": 42,
        }));
        let config = cached(Arc::new(source), 5).current().await.unwrap();

        assert!(config.premium_features_enabled);
        assert!(!config.campaign_discount_enabled);
    }

    #[tokio::test]
    async fn empty_document_defaults_all_flags_off() {
        let config = cached(Arc::new(StaticConfigurationSource::default()), 5)
            .current()
            .await
            .unwrap();
        assert_eq!(config, FeatureConfiguration::default());
    }

    #[tokio::test]
    async fn second_read_within_max_age_hits_the_cache() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            value: serde_json::json!({}),
        });
        let cache = cached(source.clone(), 5);

        cache.current().await.unwrap();
        cache.current().await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_max_age_refetches_every_read() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            value: serde_json::json!({}),
        });
        let cache = cached(source.clone(), 0);

        cache.current().await.unwrap();
        cache.current().await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_failure_is_surfaced() {
        let result = cached(Arc::new(FailingSource), 5).current().await;
        assert!(matches!(result, Err(ConfigurationError::Fetch(_))));
    }

    #[tokio::test]
    async fn non_boolean_flag_is_a_schema_error() {
        let source = StaticConfigurationSource::new(serde_json::json!({
            "premium_features_enabled": "yes",
        }));
        let result = cached(Arc::new(source), 5).current().await;
        assert!(matches!(result, Err(ConfigurationError::Schema(_))));
    }
}
