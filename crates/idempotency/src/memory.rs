//! In-memory idempotency record store for testing and single-process
//! deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::RecordStoreError;
use crate::store::{Claim, IdempotencyStore};

#[derive(Debug, Clone)]
enum Status {
    InProgress,
    Completed(serde_json::Value),
}

#[derive(Debug, Clone)]
struct Record {
    status: Status,
    expires_at: DateTime<Utc>,
}

/// In-memory record store. The single mutex makes each claim atomic, so
/// exactly one concurrent caller acquires a given fingerprint.
#[derive(Clone, Default)]
pub struct InMemoryIdempotencyStore {
    records: Arc<Mutex<HashMap<String, Record>>>,
}

impl InMemoryIdempotencyStore {
    /// Creates a new empty record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live (unexpired) records.
    pub async fn live_record_count(&self) -> usize {
        let now = Utc::now();
        self.records
            .lock()
            .await
            .values()
            .filter(|r| r.expires_at > now)
            .count()
    }
}

#[async_trait]
impl IdempotencyStore for InMemoryIdempotencyStore {
    async fn claim(
        &self,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Claim, RecordStoreError> {
        let mut records = self.records.lock().await;
        let now = Utc::now();

        if let Some(record) = records.get(key) {
            if record.expires_at > now {
                return Ok(match &record.status {
                    Status::InProgress => Claim::Pending,
                    Status::Completed(payload) => Claim::Completed(payload.clone()),
                });
            }
        }

        records.insert(
            key.to_string(),
            Record {
                status: Status::InProgress,
                expires_at,
            },
        );
        Ok(Claim::Acquired)
    }

    async fn complete(
        &self,
        key: &str,
        payload: serde_json::Value,
    ) -> Result<(), RecordStoreError> {
        let mut records = self.records.lock().await;
        if let Some(record) = records.get_mut(key) {
            record.status = Status::Completed(payload);
        }
        Ok(())
    }

    async fn release(&self, key: &str) -> Result<(), RecordStoreError> {
        self.records.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn in_an_hour() -> DateTime<Utc> {
        Utc::now() + Duration::hours(1)
    }

    #[tokio::test]
    async fn first_claim_is_acquired_second_is_pending() {
        let store = InMemoryIdempotencyStore::new();

        assert_eq!(store.claim("k", in_an_hour()).await.unwrap(), Claim::Acquired);
        assert_eq!(store.claim("k", in_an_hour()).await.unwrap(), Claim::Pending);
    }

    #[tokio::test]
    async fn completed_claim_returns_stored_payload() {
        let store = InMemoryIdempotencyStore::new();
        store.claim("k", in_an_hour()).await.unwrap();
        store
            .complete("k", serde_json::json!({"order_id": "abc"}))
            .await
            .unwrap();

        let claim = store.claim("k", in_an_hour()).await.unwrap();
        assert_eq!(claim, Claim::Completed(serde_json::json!({"order_id": "abc"})));
    }

    #[tokio::test]
    async fn released_claim_can_be_acquired_again() {
        let store = InMemoryIdempotencyStore::new();
        store.claim("k", in_an_hour()).await.unwrap();
        store.release("k").await.unwrap();

        assert_eq!(store.claim("k", in_an_hour()).await.unwrap(), Claim::Acquired);
    }

    #[tokio::test]
    async fn expired_record_is_claimable() {
        let store = InMemoryIdempotencyStore::new();
        let already_expired = Utc::now() - Duration::seconds(1);
        store.claim("k", already_expired).await.unwrap();

        assert_eq!(store.claim("k", in_an_hour()).await.unwrap(), Claim::Acquired);
    }

    #[tokio::test]
    async fn distinct_keys_do_not_interfere() {
        let store = InMemoryIdempotencyStore::new();
        assert_eq!(store.claim("a", in_an_hour()).await.unwrap(), Claim::Acquired);
        assert_eq!(store.claim("b", in_an_hour()).await.unwrap(), Claim::Acquired);
    }
}
