//! Record store contract for idempotency claims.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::RecordStoreError;

/// Result of attempting to claim a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The fingerprint was unclaimed (or its record had expired); the
    /// caller now owns the single in-flight execution.
    Acquired,
    /// Another execution for this fingerprint is in progress.
    Pending,
    /// A previous execution completed; its stored payload is returned.
    Completed(serde_json::Value),
}

/// Keyed put/get store with conditional create and expiry.
///
/// `claim` must be a single conditional write: for a given key, exactly
/// one concurrent caller observes [`Claim::Acquired`] while the claim is
/// live. Records past `expires_at` are treated as absent.
#[async_trait]
pub trait IdempotencyStore: Send + Sync {
    /// Attempts to claim `key` until `expires_at`.
    async fn claim(&self, key: &str, expires_at: DateTime<Utc>)
    -> Result<Claim, RecordStoreError>;

    /// Marks a claimed key as completed with the result payload.
    async fn complete(&self, key: &str, payload: serde_json::Value)
    -> Result<(), RecordStoreError>;

    /// Drops a claim so a later request may execute again. Used when the
    /// wrapped operation fails.
    async fn release(&self, key: &str) -> Result<(), RecordStoreError>;
}
