//! The idempotent-execution wrapper.

use chrono::{Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::IdempotencyError;
use crate::fingerprint::Fingerprint;
use crate::store::{Claim, IdempotencyStore};

/// How an [`IdempotencyLayer::execute`] call produced its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The wrapped operation ran and its result was recorded.
    Fresh(T),
    /// A stored result from an earlier identical request was returned;
    /// the wrapped operation did not run.
    Replayed(T),
}

impl<T> Outcome<T> {
    /// Unwraps the value regardless of provenance.
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Fresh(value) | Outcome::Replayed(value) => value,
        }
    }

    /// Returns true if the value came from a stored record.
    pub fn is_replayed(&self) -> bool {
        matches!(self, Outcome::Replayed(_))
    }
}

/// Wraps create operations so repeated requests with the same
/// fingerprint within the retention window return the original result
/// instead of executing again.
pub struct IdempotencyLayer<I: IdempotencyStore> {
    store: I,
    retention: Duration,
}

impl<I: IdempotencyStore> IdempotencyLayer<I> {
    /// Creates a layer with the default two-hour retention window.
    pub fn new(store: I) -> Self {
        Self::with_retention(store, Duration::hours(2))
    }

    /// Creates a layer with an explicit retention window.
    pub fn with_retention(store: I, retention: Duration) -> Self {
        Self { store, retention }
    }

    /// Runs `op` at most once per fingerprint within the retention
    /// window.
    ///
    /// - A stored result is replayed verbatim without re-executing `op`.
    /// - A live concurrent execution yields [`IdempotencyError::Pending`].
    /// - If `op` fails, the claim is released so a retry can execute.
    /// - If the record itself cannot be persisted, the failure is
    ///   surfaced; the operation is never silently re-run.
    pub async fn execute<T, E, F, Fut>(
        &self,
        fingerprint: &Fingerprint,
        op: F,
    ) -> Result<Outcome<T>, IdempotencyError<E>>
    where
        T: Serialize + DeserializeOwned,
        E: std::error::Error,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let expires_at = Utc::now() + self.retention;

        match self.store.claim(fingerprint.as_str(), expires_at).await? {
            Claim::Completed(payload) => {
                tracing::info!(%fingerprint, "duplicate request, replaying stored result");
                Ok(Outcome::Replayed(serde_json::from_value(payload)?))
            }
            Claim::Pending => Err(IdempotencyError::Pending),
            Claim::Acquired => match op().await {
                Ok(value) => {
                    let payload = match serde_json::to_value(&value) {
                        Ok(payload) => payload,
                        Err(e) => {
                            self.release_claim(fingerprint).await;
                            return Err(e.into());
                        }
                    };
                    self.store.complete(fingerprint.as_str(), payload).await?;
                    Ok(Outcome::Fresh(value))
                }
                Err(err) => {
                    self.release_claim(fingerprint).await;
                    Err(IdempotencyError::Operation(err))
                }
            },
        }
    }

    async fn release_claim(&self, fingerprint: &Fingerprint) {
        if let Err(release_err) = self.store.release(fingerprint.as_str()).await {
            tracing::warn!(%fingerprint, error = %release_err, "failed to release idempotency claim");
        }
    }
}
