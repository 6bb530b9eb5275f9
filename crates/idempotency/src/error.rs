use thiserror::Error;

/// Failure inside the idempotency record store itself.
#[derive(Debug, Error)]
#[error("idempotency record store failure: {0}")]
pub struct RecordStoreError(#[from] pub kv_store::StoreError);

impl From<sqlx::Error> for RecordStoreError {
    fn from(e: sqlx::Error) -> Self {
        Self(kv_store::StoreError::Database(e))
    }
}

/// Errors produced by the idempotency layer.
#[derive(Debug, Error)]
pub enum IdempotencyError<E: std::error::Error> {
    /// A request with the same fingerprint is currently executing.
    /// Transient: the caller may retry once that execution settles.
    #[error("a request with the same fingerprint is already in progress")]
    Pending,

    /// The idempotency record could not be read or written. Surfaced as
    /// a server error; the wrapped operation is never silently re-run.
    #[error(transparent)]
    Store(#[from] RecordStoreError),

    /// The stored payload could not be (de)serialized.
    #[error("idempotency payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The wrapped operation itself failed.
    #[error(transparent)]
    Operation(E),
}
