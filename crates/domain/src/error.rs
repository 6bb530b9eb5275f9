use events::PublishError;
use kv_store::StoreError;
use thiserror::Error;

/// Errors raised by the domain services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request violated the entity schema. Client-visible as a
    /// generic 400; the field detail stays in the log.
    #[error("request failed validation")]
    Validation(#[from] validator::ValidationErrors),

    /// A record key that is not a v4 UUID.
    #[error("invalid record key: not a v4 UUID")]
    InvalidKey,

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The event transport failed to acknowledge a publish.
    #[error(transparent)]
    Publish(#[from] PublishError),
}
