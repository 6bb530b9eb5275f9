//! Create-idempotency layer for the orderdesk service.
//!
//! A retryable create is wrapped in [`IdempotencyLayer::execute`]: the
//! first request for a given [`Fingerprint`] claims the fingerprint,
//! runs the operation and stores its result; duplicates within the
//! retention window get the stored result back verbatim, and concurrent
//! duplicates are rejected with a transient conflict.

pub mod error;
pub mod fingerprint;
pub mod layer;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{IdempotencyError, RecordStoreError};
pub use fingerprint::Fingerprint;
pub use layer::{IdempotencyLayer, Outcome};
pub use memory::InMemoryIdempotencyStore;
pub use postgres::PgIdempotencyStore;
pub use store::{Claim, IdempotencyStore};
