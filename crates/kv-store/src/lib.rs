//! Storage port for the orderdesk service.
//!
//! Defines the per-entity store contracts (`OrderStore`, `UserStore`)
//! together with an in-memory backend for tests and a PostgreSQL backend
//! that reaches its connection pool through a TTL-bounded cache.

pub mod error;
pub mod memory;
pub mod orders;
pub mod pool;
pub mod postgres;
pub mod users;

pub use common::{OrderId, UserId};
pub use error::{Result, StoreError};
pub use memory::{InMemoryOrderStore, InMemoryUserStore};
pub use orders::{OrderKey, OrderRecord, OrderStore};
pub use pool::CachedPool;
pub use postgres::{PgOrderStore, PgUserStore};
pub use users::{UserKey, UserRecord, UserStore};
