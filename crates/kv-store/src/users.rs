//! User record types and the user store contract.

use async_trait::async_trait;
use common::UserId;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A fully populated user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

/// Key-only projection of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserKey {
    pub user_id: UserId,
}

impl From<&UserRecord> for UserKey {
    fn from(record: &UserRecord) -> Self {
        Self {
            user_id: record.user_id,
        }
    }
}

/// Keyed storage contract for users.
///
/// Deliberately separate from [`crate::OrderStore`]: the two entities
/// share a shape but not a contract, so each gets its own capability.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user under a freshly generated v4 UUID key and
    /// returns the stored record.
    async fn create_user(&self, user_name: &str, email: &str) -> Result<UserRecord>;

    /// Returns the stored user, or `None` if the key is absent.
    async fn get_user(&self, user_id: UserId) -> Result<Option<UserRecord>>;

    /// Removes the user if present; returns the key projection
    /// regardless of prior existence.
    async fn delete_user(&self, user_id: UserId) -> Result<UserKey>;
}
