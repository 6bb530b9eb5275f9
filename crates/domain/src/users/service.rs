//! User service: validate the request, then drive the storage port.

use common::UserId;
use kv_store::{UserKey, UserRecord, UserStore};
use validator::Validate;

use crate::error::DomainError;
use crate::validate::parse_v4_key;

use super::{CreateUserRequest, DeleteUserRequest, GetUserRequest};

/// Service for managing users over any [`UserStore`] backend.
pub struct UserService<S: UserStore> {
    store: S,
}

impl<S: UserStore> UserService<S> {
    /// Creates a new user service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new user; the key is server-generated.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(&self, request: &CreateUserRequest) -> Result<UserRecord, DomainError> {
        request.validate()?;
        tracing::info!(user_name = %request.user_name, "handling create user request");
        let record = self
            .store
            .create_user(&request.user_name, &request.email)
            .await?;
        tracing::info!(user_id = %record.user_id, "finished create user");
        Ok(record)
    }

    /// Loads a user by key. Returns `None` when the key is absent.
    #[tracing::instrument(skip(self, request))]
    pub async fn get(&self, request: &GetUserRequest) -> Result<Option<UserRecord>, DomainError> {
        request.validate()?;
        let user_id = UserId::from_uuid(parse_v4_key(&request.user_id)?);
        tracing::info!(%user_id, "handling get user request");
        Ok(self.store.get_user(user_id).await?)
    }

    /// Deletes a user by key; succeeds regardless of prior existence.
    #[tracing::instrument(skip(self, request))]
    pub async fn delete(&self, request: &DeleteUserRequest) -> Result<UserKey, DomainError> {
        request.validate()?;
        let user_id = UserId::from_uuid(parse_v4_key(&request.user_id)?);
        tracing::info!(%user_id, "handling delete user request");
        Ok(self.store.delete_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kv_store::InMemoryUserStore;

    fn service() -> (UserService<InMemoryUserStore>, InMemoryUserStore) {
        let store = InMemoryUserStore::new();
        (UserService::new(store.clone()), store)
    }

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            user_name: "bob".to_string(),
            email: "bob@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_get_delete_lifecycle() {
        let (service, _) = service();

        let created = service.create(&create_request()).await.unwrap();
        assert_eq!(created.user_id.as_uuid().get_version_num(), 4);

        let fetched = service
            .get(&GetUserRequest {
                user_id: created.user_id.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(fetched, Some(created.clone()));

        let key = service
            .delete(&DeleteUserRequest {
                user_id: created.user_id.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(key.user_id, created.user_id);

        let gone = service
            .get(&GetUserRequest {
                user_id: created.user_id.to_string(),
            })
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_the_store() {
        let (service, store) = service();

        let request = CreateUserRequest {
            user_name: "bob".to_string(),
            email: "nope".to_string(),
        };
        let result = service.create(&request).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn backend_failure_is_surfaced_as_store_error() {
        let (service, store) = service();
        store.set_fail_requests(true);

        let result = service.create(&create_request()).await;
        assert!(matches!(result, Err(DomainError::Store(_))));
    }
}
