//! Inbound request schemas for the user entity.

use serde::Deserialize;
use validator::Validate;

/// Body of a user create. The user id is never client-supplied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 20))]
    pub user_name: String,
    #[validate(email)]
    pub email: String,
}

/// Body of a user delete: the primary key only.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteUserRequest {
    #[validate(custom(function = crate::validate::uuid_v4))]
    pub user_id: String,
}

/// Key of a user get, carried in the `user_id` request header.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetUserRequest {
    #[validate(custom(function = crate::validate::uuid_v4))]
    pub user_id: String,
}
