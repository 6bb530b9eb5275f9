//! User entity: request schemas and service.

pub mod requests;
pub mod service;

pub use requests::{CreateUserRequest, DeleteUserRequest, GetUserRequest};
pub use service::UserService;
