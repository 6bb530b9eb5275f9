//! Domain layer for the orderdesk service.
//!
//! This crate provides:
//! - request schemas with the entity validation rules
//! - `OrderService` / `UserService` wrapping the storage port
//! - the `DomainError` taxonomy the API maps to response codes

pub mod error;
pub mod orders;
pub mod users;
pub mod validate;

pub use error::DomainError;
pub use orders::{CreateOrderRequest, DeleteOrderRequest, GetOrderRequest, OrderService};
pub use users::{CreateUserRequest, DeleteUserRequest, GetUserRequest, UserService};
