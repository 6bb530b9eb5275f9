//! Order entity: request schemas and service.

pub mod requests;
pub mod service;

pub use requests::{CreateOrderRequest, DeleteOrderRequest, GetOrderRequest};
pub use service::OrderService;
