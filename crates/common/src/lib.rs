//! Shared types for the orderdesk service.

pub mod ids;

pub use ids::{OrderId, UserId};
