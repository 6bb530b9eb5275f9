//! Notification fan-out for order creation.
//!
//! The API publishes an [`OrderCreated`] event after a successful
//! persist; delivery to downstream consumers is the transport's
//! responsibility and is never awaited by the publisher.

pub mod error;
pub mod memory;
pub mod notifier;
pub mod order_created;
pub mod publisher;

pub use error::PublishError;
pub use memory::InMemoryPublisher;
pub use notifier::{ChannelPublisher, notification_channel, spawn_email_notifier};
pub use order_created::OrderCreated;
pub use publisher::EventPublisher;
