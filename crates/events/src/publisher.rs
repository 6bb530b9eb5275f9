//! Publisher contract for the event transport.

use async_trait::async_trait;

use crate::error::PublishError;
use crate::order_created::OrderCreated;

/// Publishes structured events to a named topic.
///
/// Returning `Ok` means the transport acknowledged the publish, not
/// that any consumer has processed the event. Delivery guarantees
/// (at-least-once, ordering) belong to the transport.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one event to `topic`.
    async fn publish(&self, topic: &str, event: &OrderCreated) -> Result<(), PublishError>;
}
