//! In-memory publisher for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::PublishError;
use crate::order_created::OrderCreated;
use crate::publisher::EventPublisher;

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    published: Vec<(String, OrderCreated)>,
    fail_publish: bool,
}

/// In-memory event publisher that records everything it publishes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    state: Arc<RwLock<InMemoryPublisherState>>,
}

impl InMemoryPublisher {
    /// Creates a new in-memory publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the publisher to fail subsequent publish calls.
    pub fn set_fail_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_publish = fail;
    }

    /// Returns all published `(topic, event)` pairs so far.
    pub fn published(&self) -> Vec<(String, OrderCreated)> {
        self.state.read().unwrap().published.clone()
    }

    /// Returns the number of published events.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryPublisher {
    async fn publish(&self, topic: &str, event: &OrderCreated) -> Result<(), PublishError> {
        let mut state = self.state.write().unwrap();

        if state.fail_publish {
            return Err(PublishError::Transport(
                "in-memory transport configured to fail".to_string(),
            ));
        }

        state.published.push((topic.to_string(), event.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::OrderId;

    fn event() -> OrderCreated {
        OrderCreated {
            order_id: OrderId::new(),
            customer_name: "Alice".to_string(),
            order_item_count: 2,
        }
    }

    #[tokio::test]
    async fn records_published_events_per_topic() {
        let publisher = InMemoryPublisher::new();
        let event = event();

        publisher.publish("order-created", &event).await.unwrap();

        let published = publisher.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "order-created");
        assert_eq!(published[0].1, event);
    }

    #[tokio::test]
    async fn failure_toggle_rejects_publish() {
        let publisher = InMemoryPublisher::new();
        publisher.set_fail_publish(true);

        let result = publisher.publish("order-created", &event()).await;
        assert!(matches!(result, Err(PublishError::Transport(_))));
        assert_eq!(publisher.published_count(), 0);
    }
}
