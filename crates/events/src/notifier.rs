//! Channel transport and the email-style notification consumer.
//!
//! The binary wires [`ChannelPublisher`] into the API and spawns
//! [`spawn_email_notifier`] on the receiving end. The consumer is fully
//! decoupled: a publish is acknowledged once the event is queued, and
//! nothing waits on the notifier task.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::PublishError;
use crate::order_created::OrderCreated;
use crate::publisher::EventPublisher;

/// Publisher backed by an in-process mpsc channel.
#[derive(Clone)]
pub struct ChannelPublisher {
    tx: mpsc::UnboundedSender<(String, OrderCreated)>,
}

/// Creates a channel transport pair.
pub fn notification_channel() -> (
    ChannelPublisher,
    mpsc::UnboundedReceiver<(String, OrderCreated)>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelPublisher { tx }, rx)
}

#[async_trait]
impl EventPublisher for ChannelPublisher {
    async fn publish(&self, topic: &str, event: &OrderCreated) -> Result<(), PublishError> {
        self.tx
            .send((topic.to_string(), event.clone()))
            .map_err(|_| PublishError::ChannelClosed)
    }
}

/// Spawns the downstream consumer that "emails" on each order creation.
///
/// Stands in for an external notifier; here it renders the message and
/// logs it. The task ends when all publishers are dropped.
pub fn spawn_email_notifier(
    mut rx: mpsc::UnboundedReceiver<(String, OrderCreated)>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some((topic, event)) = rx.recv().await {
            tracing::info!(
                %topic,
                order_id = %event.order_id,
                subject = %event.subject(),
                "sending order created email:\n{}",
                event.message()
            );
        }
        tracing::info!("notification channel closed, email notifier stopping");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::OrderId;

    #[tokio::test]
    async fn publish_is_acknowledged_before_consumption() {
        let (publisher, mut rx) = notification_channel();
        let event = OrderCreated {
            order_id: OrderId::new(),
            customer_name: "Alice".to_string(),
            order_item_count: 1,
        };

        // Acknowledged with no consumer running yet.
        publisher.publish("order-created", &event).await.unwrap();

        let (topic, received) = rx.recv().await.unwrap();
        assert_eq!(topic, "order-created");
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn publish_after_consumer_drop_is_surfaced() {
        let (publisher, rx) = notification_channel();
        drop(rx);

        let event = OrderCreated {
            order_id: OrderId::new(),
            customer_name: "Alice".to_string(),
            order_item_count: 1,
        };
        let result = publisher.publish("order-created", &event).await;
        assert!(matches!(result, Err(PublishError::ChannelClosed)));
    }

    #[tokio::test]
    async fn notifier_drains_the_channel_and_stops() {
        let (publisher, rx) = notification_channel();
        let handle = spawn_email_notifier(rx);

        let event = OrderCreated {
            order_id: OrderId::new(),
            customer_name: "Alice".to_string(),
            order_item_count: 3,
        };
        publisher.publish("order-created", &event).await.unwrap();

        drop(publisher);
        handle.await.unwrap();
    }
}
