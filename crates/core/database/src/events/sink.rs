use std::sync::Arc;

use futures::lock::Mutex;

use super::client::EventV1;

/// Capability for pushing events out to live sessions
///
/// Delivery is fire-and-forget: implementations swallow transport
/// failures so a flaky event pipe never fails the operation that
/// triggered the event.
#[async_trait]
pub trait Sink: Sync + Send {
    /// Deliver an event to every connection subscribed to a topic
    async fn publish(&self, topic: String, event: EventV1);
}

/// Redis pub/sub backed sink used in production
pub struct PubSub;

#[async_trait]
impl Sink for PubSub {
    async fn publish(&self, topic: String, event: EventV1) {
        if let Err(err) = redis_kiss::publish(topic.clone(), event).await {
            warn!("Failed to publish event to {topic}: {err:?}");
        }
    }
}

/// Sink that discards every event
pub struct Noop;

#[async_trait]
impl Sink for Noop {
    async fn publish(&self, _topic: String, _event: EventV1) {}
}

/// Sink that records events in memory, for assertions in tests
#[derive(Default, Clone)]
pub struct Memory {
    events: Arc<Mutex<Vec<(String, EventV1)>>>,
}

#[async_trait]
impl Sink for Memory {
    async fn publish(&self, topic: String, event: EventV1) {
        self.events.lock().await.push((topic, event));
    }
}

impl Memory {
    /// Events published to the given topic so far
    pub async fn on_topic(&self, topic: &str) -> Vec<EventV1> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Total number of published events
    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    /// Whether nothing has been published
    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}
