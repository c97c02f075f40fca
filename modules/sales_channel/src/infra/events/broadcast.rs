//! In-process event fan-out over a tokio broadcast channel

use crate::domain::{EventMessage, EventSink};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Fans events out to every current subscriber.
///
/// Delivery succeeds once the event is queued on the channel. A receiver
/// more than `capacity` events behind gets `RecvError::Lagged` and misses the
/// overflowed events, which the relay has already removed from the outbox.
pub struct BroadcastEventSink {
    tx: broadcast::Sender<EventMessage>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventMessage> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventSink for BroadcastEventSink {
    async fn deliver(&self, event: &EventMessage) -> anyhow::Result<()> {
        // no subscribers is not a failure: the event is simply unobserved
        match self.tx.send(event.clone()) {
            Ok(receivers) => {
                tracing::trace!(event = %event.name, receivers, "event broadcast");
            }
            Err(_) => {
                tracing::trace!(event = %event.name, "event broadcast without subscribers");
            }
        }
        Ok(())
    }
}
