//! Event infrastructure - transactional outbox and delivery sinks

pub mod broadcast;
pub mod outbox;

pub use broadcast::BroadcastEventSink;
pub use outbox::{OutboxEventPublisher, OutboxRelay};
