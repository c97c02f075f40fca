//! Common test utilities: in-memory database setup and event draining

#![allow(dead_code)]

use sales_channel::domain::EventMessage;
use sales_channel::{Config, SalesChannelModule};
use std::sync::Arc;
use tokio::sync::broadcast;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Module over a fresh, migrated in-memory SQLite database
pub async fn setup(config: Config) -> Arc<SalesChannelModule> {
    init_tracing();
    let module = SalesChannelModule::connect("sqlite::memory:", config)
        .await
        .unwrap();
    module.migrate().await.unwrap();
    Arc::new(module)
}

/// Module with every optional operation enabled
pub async fn setup_all_features() -> Arc<SalesChannelModule> {
    setup(Config::with_all_features()).await
}

/// Run the relay once and collect everything subscribers received
pub async fn deliver_events(
    module: &SalesChannelModule,
    rx: &mut broadcast::Receiver<EventMessage>,
) -> Vec<EventMessage> {
    module.relay().dispatch_pending().await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Only the events with the given name
pub fn named<'a>(events: &'a [EventMessage], name: &str) -> Vec<&'a EventMessage> {
    events.iter().filter(|e| e.name == name).collect()
}
