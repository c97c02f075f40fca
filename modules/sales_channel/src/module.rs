//! Module wiring and lifecycle

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::SalesChannelApi;
use crate::domain::{EventMessage, Service, UnitOfWork};
use crate::infra::events::{BroadcastEventSink, OutboxEventPublisher, OutboxRelay};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{SeaOrmSalesChannelRepository, SeaOrmTransactionRunner};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Capacity of the in-process event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Sales channel module: storage, service, native client and outbox relay
pub struct SalesChannelModule {
    config: Config,
    db: Arc<DatabaseConnection>,
    service: Arc<Service>,
    client: Arc<dyn SalesChannelApi>,
    sink: Arc<BroadcastEventSink>,
    relay: Arc<OutboxRelay>,
}

impl SalesChannelModule {
    /// Connect to `database_url` and build the module
    pub async fn connect(database_url: &str, config: Config) -> Result<Self> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options.sqlx_logging(false);
        if database_url.starts_with("sqlite::memory:") {
            // every pooled connection would otherwise see its own empty database
            options.max_connections(1).min_connections(1);
        }

        let db = Database::connect(options)
            .await
            .with_context(|| format!("failed to connect to {}", database_url))?;
        Ok(Self::init(config, db))
    }

    /// Build the module over an existing connection
    pub fn init(config: Config, db: DatabaseConnection) -> Self {
        let db = Arc::new(db);

        // Event delivery: staged in the outbox, relayed to in-process subscribers
        let sink = Arc::new(BroadcastEventSink::new(EVENT_CHANNEL_CAPACITY));
        let relay = Arc::new(OutboxRelay::new(
            db.clone(),
            sink.clone(),
            config.outbox_batch_size,
            config.outbox_poll_interval,
        ));

        let uow = UnitOfWork::new(Arc::new(SeaOrmTransactionRunner::new(db.clone())))
            .with_commit_notifier(relay.waker());

        let service = Arc::new(Service::new(
            Arc::new(SeaOrmSalesChannelRepository::new()),
            Arc::new(OutboxEventPublisher::new()),
            uow,
            config.clone(),
        ));

        let client: Arc<dyn SalesChannelApi> = Arc::new(NativeClient::new(service.clone()));

        tracing::info!(
            feature_flags = ?config.feature_flags,
            "sales channel module initialized"
        );

        Self {
            config,
            db,
            service,
            client,
            sink,
            relay,
        }
    }

    /// Apply pending database migrations
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&*self.db, None).await?;
        tracing::info!("sales channel migrations completed");
        Ok(())
    }

    /// Run the outbox relay until `cancel` fires
    pub async fn serve(self: Arc<Self>, cancel: CancellationToken) -> Result<()> {
        self.relay.clone().run(cancel).await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn SalesChannelApi> {
        self.client.clone()
    }

    pub fn relay(&self) -> Arc<OutboxRelay> {
        self.relay.clone()
    }

    /// Receive events after their transaction commits and the relay delivers them
    pub fn subscribe(&self) -> broadcast::Receiver<EventMessage> {
        self.sink.subscribe()
    }
}
