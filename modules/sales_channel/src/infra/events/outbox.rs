//! Transactional outbox
//!
//! [`OutboxEventPublisher`] writes emitted events to the `staged_event` table
//! inside the caller's transaction, so an event exists only if that
//! transaction commits. [`OutboxRelay`] later hands committed events to an
//! [`EventSink`] and removes them once delivered (at-least-once).

use crate::contract::StoreError;
use crate::domain::{EventMessage, EventPublisher, EventSink, TxScope};
use crate::infra::storage::entity::staged_event;
use crate::infra::storage::mapper::map_db_err;
use crate::infra::storage::SeaOrmTransaction;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

// ===== Publisher =====

#[derive(Default)]
pub struct OutboxEventPublisher;

impl OutboxEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for OutboxEventPublisher {
    async fn emit(&self, scope: &TxScope, event: &EventMessage) -> Result<(), StoreError> {
        let txn = SeaOrmTransaction::from_scope(scope)?;
        let conn = txn.connection().await?;

        let active: staged_event::ActiveModel = event.into();
        staged_event::Entity::insert(active)
            .exec_without_returning(&*conn)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            scope = %scope.id(),
            event = %event.name,
            event_id = %event.id,
            "event staged"
        );
        Ok(())
    }
}

// ===== Relay =====

/// Delivers committed outbox events to a sink
pub struct OutboxRelay {
    db: Arc<DatabaseConnection>,
    sink: Arc<dyn EventSink>,
    batch_size: u64,
    poll_interval: Duration,
    wake: Arc<Notify>,
}

impl OutboxRelay {
    pub fn new(
        db: Arc<DatabaseConnection>,
        sink: Arc<dyn EventSink>,
        batch_size: u64,
        poll_interval: Duration,
    ) -> Self {
        Self {
            db,
            sink,
            batch_size,
            poll_interval,
            wake: Arc::new(Notify::new()),
        }
    }

    /// Notifier that wakes the relay early, signalled after each commit
    pub fn waker(&self) -> Arc<Notify> {
        self.wake.clone()
    }

    /// Deliver up to one batch of staged events, oldest first.
    ///
    /// Stops at the first delivery failure so ordering is kept; the failed
    /// event stays staged for the next pass. Returns the number delivered.
    pub async fn dispatch_pending(&self) -> Result<usize> {
        let staged = staged_event::Entity::find()
            .order_by_asc(staged_event::Column::CreatedAt)
            .order_by_asc(staged_event::Column::Id)
            .limit(self.batch_size)
            .all(&*self.db)
            .await?;

        let mut delivered = 0;
        for row in staged {
            let message: EventMessage = row.into();

            if let Err(e) = self.sink.deliver(&message).await {
                tracing::warn!(
                    event = %message.name,
                    event_id = %message.id,
                    error = %e,
                    "event delivery failed, will retry"
                );
                break;
            }

            staged_event::Entity::delete_by_id(message.id)
                .exec(&*self.db)
                .await?;
            delivered += 1;
        }

        if delivered > 0 {
            tracing::debug!(delivered, "outbox events delivered");
        }
        Ok(delivered)
    }

    /// Number of events waiting for delivery
    pub async fn pending(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;
        Ok(staged_event::Entity::find().count(&*self.db).await?)
    }

    /// Poll and deliver until `cancel` fires
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) -> Result<()> {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval = ?self.poll_interval, "outbox relay started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
                _ = self.wake.notified() => {}
            }

            if let Err(e) = self.dispatch_pending().await {
                tracing::warn!(error = %e, "outbox dispatch failed");
            }
        }

        tracing::info!("outbox relay stopped");
        Ok(())
    }
}
