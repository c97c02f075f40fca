//! Domain events for the sales channel service
//!
//! Events are emitted inside the transaction that produced them and only
//! reach subscribers after that transaction commits:
//! - [`EventPublisher`] stages an event within a [`TxScope`]
//! - [`EventSink`] delivers committed events to subscribers

use super::transaction::TxScope;
use crate::contract::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types for sales channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalesChannelEvent {
    /// Sales channel was created
    Created { id: String },
    /// Sales channel was updated
    Updated { id: String },
    /// Sales channel was deleted (soft delete)
    Deleted { id: String },
}

impl SalesChannelEvent {
    pub const CREATED: &'static str = "sales_channel.created";
    pub const UPDATED: &'static str = "sales_channel.updated";
    pub const DELETED: &'static str = "sales_channel.deleted";

    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => Self::CREATED,
            Self::Updated { .. } => Self::UPDATED,
            Self::Deleted { .. } => Self::DELETED,
        }
    }

    pub fn sales_channel_id(&self) -> &str {
        match self {
            Self::Created { id } | Self::Updated { id } | Self::Deleted { id } => id,
        }
    }

    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({ "id": self.sales_channel_id() })
    }

    /// Wrap this event in a message ready to be staged
    pub fn to_message(&self) -> EventMessage {
        EventMessage::new(self.name(), self.payload())
    }
}

/// A named event with a JSON payload, as stored in the outbox and delivered
/// to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    /// Message identifier, stable across delivery attempts
    pub id: Uuid,
    /// Event name, e.g. `sales_channel.updated`
    pub name: String,
    /// Event payload
    pub payload: serde_json::Value,
    /// When the event was emitted
    pub created_at: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            payload,
            created_at: Utc::now(),
        }
    }
}

/// Emits events as part of a transaction.
///
/// An emitted event must become visible to subscribers only if the
/// transaction behind `scope` commits.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn emit(&self, scope: &TxScope, event: &EventMessage) -> Result<(), StoreError>;
}

/// Delivers committed events to subscribers
#[async_trait::async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(&self, event: &EventMessage) -> anyhow::Result<()>;
}
