//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract/domain models, and from
//! SeaORM errors to storage errors

use super::entity::{self, staged_event};
use crate::contract::{SalesChannel, SalesChannelField, SortDirection, StoreError};
use crate::domain::EventMessage;
use sea_orm::sea_query::Order;
use sea_orm::{DbErr, SqlErr};

// ===== Sales Channel Conversions =====

impl From<entity::Model> for SalesChannel {
    fn from(entity: entity::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            deleted_at: entity.deleted_at,
        }
    }
}

impl From<&SalesChannel> for entity::ActiveModel {
    fn from(model: &SalesChannel) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            name_search: Set(fold_case(&model.name)),
            description_search: Set(model.description.as_deref().map(fold_case)),
            active: Set(model.active),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
            deleted_at: Set(model.deleted_at),
        }
    }
}

/// Case folding applied to searchable text and to search terms. Done here
/// rather than with SQL `lower()`, which SQLite only applies to ASCII.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

pub(crate) fn column(field: SalesChannelField) -> entity::Column {
    match field {
        SalesChannelField::Id => entity::Column::Id,
        SalesChannelField::Name => entity::Column::Name,
        SalesChannelField::CreatedAt => entity::Column::CreatedAt,
        SalesChannelField::UpdatedAt => entity::Column::UpdatedAt,
    }
}

pub(crate) fn order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

// ===== Staged Event Conversions =====

impl From<staged_event::Model> for EventMessage {
    fn from(entity: staged_event::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.event_name,
            payload: entity.payload,
            created_at: entity.created_at,
        }
    }
}

impl From<&EventMessage> for staged_event::ActiveModel {
    fn from(message: &EventMessage) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Set(message.id),
            event_name: Set(message.name.clone()),
            payload: Set(message.payload.clone()),
            created_at: Set(message.created_at),
        }
    }
}

// ===== Errors =====

/// Map a SeaORM error to a storage error, recognizing constraint violations
pub(crate) fn map_db_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::UniqueViolation(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            StoreError::ForeignKeyViolation(detail)
        }
        _ => StoreError::Database(err.into()),
    }
}
