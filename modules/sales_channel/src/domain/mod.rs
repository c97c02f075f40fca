//! Domain layer - business logic and services

pub mod events;
pub mod query;
pub mod repository;
pub mod service;
pub mod transaction;
pub mod validation;

pub use events::{EventMessage, EventPublisher, EventSink, SalesChannelEvent};
pub use query::{build_query, SalesChannelQuery};
pub use repository::SalesChannelRepository;
pub use service::Service;
pub use transaction::{
    translate_duplicate, ErrorTranslator, StorageTransaction, TransactionRunner, TxScope,
    UnitOfWork,
};
