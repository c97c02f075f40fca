//! Storage layer - database entities, repositories and transactions

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;
pub mod transaction;

pub use repositories::SeaOrmSalesChannelRepository;
pub use transaction::{SeaOrmTransaction, SeaOrmTransactionRunner};
