//! Sales Channel Service Module
//!
//! Transactional management of sales channels: the storefronts, marketplaces
//! and other contexts through which products and orders are exposed.
//! Changes publish domain events through a transactional outbox.

// Public exports
pub mod contract;
pub use contract::{
    client::SalesChannelApi, error::SalesChannelError, CreateSalesChannelInput, ErrorKind,
    FindConfig, SalesChannel, SalesChannelSelector, StoreError, UpdateSalesChannelInput,
};

pub mod module;
pub use module::SalesChannelModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
