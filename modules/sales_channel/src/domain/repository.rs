//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use super::query::SalesChannelQuery;
use super::transaction::TxScope;
use crate::contract::{CreateSalesChannelInput, SalesChannel, StoreError};
use async_trait::async_trait;

/// Repository for sales channels. Every call runs inside the given scope.
#[async_trait]
pub trait SalesChannelRepository: Send + Sync {
    /// Find the first sales channel matching the query
    async fn find_one(
        &self,
        scope: &TxScope,
        query: &SalesChannelQuery,
    ) -> Result<Option<SalesChannel>, StoreError>;

    /// Find a page of sales channels and the total number of matches ignoring paging
    async fn find_and_count(
        &self,
        scope: &TxScope,
        query: &SalesChannelQuery,
    ) -> Result<(Vec<SalesChannel>, u64), StoreError>;

    /// Instantiate an unsaved sales channel with a fresh id
    fn create(&self, input: CreateSalesChannelInput) -> SalesChannel;

    /// Insert or update a sales channel by id.
    /// Uniqueness conflicts surface as [`StoreError::UniqueViolation`].
    async fn save(&self, scope: &TxScope, channel: &SalesChannel)
        -> Result<SalesChannel, StoreError>;

    /// Mark a live sales channel as deleted. Returns `false` if there was none.
    async fn soft_delete(&self, scope: &TxScope, id: &str) -> Result<bool, StoreError>;
}

/// Generate a prefixed entity id, e.g. `sc_4f0c...`
pub fn generate_entity_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
