//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the
//! sales channel service. NO HTTP - direct function calls.

use super::{
    error::SalesChannelError,
    model::{
        CreateSalesChannelInput, FindConfig, SalesChannel, SalesChannelSelector,
        UpdateSalesChannelInput,
    },
};
use async_trait::async_trait;

/// Sales channel API for inter-module communication
#[async_trait]
pub trait SalesChannelApi: Send + Sync {
    /// Get a sales channel by id
    async fn retrieve(
        &self,
        id: &str,
        config: FindConfig,
    ) -> Result<SalesChannel, SalesChannelError>;

    /// List sales channels matching the selector, with the total count
    async fn list_and_count(
        &self,
        selector: SalesChannelSelector,
        config: FindConfig,
    ) -> Result<(Vec<SalesChannel>, u64), SalesChannelError>;

    /// Create a sales channel
    async fn create(&self, input: CreateSalesChannelInput) -> Result<SalesChannel, SalesChannelError>;

    /// Apply a partial update to a sales channel
    async fn update(
        &self,
        id: &str,
        input: UpdateSalesChannelInput,
    ) -> Result<SalesChannel, SalesChannelError>;

    /// Delete a sales channel
    async fn delete(&self, id: &str) -> Result<(), SalesChannelError>;
}
