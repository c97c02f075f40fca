//! Native client implementation - direct function calls to the domain service

use crate::contract::{
    CreateSalesChannelInput, FindConfig, SalesChannel, SalesChannelApi, SalesChannelError,
    SalesChannelSelector, UpdateSalesChannelInput,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client for in-process calls. Every call runs in its own transaction.
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SalesChannelApi for NativeClient {
    async fn retrieve(
        &self,
        id: &str,
        config: FindConfig,
    ) -> Result<SalesChannel, SalesChannelError> {
        self.service.retrieve(id, config).await
    }

    async fn list_and_count(
        &self,
        selector: SalesChannelSelector,
        config: FindConfig,
    ) -> Result<(Vec<SalesChannel>, u64), SalesChannelError> {
        self.service.list_and_count(selector, config).await
    }

    async fn create(&self, input: CreateSalesChannelInput) -> Result<SalesChannel, SalesChannelError> {
        self.service.create(input).await
    }

    async fn update(
        &self,
        id: &str,
        input: UpdateSalesChannelInput,
    ) -> Result<SalesChannel, SalesChannelError> {
        self.service.update(id, input).await
    }

    async fn delete(&self, id: &str) -> Result<(), SalesChannelError> {
        self.service.delete(id).await
    }
}
