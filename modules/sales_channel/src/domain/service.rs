//! Domain service - business logic orchestration

use super::events::{EventPublisher, SalesChannelEvent};
use super::query::{build_query, resolve_paging};
use super::repository::SalesChannelRepository;
use super::transaction::{translate_duplicate, TxScope, UnitOfWork};
use super::validation;
use crate::config::{Config, FEATURE_DELETE, FEATURE_LIST};
use crate::contract::{
    CreateSalesChannelInput, FindConfig, SalesChannel, SalesChannelError, SalesChannelSelector,
    UpdateSalesChannelInput,
};
use std::sync::Arc;

/// Domain service for sales channel management.
///
/// Every operation runs in exactly one transactional scope: the one bound
/// with [`Service::with_transaction`], or a fresh one per call.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn SalesChannelRepository>,
    events: Arc<dyn EventPublisher>,
    uow: UnitOfWork,
    config: Arc<Config>,
    transaction: Option<TxScope>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repo: Arc<dyn SalesChannelRepository>,
        events: Arc<dyn EventPublisher>,
        uow: UnitOfWork,
        config: Config,
    ) -> Self {
        Self {
            repo,
            events,
            uow,
            config: Arc::new(config),
            transaction: None,
        }
    }

    /// A copy of this service whose operations join `scope` instead of
    /// opening their own transaction
    pub fn with_transaction(&self, scope: TxScope) -> Self {
        Self {
            transaction: Some(scope),
            ..self.clone()
        }
    }

    pub fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }

    /// Retrieve a sales channel by id
    #[tracing::instrument(skip(self, config))]
    pub async fn retrieve(
        &self,
        id: &str,
        config: FindConfig,
    ) -> Result<SalesChannel, SalesChannelError> {
        validation::validate_id(id)?;
        let query = build_query(SalesChannelSelector::by_id(id), config)?;

        self.uow
            .run(
                self.transaction.as_ref(),
                |scope| async move {
                    self.repo
                        .find_one(&scope, &query)
                        .await?
                        .ok_or_else(|| SalesChannelError::NotFound { id: id.to_string() })
                },
                None,
            )
            .await
    }

    /// List sales channels matching `selector`, returning the requested page
    /// and the total number of matches
    #[tracing::instrument(skip(self, selector, config))]
    pub async fn list_and_count(
        &self,
        selector: SalesChannelSelector,
        mut config: FindConfig,
    ) -> Result<(Vec<SalesChannel>, u64), SalesChannelError> {
        if !self.config.is_enabled(FEATURE_LIST) {
            return Err(SalesChannelError::NotImplemented {
                operation: "list_and_count",
            });
        }

        resolve_paging(
            &mut config,
            self.config.default_page_size,
            self.config.max_page_size,
        );
        let query = build_query(selector, config)?;

        self.uow
            .run(
                self.transaction.as_ref(),
                |scope| async move { Ok(self.repo.find_and_count(&scope, &query).await?) },
                None,
            )
            .await
    }

    /// Create a sales channel. A name collision fails with `Duplicate`.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(
        &self,
        input: CreateSalesChannelInput,
    ) -> Result<SalesChannel, SalesChannelError> {
        validation::validate_create(&input, self.config.max_name_length)?;

        let channel = self
            .uow
            .run(
                self.transaction.as_ref(),
                |scope| async move {
                    let channel = self.repo.create(input);
                    let saved = self.repo.save(&scope, &channel).await?;

                    let event = SalesChannelEvent::Created {
                        id: saved.id.clone(),
                    };
                    self.events.emit(&scope, &event.to_message()).await?;

                    Ok(saved)
                },
                Some(translate_duplicate),
            )
            .await?;

        tracing::info!(id = %channel.id, "sales channel created");
        Ok(channel)
    }

    /// Apply a partial update: only fields present in `input` are changed.
    /// Emits `sales_channel.updated` within the same transaction.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateSalesChannelInput,
    ) -> Result<SalesChannel, SalesChannelError> {
        validation::validate_update(&input, self.config.max_name_length)?;

        let channel = self
            .uow
            .run(
                self.transaction.as_ref(),
                |scope| async move {
                    let mut channel = self
                        .with_transaction(scope.clone())
                        .retrieve(id, FindConfig::default())
                        .await?;

                    input.apply_to(&mut channel);

                    let saved = self.repo.save(&scope, &channel).await?;

                    let event = SalesChannelEvent::Updated {
                        id: saved.id.clone(),
                    };
                    self.events.emit(&scope, &event.to_message()).await?;

                    Ok(saved)
                },
                Some(translate_duplicate),
            )
            .await?;

        tracing::info!(id = %channel.id, "sales channel updated");
        Ok(channel)
    }

    /// Soft delete a sales channel. Deleting a missing or already deleted
    /// channel succeeds without emitting an event.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), SalesChannelError> {
        if !self.config.is_enabled(FEATURE_DELETE) {
            return Err(SalesChannelError::NotImplemented {
                operation: "delete",
            });
        }
        validation::validate_id(id)?;

        let deleted = self
            .uow
            .run(
                self.transaction.as_ref(),
                |scope| async move {
                    let deleted = self.repo.soft_delete(&scope, id).await?;
                    if deleted {
                        let event = SalesChannelEvent::Deleted { id: id.to_string() };
                        self.events.emit(&scope, &event.to_message()).await?;
                    }
                    Ok(deleted)
                },
                None,
            )
            .await?;

        if deleted {
            tracing::info!(id, "sales channel deleted");
        } else {
            tracing::debug!(id, "sales channel already absent, nothing to delete");
        }
        Ok(())
    }
}
