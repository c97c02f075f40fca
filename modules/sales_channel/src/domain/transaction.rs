//! Transactional scopes and the unit-of-work runner
//!
//! Storage adapters implement [`TransactionRunner`] and [`StorageTransaction`];
//! the domain only sees a [`TxScope`], which repositories and the event
//! publisher receive on every call.

use crate::contract::{SalesChannelError, StoreError, StoreErrorCode};
use async_trait::async_trait;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Notify;
use uuid::Uuid;

/// An open storage transaction
#[async_trait]
pub trait StorageTransaction: Send + Sync {
    /// Commit all work issued in this transaction
    async fn commit(&self) -> Result<(), StoreError>;

    /// Discard all work issued in this transaction
    async fn rollback(&self) -> Result<(), StoreError>;

    /// Lets the owning storage adapter recover its concrete transaction type
    fn as_any(&self) -> &dyn Any;
}

/// Opens storage transactions
#[async_trait]
pub trait TransactionRunner: Send + Sync {
    async fn begin(&self) -> Result<Arc<dyn StorageTransaction>, StoreError>;
}

/// Handle to an open transaction, shared by every collaborator taking part in it
#[derive(Clone)]
pub struct TxScope {
    id: Uuid,
    storage: Arc<dyn StorageTransaction>,
}

impl TxScope {
    pub fn new(storage: Arc<dyn StorageTransaction>) -> Self {
        Self {
            id: Uuid::new_v4(),
            storage,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn storage(&self) -> &dyn StorageTransaction {
        self.storage.as_ref()
    }
}

impl std::fmt::Debug for TxScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxScope").field("id", &self.id).finish()
    }
}

/// Hook translating a recognized storage error into a domain error.
/// Returning `None` lets the original error propagate.
pub type ErrorTranslator = fn(&StoreError) -> Option<SalesChannelError>;

/// Maps uniqueness conflicts to `Duplicate`
pub fn translate_duplicate(err: &StoreError) -> Option<SalesChannelError> {
    match err.code() {
        StoreErrorCode::UniqueViolation => Some(SalesChannelError::Duplicate {
            message: err.to_string(),
        }),
        _ => None,
    }
}

/// Runs units of work atomically
#[derive(Clone)]
pub struct UnitOfWork {
    runner: Arc<dyn TransactionRunner>,
    committed: Option<Arc<Notify>>,
}

impl UnitOfWork {
    pub fn new(runner: Arc<dyn TransactionRunner>) -> Self {
        Self {
            runner,
            committed: None,
        }
    }

    /// Signal `notify` after every transaction this runner commits
    pub fn with_commit_notifier(mut self, notify: Arc<Notify>) -> Self {
        self.committed = Some(notify);
        self
    }

    /// Open a scope owned by the caller. The caller must `commit` or `rollback` it.
    pub async fn begin(&self) -> Result<TxScope, StoreError> {
        let scope = TxScope::new(self.runner.begin().await?);
        tracing::debug!(scope = %scope.id(), "transaction started");
        Ok(scope)
    }

    pub async fn commit(&self, scope: TxScope) -> Result<(), StoreError> {
        scope.storage().commit().await?;
        tracing::debug!(scope = %scope.id(), "transaction committed");
        if let Some(notify) = &self.committed {
            notify.notify_one();
        }
        Ok(())
    }

    pub async fn rollback(&self, scope: TxScope) -> Result<(), StoreError> {
        scope.storage().rollback().await?;
        tracing::debug!(scope = %scope.id(), "transaction rolled back");
        Ok(())
    }

    /// Run `work` atomically.
    ///
    /// With a `parent` scope the work joins it and the parent's owner decides
    /// the outcome. Otherwise a new transaction is opened, committed when the
    /// work succeeds and rolled back when it (or the commit) fails.
    ///
    /// Storage errors are offered to `on_error`; a returned domain error
    /// replaces the original one.
    pub async fn run<T, F, Fut>(
        &self,
        parent: Option<&TxScope>,
        work: F,
        on_error: Option<ErrorTranslator>,
    ) -> Result<T, SalesChannelError>
    where
        F: FnOnce(TxScope) -> Fut,
        Fut: Future<Output = Result<T, SalesChannelError>>,
    {
        let result = match parent {
            Some(scope) => work(scope.clone()).await,
            None => self.run_owned(work).await,
        };

        result.map_err(|err| translate(err, on_error))
    }

    async fn run_owned<T, F, Fut>(&self, work: F) -> Result<T, SalesChannelError>
    where
        F: FnOnce(TxScope) -> Fut,
        Fut: Future<Output = Result<T, SalesChannelError>>,
    {
        let scope = self.begin().await?;

        match work(scope.clone()).await {
            Ok(value) => {
                self.commit(scope).await?;
                Ok(value)
            }
            Err(err) => {
                let scope_id = scope.id();
                if let Err(rollback_err) = self.rollback(scope).await {
                    tracing::warn!(
                        scope = %scope_id,
                        error = %rollback_err,
                        "rollback failed after unit of work error"
                    );
                }
                Err(err)
            }
        }
    }
}

fn translate(err: SalesChannelError, on_error: Option<ErrorTranslator>) -> SalesChannelError {
    match (err, on_error) {
        (SalesChannelError::Storage(store), Some(hook)) => match hook(&store) {
            Some(domain) => {
                tracing::debug!(error = %store, "storage error translated to {}", domain.kind());
                domain
            }
            None => SalesChannelError::Storage(store),
        },
        (err, _) => err,
    }
}
