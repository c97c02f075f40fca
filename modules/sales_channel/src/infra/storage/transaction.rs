//! SeaORM-backed transaction runner

use super::mapper::map_db_err;
use crate::contract::StoreError;
use crate::domain::{StorageTransaction, TransactionRunner, TxScope};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

pub struct SeaOrmTransactionRunner {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTransactionRunner {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionRunner for SeaOrmTransactionRunner {
    async fn begin(&self) -> Result<Arc<dyn StorageTransaction>, StoreError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Arc::new(SeaOrmTransaction {
            txn: Mutex::new(Some(txn)),
        }))
    }
}

/// An open SeaORM transaction. Taken out of the mutex on commit/rollback.
pub struct SeaOrmTransaction {
    txn: Mutex<Option<DatabaseTransaction>>,
}

impl SeaOrmTransaction {
    /// Recover the SeaORM transaction behind a scope
    pub fn from_scope(scope: &TxScope) -> Result<&Self, StoreError> {
        scope
            .storage()
            .as_any()
            .downcast_ref::<Self>()
            .ok_or_else(|| {
                StoreError::Database(anyhow::anyhow!(
                    "scope {} was not opened by the SeaORM transaction runner",
                    scope.id()
                ))
            })
    }

    /// Exclusive access to the live transaction connection
    pub async fn connection(&self) -> Result<MappedMutexGuard<'_, DatabaseTransaction>, StoreError> {
        MutexGuard::try_map(self.txn.lock().await, |txn| txn.as_mut())
            .map_err(|_| StoreError::TransactionClosed)
    }

    async fn take(&self) -> Result<DatabaseTransaction, StoreError> {
        self.txn.lock().await.take().ok_or(StoreError::TransactionClosed)
    }
}

#[async_trait]
impl StorageTransaction for SeaOrmTransaction {
    async fn commit(&self) -> Result<(), StoreError> {
        self.take().await?.commit().await.map_err(map_db_err)
    }

    async fn rollback(&self) -> Result<(), StoreError> {
        self.take().await?.rollback().await.map_err(map_db_err)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
