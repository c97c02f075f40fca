//! Service tests against mock collaborators, for failures a real database
//! does not produce on demand

use sales_channel::contract::*;
use sales_channel::domain::{Service, UnitOfWork};
use sales_channel::Config;
use std::sync::Arc;

mod common;

// Mock collaborator implementations for testing
pub mod mocks {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::RwLock;
    use sales_channel::domain::repository::generate_entity_id;
    use sales_channel::domain::{
        EventMessage, EventPublisher, SalesChannelQuery, SalesChannelRepository,
        StorageTransaction, TransactionRunner, TxScope,
    };
    use std::any::Any;
    use std::collections::HashMap;

    /// Shared record of transaction outcomes
    #[derive(Clone, Default)]
    pub struct TxLog {
        entries: Arc<RwLock<Vec<&'static str>>>,
    }

    impl TxLog {
        pub fn push(&self, entry: &'static str) {
            self.entries.write().push(entry);
        }

        pub fn entries(&self) -> Vec<&'static str> {
            self.entries.read().clone()
        }
    }

    pub struct MockTransaction {
        log: TxLog,
    }

    #[async_trait]
    impl StorageTransaction for MockTransaction {
        async fn commit(&self) -> Result<(), StoreError> {
            self.log.push("commit");
            Ok(())
        }

        async fn rollback(&self) -> Result<(), StoreError> {
            self.log.push("rollback");
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    pub struct MockRunner {
        pub log: TxLog,
    }

    #[async_trait]
    impl TransactionRunner for MockRunner {
        async fn begin(&self) -> Result<Arc<dyn StorageTransaction>, StoreError> {
            self.log.push("begin");
            Ok(Arc::new(MockTransaction {
                log: self.log.clone(),
            }))
        }
    }

    /// How the next `save` should fail, if at all
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub enum SaveFailure {
        None,
        Unique,
        ConnectionLost,
    }

    #[derive(Clone)]
    pub struct MockSalesChannelRepo {
        data: Arc<RwLock<HashMap<String, SalesChannel>>>,
        failure: Arc<RwLock<SaveFailure>>,
    }

    impl MockSalesChannelRepo {
        pub fn new() -> Self {
            Self {
                data: Arc::new(RwLock::new(HashMap::new())),
                failure: Arc::new(RwLock::new(SaveFailure::None)),
            }
        }

        pub fn fail_saves(&self, failure: SaveFailure) {
            *self.failure.write() = failure;
        }

        pub fn count(&self) -> usize {
            self.data.read().len()
        }
    }

    #[async_trait]
    impl SalesChannelRepository for MockSalesChannelRepo {
        async fn find_one(
            &self,
            _scope: &TxScope,
            query: &SalesChannelQuery,
        ) -> Result<Option<SalesChannel>, StoreError> {
            let data = self.data.read();
            let found = query
                .selector
                .ids
                .iter()
                .flatten()
                .find_map(|id| data.get(id))
                .filter(|c| query.with_deleted || c.deleted_at.is_none())
                .cloned();
            Ok(found)
        }

        async fn find_and_count(
            &self,
            _scope: &TxScope,
            _query: &SalesChannelQuery,
        ) -> Result<(Vec<SalesChannel>, u64), StoreError> {
            let items: Vec<SalesChannel> = self.data.read().values().cloned().collect();
            let total = items.len() as u64;
            Ok((items, total))
        }

        fn create(&self, input: CreateSalesChannelInput) -> SalesChannel {
            let now = chrono::Utc::now();
            SalesChannel {
                id: generate_entity_id("sc"),
                name: input.name,
                description: input.description,
                active: input.active,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            }
        }

        async fn save(
            &self,
            _scope: &TxScope,
            channel: &SalesChannel,
        ) -> Result<SalesChannel, StoreError> {
            match *self.failure.read() {
                SaveFailure::Unique => {
                    return Err(StoreError::UniqueViolation(
                        "sales_channel.name".to_string(),
                    ))
                }
                SaveFailure::ConnectionLost => {
                    return Err(StoreError::Database(anyhow::anyhow!("connection lost")))
                }
                SaveFailure::None => {}
            }
            self.data
                .write()
                .insert(channel.id.clone(), channel.clone());
            Ok(channel.clone())
        }

        async fn soft_delete(&self, _scope: &TxScope, id: &str) -> Result<bool, StoreError> {
            let mut data = self.data.write();
            match data.get_mut(id) {
                Some(channel) if channel.deleted_at.is_none() => {
                    channel.deleted_at = Some(chrono::Utc::now());
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    #[derive(Clone, Default)]
    pub struct MockPublisher {
        emitted: Arc<RwLock<Vec<EventMessage>>>,
        fail: Arc<RwLock<bool>>,
    }

    impl MockPublisher {
        pub fn fail_emits(&self) {
            *self.fail.write() = true;
        }

        pub fn emitted(&self) -> Vec<EventMessage> {
            self.emitted.read().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockPublisher {
        async fn emit(&self, _scope: &TxScope, event: &EventMessage) -> Result<(), StoreError> {
            if *self.fail.read() {
                return Err(StoreError::Database(anyhow::anyhow!("event bus unavailable")));
            }
            self.emitted.write().push(event.clone());
            Ok(())
        }
    }
}

use mocks::{MockPublisher, MockRunner, MockSalesChannelRepo, SaveFailure, TxLog};

struct Fixture {
    service: Service,
    repo: MockSalesChannelRepo,
    publisher: MockPublisher,
    log: TxLog,
}

fn fixture(config: Config) -> Fixture {
    common::init_tracing();
    let repo = MockSalesChannelRepo::new();
    let publisher = MockPublisher::default();
    let log = TxLog::default();
    let uow = UnitOfWork::new(Arc::new(MockRunner { log: log.clone() }));
    let service = Service::new(
        Arc::new(repo.clone()),
        Arc::new(publisher.clone()),
        uow,
        config,
    );
    Fixture {
        service,
        repo,
        publisher,
        log,
    }
}

#[tokio::test]
async fn test_unique_violation_becomes_duplicate_error() {
    let f = fixture(Config::default());
    f.repo.fail_saves(SaveFailure::Unique);

    let err = f
        .service
        .create(CreateSalesChannelInput::new("Web"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateError);
    assert_eq!(f.log.entries(), vec!["begin", "rollback"]);
    assert!(f.publisher.emitted().is_empty());
}

#[tokio::test]
async fn test_other_storage_errors_pass_through_untranslated() {
    let f = fixture(Config::default());
    f.repo.fail_saves(SaveFailure::ConnectionLost);

    let err = f
        .service
        .create(CreateSalesChannelInput::new("Web"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DbError);
    match err {
        SalesChannelError::Storage(StoreError::Database(source)) => {
            assert_eq!(source.to_string(), "connection lost");
        }
        other => panic!("Expected untranslated storage error, got {other:?}"),
    }
    assert_eq!(f.log.entries(), vec!["begin", "rollback"]);
}

#[tokio::test]
async fn test_publish_failure_aborts_update() {
    let f = fixture(Config::default());
    let created = f
        .service
        .create(CreateSalesChannelInput::new("Web"))
        .await
        .unwrap();
    f.publisher.fail_emits();

    let err = f
        .service
        .update(&created.id, UpdateSalesChannelInput::default().active(Some(true)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DbError);
    assert_eq!(
        f.log.entries(),
        vec!["begin", "commit", "begin", "rollback"]
    );
}

#[tokio::test]
async fn test_update_runs_in_one_transaction_and_emits_once() {
    let f = fixture(Config::default());
    let created = f
        .service
        .create(CreateSalesChannelInput::new("Web"))
        .await
        .unwrap();

    let updated = f
        .service
        .update(&created.id, UpdateSalesChannelInput::default().active(Some(true)))
        .await
        .unwrap();

    assert_eq!(updated.active, Some(true));
    assert_eq!(f.log.entries(), vec!["begin", "commit", "begin", "commit"]);

    let emitted = f.publisher.emitted();
    let updates: Vec<_> = emitted
        .iter()
        .filter(|e| e.name == "sales_channel.updated")
        .collect();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].payload, serde_json::json!({ "id": created.id }));
}

#[tokio::test]
async fn test_not_found_update_rolls_back() {
    let f = fixture(Config::default());

    let err = f
        .service
        .update("sc_missing", UpdateSalesChannelInput::default().name("POS"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(f.log.entries(), vec!["begin", "rollback"]);
    assert_eq!(f.repo.count(), 0);
}

#[tokio::test]
async fn test_delete_of_missing_channel_emits_nothing() {
    let f = fixture(Config::with_all_features());

    f.service.delete("sc_missing").await.unwrap();

    assert!(f.publisher.emitted().is_empty());
    assert_eq!(f.log.entries(), vec!["begin", "commit"]);
}

#[tokio::test]
async fn test_disabled_operations_do_not_open_transactions() {
    let f = fixture(Config::default());

    let err = f.service.delete("sc_1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);

    let err = f
        .service
        .list_and_count(SalesChannelSelector::default(), FindConfig::list_default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);

    assert!(f.log.entries().is_empty());
}
