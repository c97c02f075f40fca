//! SeaORM repository implementations

use super::entity;
use super::mapper::{column, fold_case, map_db_err, order};
use super::transaction::SeaOrmTransaction;
use crate::contract::{CreateSalesChannelInput, SalesChannel, StoreError};
use crate::domain::repository::{generate_entity_id, SalesChannelRepository};
use crate::domain::{SalesChannelQuery, TxScope};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

/// Id prefix for sales channels
const ID_PREFIX: &str = "sc";

/// Escape character for LIKE patterns
const LIKE_ESCAPE: char = '\\';

/// LIKE pattern matching `q` as a literal, case-folded substring
fn contains_pattern(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in fold_case(q.trim()).chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains(q: &str) -> LikeExpr {
    LikeExpr::new(contains_pattern(q)).escape(LIKE_ESCAPE)
}

// ===== Sales Channel Repository =====

/// Sales channel repository. Connections come from the scope of each call.
#[derive(Default)]
pub struct SeaOrmSalesChannelRepository;

impl SeaOrmSalesChannelRepository {
    pub fn new() -> Self {
        Self
    }

    fn select(query: &SalesChannelQuery) -> Select<entity::Entity> {
        let selector = &query.selector;
        let mut select = entity::Entity::find();

        if let Some(ids) = &selector.ids {
            select = select.filter(entity::Column::Id.is_in(ids.iter().cloned()));
        }
        if let Some(name) = &selector.name {
            select = select.filter(entity::Column::Name.eq(name.as_str()));
        }
        if let Some(active) = selector.active {
            select = select.filter(entity::Column::Active.eq(active));
        }
        if let Some(q) = &selector.q {
            select = select.filter(
                Condition::any()
                    .add(entity::Column::NameSearch.like(contains(q)))
                    .add(entity::Column::DescriptionSearch.like(contains(q))),
            );
        }
        if !query.with_deleted {
            select = select.filter(entity::Column::DeletedAt.is_null());
        }

        for (field, direction) in &query.order {
            select = select.order_by(column(*field), order(*direction));
        }

        select
    }
}

#[async_trait]
impl SalesChannelRepository for SeaOrmSalesChannelRepository {
    async fn find_one(
        &self,
        scope: &TxScope,
        query: &SalesChannelQuery,
    ) -> Result<Option<SalesChannel>, StoreError> {
        let txn = SeaOrmTransaction::from_scope(scope)?;
        let conn = txn.connection().await?;

        let result = Self::select(query)
            .one(&*conn)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_and_count(
        &self,
        scope: &TxScope,
        query: &SalesChannelQuery,
    ) -> Result<(Vec<SalesChannel>, u64), StoreError> {
        let txn = SeaOrmTransaction::from_scope(scope)?;
        let conn = txn.connection().await?;

        let select = Self::select(query);
        let total = select.clone().count(&*conn).await.map_err(map_db_err)?;

        let mut page = select;
        if let Some(skip) = query.skip {
            page = page.offset(skip);
        }
        if let Some(take) = query.take {
            page = page.limit(take);
        }

        let results = page.all(&*conn).await.map_err(map_db_err)?;

        Ok((results.into_iter().map(Into::into).collect(), total))
    }

    fn create(&self, input: CreateSalesChannelInput) -> SalesChannel {
        let now = Utc::now();
        SalesChannel {
            id: generate_entity_id(ID_PREFIX),
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
        scope: &TxScope,
        channel: &SalesChannel,
    ) -> Result<SalesChannel, StoreError> {
        let txn = SeaOrmTransaction::from_scope(scope)?;
        let conn = txn.connection().await?;

        let existing = entity::Entity::find_by_id(channel.id.clone())
            .one(&*conn)
            .await
            .map_err(map_db_err)?;

        let mut active: entity::ActiveModel = channel.into();
        let result = if existing.is_some() {
            active.updated_at = Set(Utc::now());
            active.update(&*conn).await
        } else {
            active.insert(&*conn).await
        }
        .map_err(map_db_err)?;

        Ok(result.into())
    }

    async fn soft_delete(&self, scope: &TxScope, id: &str) -> Result<bool, StoreError> {
        let txn = SeaOrmTransaction::from_scope(scope)?;
        let conn = txn.connection().await?;
        let now = Utc::now();

        let result = entity::Entity::update_many()
            .col_expr(entity::Column::DeletedAt, Expr::value(now))
            .col_expr(entity::Column::UpdatedAt, Expr::value(now))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&*conn)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}
