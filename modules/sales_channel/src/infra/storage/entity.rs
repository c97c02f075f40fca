//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Sales channel table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sales_channel")]
pub struct Model {
    /// Prefixed identifier (`sc_...`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name, unique among channels that are not deleted
    pub name: String,

    pub description: Option<String>,

    /// Lowercased `name` used by substring search
    pub name_search: String,

    /// Lowercased `description` used by substring search
    pub description_search: Option<String>,

    pub active: Option<bool>,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,

    /// Soft delete timestamp
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Transactional outbox of emitted events awaiting delivery
pub mod staged_event {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "staged_event")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Event name, e.g. `sales_channel.updated`
        pub event_name: String,

        pub payload: Json,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
