//! Database migrations for the sales channel service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_sales_channel::Migration),
            Box::new(m20250301_000002_create_staged_event::Migration),
        ]
    }
}

mod m20250301_000001_create_sales_channel {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesChannel::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesChannel::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SalesChannel::Name).string().not_null())
                        .col(ColumnDef::new(SalesChannel::Description).text())
                        .col(ColumnDef::new(SalesChannel::NameSearch).string().not_null())
                        .col(ColumnDef::new(SalesChannel::DescriptionSearch).text())
                        .col(ColumnDef::new(SalesChannel::Active).boolean())
                        .col(
                            ColumnDef::new(SalesChannel::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(SalesChannel::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(SalesChannel::DeletedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            // Partial index: soft-deleted channels release their name.
            // Same syntax on PostgreSQL and SQLite.
            manager
                .get_connection()
                .execute_unprepared(
                    "CREATE UNIQUE INDEX IF NOT EXISTS idx_sales_channel_name_unique \
                     ON sales_channel (name) WHERE deleted_at IS NULL",
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_sales_channel_deleted_at")
                        .table(SalesChannel::Table)
                        .col(SalesChannel::DeletedAt)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesChannel::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SalesChannel {
        Table,
        Id,
        Name,
        Description,
        NameSearch,
        DescriptionSearch,
        Active,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20250301_000002_create_staged_event {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StagedEvent::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StagedEvent::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(StagedEvent::EventName).string().not_null())
                        .col(ColumnDef::new(StagedEvent::Payload).json().not_null())
                        .col(
                            ColumnDef::new(StagedEvent::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_staged_event_created_at")
                        .table(StagedEvent::Table)
                        .col(StagedEvent::CreatedAt)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StagedEvent::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StagedEvent {
        Table,
        Id,
        EventName,
        Payload,
        CreatedAt,
    }
}
