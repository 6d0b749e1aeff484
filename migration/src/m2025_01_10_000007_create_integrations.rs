//! Migration to create the integrations table.
//!
//! Global catalog, not merchant-owned: readable by anyone, writable by admins.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Integrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Integrations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Integrations::Name).text().not_null())
                    .col(ColumnDef::new(Integrations::Description).text().null())
                    .col(ColumnDef::new(Integrations::LogoUrl).text().null())
                    .col(ColumnDef::new(Integrations::Category).text().null())
                    .col(
                        ColumnDef::new(Integrations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Integrations::Config).json_binary().null())
                    .col(
                        ColumnDef::new(Integrations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Integrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Integrations {
    Table,
    Id,
    Name,
    Description,
    LogoUrl,
    Category,
    IsActive,
    Config,
    CreatedAt,
}
