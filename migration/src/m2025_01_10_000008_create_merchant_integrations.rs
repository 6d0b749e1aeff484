//! Migration to create the merchant_integrations table.
//!
//! Join records linking a merchant to a catalog integration with per-merchant
//! configuration. One activation per (merchant, integration) pair.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MerchantIntegrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MerchantIntegrations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MerchantIntegrations::MerchantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MerchantIntegrations::IntegrationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MerchantIntegrations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(MerchantIntegrations::Config)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MerchantIntegrations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_merchant_integrations_merchant_id")
                            .from(
                                MerchantIntegrations::Table,
                                MerchantIntegrations::MerchantId,
                            )
                            .to(Merchants::Table, Merchants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_merchant_integrations_integration_id")
                            .from(
                                MerchantIntegrations::Table,
                                MerchantIntegrations::IntegrationId,
                            )
                            .to(Integrations::Table, Integrations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_merchant_integrations_merchant_integration")
                    .table(MerchantIntegrations::Table)
                    .col(MerchantIntegrations::MerchantId)
                    .col(MerchantIntegrations::IntegrationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_merchant_integrations_merchant_integration")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(MerchantIntegrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MerchantIntegrations {
    Table,
    Id,
    MerchantId,
    IntegrationId,
    IsActive,
    Config,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Merchants {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Integrations {
    Table,
    Id,
}
