//! Migration to create the payment_links table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentLinks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentLinks::MerchantId).uuid().not_null())
                    .col(ColumnDef::new(PaymentLinks::Title).text().not_null())
                    .col(ColumnDef::new(PaymentLinks::Description).text().null())
                    .col(ColumnDef::new(PaymentLinks::Amount).big_integer().null())
                    .col(
                        ColumnDef::new(PaymentLinks::Currency)
                            .text()
                            .not_null()
                            .default("USD"),
                    )
                    .col(
                        ColumnDef::new(PaymentLinks::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PaymentLinks::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PaymentLinks::Metadata)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PaymentLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_links_merchant_id")
                            .from(PaymentLinks::Table, PaymentLinks::MerchantId)
                            .to(Merchants::Table, Merchants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_links_merchant_id")
                    .table(PaymentLinks::Table)
                    .col(PaymentLinks::MerchantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_payment_links_merchant_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentLinks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PaymentLinks {
    Table,
    Id,
    MerchantId,
    Title,
    Description,
    Amount,
    Currency,
    IsActive,
    ExpiresAt,
    Metadata,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Merchants {
    Table,
    Id,
}
