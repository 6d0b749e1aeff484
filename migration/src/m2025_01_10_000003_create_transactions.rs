//! Migration to create the transactions table.
//!
//! Amounts are stored in integer minor units (cents). Rows are never deleted;
//! only the status column is patched after creation.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::MerchantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Transactions::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Currency)
                            .text()
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(Transactions::Status).text().not_null())
                    .col(ColumnDef::new(Transactions::PaymentMethod).text().null())
                    .col(ColumnDef::new(Transactions::CustomerEmail).text().null())
                    .col(
                        ColumnDef::new(Transactions::Metadata)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_merchant_id")
                            .from(Transactions::Table, Transactions::MerchantId)
                            .to(Merchants::Table, Merchants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_merchant_id")
                    .table(Transactions::Table)
                    .col(Transactions::MerchantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_transactions_merchant_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    MerchantId,
    Amount,
    Currency,
    Status,
    PaymentMethod,
    CustomerEmail,
    Metadata,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Merchants {
    Table,
    Id,
}
