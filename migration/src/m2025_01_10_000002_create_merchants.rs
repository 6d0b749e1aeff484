//! Migration to create the merchants table.
//!
//! Exactly one merchant profile per merchant-role user, enforced with a unique
//! index on user_id. The user FK is RESTRICT: a user with a merchant profile
//! cannot be deleted out from under it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Merchants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Merchants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Merchants::UserId).uuid().not_null())
                    .col(ColumnDef::new(Merchants::BusinessName).text().not_null())
                    .col(ColumnDef::new(Merchants::BusinessType).text().null())
                    .col(ColumnDef::new(Merchants::WebsiteUrl).text().null())
                    .col(
                        ColumnDef::new(Merchants::KycStatus)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Merchants::KycData).json_binary().null())
                    .col(
                        ColumnDef::new(Merchants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_merchants_user_id")
                            .from(Merchants::Table, Merchants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_merchants_user_id")
                    .table(Merchants::Table)
                    .col(Merchants::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_merchants_user_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Merchants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Merchants {
    Table,
    Id,
    UserId,
    BusinessName,
    BusinessType,
    WebsiteUrl,
    KycStatus,
    KycData,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
