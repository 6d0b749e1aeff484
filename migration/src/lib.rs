//! Database migrations for the merchant gateway.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_01_10_000001_create_users;
mod m2025_01_10_000002_create_merchants;
mod m2025_01_10_000003_create_transactions;
mod m2025_01_10_000004_create_api_keys;
mod m2025_01_10_000005_create_payment_links;
mod m2025_01_10_000006_create_subscriptions;
mod m2025_01_10_000007_create_integrations;
mod m2025_01_10_000008_create_merchant_integrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_10_000001_create_users::Migration),
            Box::new(m2025_01_10_000002_create_merchants::Migration),
            Box::new(m2025_01_10_000003_create_transactions::Migration),
            Box::new(m2025_01_10_000004_create_api_keys::Migration),
            Box::new(m2025_01_10_000005_create_payment_links::Migration),
            Box::new(m2025_01_10_000006_create_subscriptions::Migration),
            Box::new(m2025_01_10_000007_create_integrations::Migration),
            Box::new(m2025_01_10_000008_create_merchant_integrations::Migration),
        ]
    }
}
