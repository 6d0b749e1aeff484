//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM operations
//! for database entities, providing a clean API for data access with merchant-scoped methods.

pub mod api_key;
pub mod integration;
pub mod merchant;
pub mod merchant_integration;
pub mod payment_link;
pub mod subscription;
pub mod transaction;
pub mod user;

pub use api_key::ApiKeyRepository;
pub use integration::IntegrationRepository;
pub use merchant::MerchantRepository;
pub use merchant_integration::MerchantIntegrationRepository;
pub use payment_link::PaymentLinkRepository;
pub use subscription::SubscriptionRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
