//! # Data Models
//!
//! This module contains the SeaORM entity models used throughout the gateway API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api_key;
pub mod integration;
pub mod merchant;
pub mod merchant_integration;
pub mod payment_link;
pub mod subscription;
pub mod transaction;
pub mod user;

pub use api_key::Entity as ApiKey;
pub use integration::Entity as Integration;
pub use merchant::Entity as Merchant;
pub use merchant_integration::Entity as MerchantIntegration;
pub use payment_link::Entity as PaymentLink;
pub use subscription::Entity as Subscription;
pub use transaction::Entity as Transaction;
pub use user::Entity as User;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "merchant-gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
