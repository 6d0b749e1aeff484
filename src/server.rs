//! # Server Configuration
//!
//! This module contains the server setup and configuration for the gateway API.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::payments::{HttpPaymentProvider, PaymentProvider};
use crate::telemetry::trace_context_middleware;
use migration::Migrator;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
    pub payments: Arc<dyn PaymentProvider>,
}

impl AppState {
    /// Build state from loaded configuration and an open connection
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let payments = Arc::new(HttpPaymentProvider::new(
            config.payment_provider_base.clone(),
            config.payment_provider_secret.clone(),
        ));
        Self {
            config: Arc::new(config),
            db,
            payments,
        }
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/users/me", get(handlers::users::me))
        .route("/admin/users", get(handlers::users::list_users))
        .route("/admin/merchants", get(handlers::merchants::list_merchants))
        .route(
            "/admin/merchants/{id}",
            put(handlers::merchants::update_merchant),
        )
        .route("/merchants/me", get(handlers::merchants::me))
        .route("/kyc", post(handlers::kyc::submit))
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/transactions/{id}",
            patch(handlers::transactions::update_transaction),
        )
        .route(
            "/api-keys",
            get(handlers::api_keys::list_api_keys).post(handlers::api_keys::create_api_key),
        )
        .route("/api-keys/{id}", delete(handlers::api_keys::delete_api_key))
        .route(
            "/payment-links",
            get(handlers::payment_links::list_payment_links)
                .post(handlers::payment_links::create_payment_link),
        )
        .route(
            "/payment-links/{id}",
            put(handlers::payment_links::update_payment_link)
                .delete(handlers::payment_links::delete_payment_link),
        )
        .route(
            "/subscriptions",
            get(handlers::subscriptions::list_subscriptions)
                .post(handlers::subscriptions::create_subscription),
        )
        .route(
            "/subscriptions/{id}",
            put(handlers::subscriptions::update_subscription)
                .delete(handlers::subscriptions::delete_subscription),
        )
        .route(
            "/integrations",
            get(handlers::integrations::list_integrations)
                .post(handlers::integrations::create_integration),
        )
        .route(
            "/integrations/{id}",
            get(handlers::integrations::get_integration)
                .put(handlers::integrations::update_integration)
                .delete(handlers::integrations::delete_integration),
        )
        .route(
            "/merchant-integrations",
            get(handlers::merchant_integrations::list_merchant_integrations)
                .post(handlers::merchant_integrations::create_merchant_integration),
        )
        .route(
            "/create-payment-intent",
            post(handlers::payments::create_payment_intent),
        );

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api)
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = crate::db::init_pool(&config).await?;
    Migrator::up(&db, None).await?;

    // Resolve the configured bind address before touching the network
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let state = AppState::new(config, db);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::users::me,
        crate::handlers::users::list_users,
        crate::handlers::merchants::me,
        crate::handlers::merchants::list_merchants,
        crate::handlers::merchants::update_merchant,
        crate::handlers::kyc::submit,
        crate::handlers::transactions::list_transactions,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::update_transaction,
        crate::handlers::api_keys::list_api_keys,
        crate::handlers::api_keys::create_api_key,
        crate::handlers::api_keys::delete_api_key,
        crate::handlers::payment_links::list_payment_links,
        crate::handlers::payment_links::create_payment_link,
        crate::handlers::payment_links::update_payment_link,
        crate::handlers::payment_links::delete_payment_link,
        crate::handlers::subscriptions::list_subscriptions,
        crate::handlers::subscriptions::create_subscription,
        crate::handlers::subscriptions::update_subscription,
        crate::handlers::subscriptions::delete_subscription,
        crate::handlers::integrations::list_integrations,
        crate::handlers::integrations::get_integration,
        crate::handlers::integrations::create_integration,
        crate::handlers::integrations::update_integration,
        crate::handlers::integrations::delete_integration,
        crate::handlers::merchant_integrations::list_merchant_integrations,
        crate::handlers::merchant_integrations::create_merchant_integration,
        crate::handlers::payments::create_payment_intent,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::user::UserRole,
            crate::models::merchant::KycStatus,
            crate::models::merchant::Model,
            crate::models::transaction::TransactionStatus,
            crate::models::transaction::Model,
            crate::models::api_key::Model,
            crate::models::payment_link::Model,
            crate::models::subscription::PlanInterval,
            crate::models::subscription::Model,
            crate::models::integration::Model,
            crate::models::merchant_integration::Model,
            crate::handlers::auth::RegisterRequestDto,
            crate::handlers::auth::LoginRequestDto,
            crate::handlers::auth::UserDto,
            crate::handlers::auth::AuthResponseDto,
            crate::handlers::merchants::AdminUpdateMerchantDto,
            crate::handlers::kyc::SubmitKycDto,
            crate::handlers::transactions::CreateTransactionDto,
            crate::handlers::transactions::UpdateTransactionDto,
            crate::handlers::api_keys::CreateApiKeyDto,
            crate::handlers::api_keys::ApiKeySummaryDto,
            crate::handlers::payment_links::CreatePaymentLinkDto,
            crate::handlers::payment_links::UpdatePaymentLinkDto,
            crate::handlers::subscriptions::CreateSubscriptionDto,
            crate::handlers::subscriptions::UpdateSubscriptionDto,
            crate::handlers::integrations::CreateIntegrationDto,
            crate::handlers::integrations::UpdateIntegrationDto,
            crate::handlers::merchant_integrations::CreateMerchantIntegrationDto,
            crate::handlers::payments::CreatePaymentIntentDto,
            crate::payments::PaymentIntent,
            crate::error::ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Merchant Gateway API",
        description = "Authentication, merchant ownership and payment platform resources",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_serializes() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();

        assert!(json["paths"]["/api/integrations/{id}"]["get"].is_object());

        // Listed keys expose a preview, never the key value itself
        let summary = &json["components"]["schemas"]["ApiKeySummaryDto"]["properties"];
        assert!(summary["keyPreview"].is_object());
        assert!(summary.get("key").is_none());
    }
}
