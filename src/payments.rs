//! # Payment Provider Client
//!
//! Trait seam in front of the external payment processor, plus the HTTP
//! implementation used in production. Handlers depend on the trait so tests
//! can swap in a stub or point the HTTP client at a mock server.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::{ApiError, provider_unavailable};

/// A payment intent created at the external provider
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// Provider-side identifier for the intent
    pub provider_ref: String,
    /// Client-side token used to confirm the payment
    pub client_token: String,
    /// Amount in minor currency units
    pub amount: i64,
    /// ISO-4217 currency code
    pub currency: String,
}

/// Errors from the payment provider seam
#[derive(Debug, Error)]
pub enum PaymentProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("provider response malformed: {0}")]
    Malformed(String),
}

impl From<PaymentProviderError> for ApiError {
    fn from(error: PaymentProviderError) -> Self {
        tracing::error!("Payment provider error: {:?}", error);
        provider_unavailable("Payment provider is unavailable")
    }
}

/// Seam for creating payment intents at the external processor
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for the given amount and currency
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentProviderError>;
}

#[derive(Debug, Deserialize)]
struct ProviderIntentResponse {
    id: String,
    client_secret: String,
}

/// HTTP implementation talking to a Stripe-shaped payment intents endpoint
pub struct HttpPaymentProvider {
    client: reqwest::Client,
    base_url: String,
    secret: Option<String>,
}

impl HttpPaymentProvider {
    /// Create a provider client against the given base URL
    pub fn new(base_url: String, secret: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret,
        }
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentProviderError> {
        let url = format!("{}/v1/payment_intents", self.base_url);

        let mut request = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .form(&[
                ("amount", amount.to_string()),
                ("currency", currency.to_lowercase()),
            ]);
        if let Some(secret) = &self.secret {
            request = request.header("Authorization", format!("Bearer {}", secret));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(PaymentProviderError::Status(response.status().as_u16()));
        }

        let body: ProviderIntentResponse = response
            .json()
            .await
            .map_err(|err| PaymentProviderError::Malformed(err.to_string()))?;

        Ok(PaymentIntent {
            provider_ref: body.id,
            client_token: body.client_secret,
            amount,
            currency: currency.to_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn creates_intent_against_mock_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(body_string_contains("amount=2500"))
            .and(body_string_contains("currency=usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pi_mock_123",
                "client_secret": "pi_mock_123_secret_abc"
            })))
            .mount(&server)
            .await;

        let provider = HttpPaymentProvider::new(server.uri(), Some("sk_test_key".to_string()));
        let intent = provider.create_payment_intent(2500, "USD").await.unwrap();

        assert_eq!(intent.provider_ref, "pi_mock_123");
        assert_eq!(intent.client_token, "pi_mock_123_secret_abc");
        assert_eq!(intent.amount, 2500);
        assert_eq!(intent.currency, "USD");
    }

    #[tokio::test]
    async fn provider_error_status_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = HttpPaymentProvider::new(server.uri(), None);
        let err = provider.create_payment_intent(100, "EUR").await.unwrap_err();
        assert!(matches!(err, PaymentProviderError::Status(500)));
    }

    #[tokio::test]
    async fn malformed_provider_body_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = HttpPaymentProvider::new(server.uri(), None);
        let err = provider.create_payment_intent(100, "EUR").await.unwrap_err();
        assert!(matches!(err, PaymentProviderError::Malformed(_)));
    }
}
