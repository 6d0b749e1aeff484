//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the gateway API.

use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;
use crate::models::ServiceInfo;

pub mod api_keys;
pub mod auth;
pub mod integrations;
pub mod kyc;
pub mod merchant_integrations;
pub mod merchants;
pub mod payment_links;
pub mod payments;
pub mod subscriptions;
pub mod transactions;
pub mod users;

/// JSON extractor/response that answers malformed bodies with the standard
/// problem+json error shape instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}
