//! Acquisition endpoint handlers
//!
//! HTTP surface over the [`Acquirer`]:
//! - `/acquire?url=...` fetches through the strategy cascade
//! - `/acquire?content=...` ingests an encoded transfer payload
//! - `/health` liveness probe
//! - `/metrics` Prometheus text export
//!
//! When both `url` and `content` are supplied, `content` wins: a payload in
//! hand is strictly cheaper and more reliable than a refetch.

use crate::acquire::Acquirer;
use crate::article::FetchAttempt;
use crate::error::{AcquireError, FetchError};
use crate::metrics::global_metrics;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{instrument, warn};

/// Query parameters accepted by `/acquire`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcquireParams {
    /// Article URL to fetch through the cascade.
    pub url: Option<String>,
    /// Encoded transfer payload to ingest directly.
    pub content: Option<String>,
}

/// Error body returned on acquisition failure.
#[derive(Debug, Clone, Serialize)]
pub struct AcquireFailure {
    /// Human-readable failure description.
    pub error: String,
    /// Attempt log when the cascade was exhausted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<FetchAttempt>,
    /// Set when the caller's only remaining option is manual submission.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub manual_input_required: bool,
}

impl AcquireFailure {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            attempts: Vec::new(),
            manual_input_required: false,
        }
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" if the service responds.
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Build the service router.
pub fn router(acquirer: Arc<Acquirer>) -> Router {
    Router::new()
        .route("/acquire", get(acquire_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .with_state(acquirer)
}

#[instrument(skip(acquirer, params), fields(has_url = params.url.is_some(), has_content = params.content.is_some()))]
async fn acquire_handler(
    State(acquirer): State<Arc<Acquirer>>,
    Query(params): Query<AcquireParams>,
) -> Response {
    // Transfer payload takes precedence over a URL refetch.
    if let Some(content) = params.content.as_deref().filter(|c| !c.trim().is_empty()) {
        return match acquirer.acquire_from_transfer(content) {
            Ok(article) => (StatusCode::OK, Json(article)).into_response(),
            Err(e) => {
                warn!(error = %e, "transfer payload rejected");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(AcquireFailure::message(e.to_string())),
                )
                    .into_response()
            }
        };
    }

    let url = match params.url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => url,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AcquireFailure::message(AcquireError::MissingInput.to_string())),
            )
                .into_response();
        }
    };

    match acquirer.acquire_by_url(url).await {
        Ok((article, _attempts)) => (StatusCode::OK, Json(article)).into_response(),
        Err(AcquireError::Fetch(FetchError::InvalidUrl(detail))) => (
            StatusCode::BAD_REQUEST,
            Json(AcquireFailure::message(format!("invalid URL: {detail}"))),
        )
            .into_response(),
        Err(AcquireError::Fetch(FetchError::ExhaustedStrategies { attempts })) => {
            let failure = AcquireFailure {
                error: FetchError::ExhaustedStrategies {
                    attempts: attempts.clone(),
                }
                .to_string(),
                attempts,
                manual_input_required: true,
            };
            (StatusCode::BAD_GATEWAY, Json(failure)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AcquireFailure::message(e.to_string())),
        )
            .into_response(),
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

async fn metrics_handler() -> impl IntoResponse {
    (
        [("content-type", "text/plain; version=0.0.4")],
        global_metrics().to_prometheus_format(),
    )
}
