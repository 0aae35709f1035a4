// Router HTTP API implementation
// This file provides HTTP endpoints for route quotes and rail listing
//
// Numan Thabit 2025 Nov

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::errors::RouteError;
use crate::format::{FormattedRoute, RouteFormatter};
use crate::metrics;
use crate::offers::Offer;
use crate::router::{list_banks, RouteOptimizer, RouteResult};

/// Shared state behind every handler
#[derive(Debug, Clone)]
pub struct ApiState {
    pub optimizer: RouteOptimizer,
    pub formatter: RouteFormatter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub offers: Vec<Offer>,
    pub target_amount: f64,
    pub max_offers_per_route: Option<usize>,
    pub bank: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    #[serde(flatten)]
    pub result: RouteResult,
    pub formatted: FormattedRoute,
}

#[derive(Debug, Deserialize)]
pub struct BanksRequest {
    pub offers: Vec<Offer>,
}

#[derive(Debug, Serialize)]
pub struct BanksResponse {
    pub banks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Handler errors rendered as JSON
#[derive(Debug)]
pub enum ApiError {
    Route(RouteError),
    /// The optimization task panicked or was cancelled
    Internal(String),
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        Self::Route(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Route(err) => {
                let status = if err.is_precondition() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                };
                (
                    status,
                    ErrorResponse {
                        error: err.to_string(),
                        code: err.kind(),
                    },
                )
            }
            ApiError::Internal(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error,
                    code: "internal",
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the HTTP router with API endpoints
pub fn create_api_router(state: Arc<ApiState>) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_text))
        .route("/api/v1/route", post(quote_route))
        .route("/api/v1/banks", post(banks))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn metrics_text() -> String {
    metrics::render()
}

async fn quote_route(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let max_offers = req
        .max_offers_per_route
        .unwrap_or(state.optimizer.config().max_offers_per_route);
    // subset enumeration is CPU-bound; keep it off the async workers
    let worker = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        worker.optimizer.compute_best_route(
            &req.offers,
            req.target_amount,
            max_offers,
            req.bank.as_deref(),
        )
    })
    .await
    .map_err(|err| ApiError::Internal(format!("route task failed: {err}")))??;
    let formatted = state.formatter.format_route(result.best_route());
    Ok(Json(RouteResponse { result, formatted }))
}

async fn banks(Json(req): Json<BanksRequest>) -> Json<BanksResponse> {
    Json(BanksResponse {
        banks: list_banks(&req.offers),
    })
}
