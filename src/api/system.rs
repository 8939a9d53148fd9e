//! System endpoints: status, health probes, and the destructive reseed.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SystemStatus};

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub database: bool,
}

/// `GET /api/system/status`
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let store = state.store();
    let videos = store.video_count().await?;
    let scripts = store.script_count().await?;
    let analytics_entries = store.analytics_count().await?;

    let config = state.shared.config.read().await;
    let missing_config = config.missing_credentials();
    let products = config.products.len();
    drop(config);

    let automation_running = state.automation.status().await.running;

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        videos,
        scripts,
        analytics_entries,
        products,
        automation_running,
        missing_config,
    })))
}

/// `POST /api/system/seed`
///
/// Destructive: clears all four tables and repopulates the sample set.
pub async fn seed_store(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let products = state.shared.config.read().await.products.clone();
    state.seeder.reseed(&products).await?;
    Ok(Json(ApiResponse::success(())))
}

/// `GET /api/system/health/live`
///
/// Lightweight liveness probe to indicate the API process is running.
pub async fn health_live() -> impl IntoResponse {
    Json(ApiResponse::success(HealthLiveResponse { status: "alive" }))
}

/// `GET /api/system/health/ready`
///
/// Readiness probe that checks database connectivity.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let db_ready = state.store().ping().await.is_ok();

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(HealthReadyResponse {
            ready: db_ready,
            database: db_ready,
        })),
    )
        .into_response()
}
