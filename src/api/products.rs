use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::config::AffiliateProductConfig;

/// `GET /api/products`
///
/// The configured product list, verbatim. Not derived from the store.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AffiliateProductConfig>>>, ApiError> {
    Ok(Json(ApiResponse::success(
        state.stats.affiliate_products().to_vec(),
    )))
}
