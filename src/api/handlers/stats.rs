//! Handler for the per-link stats endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::api::middleware::CurrentAccount;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a point-in-time stats snapshot for one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/url/{id}/stats`
///
/// # Errors
///
/// Returns 404 if the link doesn't exist, 403 if the caller doesn't own it.
pub async fn stats_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.link_service.stats(current.0, id).await?;

    Ok(Json(StatsResponse::from(link)))
}
