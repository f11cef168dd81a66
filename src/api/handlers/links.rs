//! Handlers for link listing and deletion.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::link::{LinkResponse, MessageResponse};
use crate::api::middleware::CurrentAccount;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links, most recently created first.
///
/// # Endpoint
///
/// `GET /api/url/my`
pub async fn my_links_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_by_owner(current.0).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Permanently deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/url/{id}`
///
/// # Errors
///
/// Returns 404 if the link doesn't exist, 403 if the caller doesn't own it.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete(current.0, id).await?;

    Ok(Json(MessageResponse {
        message: "URL deleted successfully",
    }))
}
