//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}` (public, no authentication)
///
/// # Click Accounting
///
/// The click counter is incremented atomically and persisted before the
/// redirect is returned, so every successful redirect is counted exactly
/// once. Expired and unknown codes do not count clicks.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let destination = state.link_service.resolve(&code).await?;

    debug!(code, destination, "Redirecting");

    Ok(Redirect::temporary(&destination))
}
