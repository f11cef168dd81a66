//! Handler for the URL shortening endpoint.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::{DedupResponse, ShortenRequest};
use crate::api::middleware::CurrentAccount;
use crate::application::services::ShortenOutcome;
use crate::domain::entities::CreateLinkInput;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/url/shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/a", "expiresAt": "2027-01-01T00:00:00Z" }
/// ```
///
/// `expiresAt` is optional; links without it never expire.
///
/// # Responses
///
/// - **201 Created** with the new link when a link was created
/// - **200 OK** with `{ shortCode, message }` when the caller already
///   shortened this URL (dedup, not an error)
/// - **400 Bad Request** when `originalUrl` is missing or empty
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Response, AppError> {
    let input = CreateLinkInput::new(
        payload.original_url.unwrap_or_default(),
        payload.expires_at,
    )?;

    let outcome = state.link_service.create(current.0, input).await?;

    let response = match outcome {
        ShortenOutcome::Created(link) => {
            (StatusCode::CREATED, Json(LinkResponse::from(link))).into_response()
        }
        ShortenOutcome::Existing(link) => Json(DedupResponse {
            short_code: link.short_code,
            message: "URL already shortened",
        })
        .into_response(),
    };

    Ok(response)
}
