//! Handlers for account registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{AccountInfo, LoginRequest, LoginResponse, RegisterRequest};
use crate::api::dto::link::MessageResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 on invalid email or too-short password, 409 when the email is
/// already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    payload.validate()?;

    state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account registered successfully",
        }),
    ))
}

/// Verifies credentials and returns a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 on unknown email or wrong password (indistinguishably).
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let (token, account) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        account: AccountInfo {
            id: account.id,
            email: account.email,
        },
    }))
}
