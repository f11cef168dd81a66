//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Identity of the authenticated caller, attached to request extensions.
///
/// Handlers behind [`layer`] extract this via `Extension<CurrentAccount>` and
/// use it as the owner id for link operations.
#[derive(Debug, Clone, Copy)]
pub struct CurrentAccount(pub i64);

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Authentication Flow
///
/// 1. Extract token from the `Authorization: Bearer <token>` header
/// 2. Verify the JWT signature and expiry
/// 3. Attach [`CurrentAccount`] to the request extensions
/// 4. Continue to the next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or the
/// token is invalid or expired.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let account_id = st.auth_service.verify_token(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentAccount(account_id));

    Ok(next.run(req).await)
}
