//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, login_handler, my_links_handler, register_handler, shorten_handler,
    stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Link management routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /shorten`      - Create a short link (idempotent per owner+URL)
/// - `GET    /my`           - List the caller's links, newest first
/// - `DELETE /{id}`         - Permanently delete a link
/// - `GET    /{id}/stats`   - Click statistics snapshot for a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/my", get(my_links_handler))
        .route("/{id}", delete(delete_link_handler))
        .route("/{id}/stats", get(stats_handler))
}

/// Public authentication routes.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login`    - Exchange credentials for a bearer token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}
