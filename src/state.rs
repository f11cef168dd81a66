//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

/// Application state holding the service layer.
///
/// Constructed once at startup in [`crate::server::run`] and cloned per
/// request by Axum; services are shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
}
