//! DTOs for account registration and login.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request to log in with existing credentials.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login response carrying the bearer token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: AccountInfo,
}

/// Public view of an account (no password hash).
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    pub id: i64,
    pub email: String,
}
