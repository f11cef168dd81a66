//! Account registration, login and bearer token validation.
//!
//! Passwords are hashed with Argon2 (PHC string format) before storage.
//! Sessions are stateless HS256 JWTs carrying the account id as `sub`.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{Account, NewAccount};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

/// JWT claims carried by issued bearer tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id of the token subject.
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Service for account lifecycle and token issuance/validation.
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    jwt_secret: String,
    token_ttl_seconds: u64,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `jwt_secret` signs and verifies tokens; `token_ttl_seconds` controls
    /// how long issued tokens stay valid.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        jwt_secret: String,
        token_ttl_seconds: u64,
    ) -> Self {
        Self {
            accounts,
            jwt_secret,
            token_ttl_seconds,
        }
    }

    /// Registers a new account with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, email: &str, password: &str) -> Result<Account, AppError> {
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(
                "Account already exists",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_password(password)?;

        self.accounts
            .insert(NewAccount {
                email: email.to_string(),
                password_hash,
            })
            .await
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// Unknown emails and wrong passwords produce the same error so the
    /// response doesn't reveal which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Account), AppError> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &account.password_hash) {
            return Err(invalid_credentials());
        }

        let token = self.issue_token(account.id)?;

        Ok((token, account))
    }

    /// Issues a signed token for an account id.
    pub fn issue_token(&self, account_id: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: account_id.to_string(),
            exp: now + self.token_ttl_seconds as usize,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::internal("Failed to issue token", json!({ "reason": e.to_string() })))
    }

    /// Validates a bearer token and returns the account id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, expired,
    /// or signed with a different secret.
    pub fn verify_token(&self, token: &str) -> Result<i64, AppError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired token" }),
            )
        })?;

        data.claims.sub.parse().map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Malformed token subject" }))
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}

/// Hashes a password with Argon2 and a random salt.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
        })
}

/// Verifies a password against a stored PHC hash string.
///
/// A malformed stored hash verifies as false rather than erroring.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
