//! Authentication and request processing middleware.

pub mod auth;
pub mod tracing;

pub use auth::CurrentAccount;
