//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in [`crate::infrastructure::persistence`]. Mock implementations are
//! auto-generated via `mockall` for service unit tests.

pub mod account_repository;
pub mod link_repository;

pub use account_repository::AccountRepository;
pub use link_repository::{InsertOutcome, LinkRepository};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
