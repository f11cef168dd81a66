//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation inputs
//! use separate structs (`NewLink`, `NewAccount`) following the "new type"
//! pattern; `CreateLinkInput` additionally validates at construction time.

pub mod account;
pub mod link;

pub use account::{Account, NewAccount};
pub use link::{CreateLinkInput, Link, NewLink};
