//! Data Transfer Objects for request/response serialization.

pub mod auth;
pub mod link;
pub mod shorten;
pub mod stats;
