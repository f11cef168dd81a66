//! Domain layer containing business entities and repository contracts.
//!
//! This layer has no dependencies on infrastructure or presentation code.
//! Repository traits defined here are implemented by the infrastructure layer;
//! business rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
