//! Domain layer containing business entities, errors and storage contracts.
//!
//! The domain layer has no dependencies on the HTTP or persistence layers.
//! Business rules that coordinate repository calls live in
//! [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`errors`] - Domain failure kinds ([`errors::AliasError`]) and storage failures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod errors;
pub mod repositories;
