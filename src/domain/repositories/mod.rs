//! Repository trait definitions for the domain layer.
//!
//! These traits are the contracts the core needs from its storage
//! collaborator. Concrete implementations live in
//! `crate::infrastructure::persistence` (PostgreSQL) and
//! `crate::infrastructure::memory` (in-process).
//!
//! # Available Repositories
//!
//! - [`AliasRepository`] - The key registry: alias records and click counters
//! - [`UserRepository`] - Registered users and their password hashes
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.
//! See `tests/repository_pg.rs` for PostgreSQL-backed usage.

pub mod alias_repository;
pub mod user_repository;

pub use alias_repository::AliasRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use alias_repository::MockAliasRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
