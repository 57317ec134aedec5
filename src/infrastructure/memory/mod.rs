//! In-memory repository implementations.
//!
//! Used by `STORAGE_BACKEND=memory` and by the integration tests. State is
//! lost when the process exits.

pub mod memory_alias_repository;
pub mod memory_user_repository;

pub use memory_alias_repository::InMemoryAliasRepository;
pub use memory_user_repository::InMemoryUserRepository;
