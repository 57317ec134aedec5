//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements. Row decoding goes through `sqlx::FromRow` on the entities.
//!
//! # Repositories
//!
//! - [`PgAliasRepository`] - Short key storage, resolution and click counting
//! - [`PgUserRepository`] - User accounts

pub mod pg_alias_repository;
pub mod pg_user_repository;

pub use pg_alias_repository::PgAliasRepository;
pub use pg_user_repository::PgUserRepository;

use crate::domain::errors::RegistryError;

impl From<sqlx::Error> for RegistryError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error()
            && db_err.is_unique_violation()
        {
            return RegistryError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or_default().to_string(),
            };
        }

        RegistryError::Storage(e.to_string())
    }
}
