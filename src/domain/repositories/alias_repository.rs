//! Key registry contract for alias records.

use crate::domain::entities::{AliasRecord, NewAliasRecord};
use crate::domain::errors::RegistryError;
use async_trait::async_trait;

/// Persistent store of alias records.
///
/// Implementations own all concurrency control. In particular the store must
/// enforce `short_key` uniqueness itself and perform [`increment_clicks`]
/// as a single atomic read-modify-write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAliasRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryAliasRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
///
/// [`increment_clicks`]: AliasRepository::increment_clicks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Inserts a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UniqueViolation`] if `short_key` is taken,
    /// even when the caller checked beforehand.
    ///
    /// Returns [`RegistryError::Storage`] on any other failure.
    async fn insert(&self, record: NewAliasRecord) -> Result<AliasRecord, RegistryError>;

    /// Finds a record by its exact (case-sensitive) short key.
    async fn find_by_key(&self, short_key: &str) -> Result<Option<AliasRecord>, RegistryError>;

    /// Finds a record by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<AliasRecord>, RegistryError>;

    /// Atomically adds one to `click_count`.
    ///
    /// Concurrent calls for the same id must never lose an increment.
    async fn increment_clicks(&self, id: i64) -> Result<(), RegistryError>;

    /// Hard-deletes a record, returning the number of rows removed (0 or 1).
    async fn delete_by_id(&self, id: i64) -> Result<u64, RegistryError>;

    /// Lists an owner's records, newest first.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `per_page` - Number of items per page
    /// - `active` - When set, only records with a matching `is_active`
    ///
    /// # Returns
    ///
    /// The requested page and the total number of matching records.
    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: i64,
        per_page: i64,
        active: Option<bool>,
    ) -> Result<(Vec<AliasRecord>, i64), RegistryError>;

    /// Enables or disables a record without deleting it.
    ///
    /// Returns `Ok(false)` if no record has this id.
    async fn set_active(&self, id: i64, active: bool) -> Result<bool, RegistryError>;
}
