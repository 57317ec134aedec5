//! Failure kinds of the alias engine and of the storage collaborator.

use thiserror::Error;

/// Errors reported by a repository implementation.
///
/// Only uniqueness violations are distinguished; everything else the store
/// reports (connection loss, timeouts, malformed rows) is [`RegistryError::Storage`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Domain outcomes of allocation, resolution and deletion.
///
/// `NotFound`, `Inactive` and `Expired` are distinct on purpose: an expired
/// link must never be reported as simply missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("Short key already exists")]
    DuplicateKey { key: String },

    #[error("Unable to generate unique short key after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error("URL not found")]
    NotFound,

    #[error("URL is inactive")]
    Inactive,

    #[error("URL has expired")]
    Expired,

    #[error("Not authorized to delete this URL")]
    NotAuthorized,

    #[error("Link lifetime is out of range")]
    ExpiryOutOfRange,

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl From<RegistryError> for AliasError {
    /// Plain conversion for registry calls where a uniqueness violation is not
    /// an expected outcome. The allocation path matches
    /// [`RegistryError::UniqueViolation`] itself before falling back to this.
    fn from(err: RegistryError) -> Self {
        AliasError::StorageFailure(err.to_string())
    }
}
