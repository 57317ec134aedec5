//! Short key allocation, redirect resolution and owner-gated deletion.
//!
//! This is the only place with concurrency-sensitive rules. The service keeps
//! no state of its own between calls; every registry call is a separate,
//! independently failable step, and the registry is the final authority on
//! uniqueness and on the click counter.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, error, info, warn};

use crate::domain::entities::{AliasPage, AliasRecord, NewAliasRecord};
use crate::domain::errors::{AliasError, RegistryError};
use crate::domain::repositories::AliasRepository;
use crate::utils::key_generator::{DEFAULT_KEY_LENGTH, KeySource, RandomKeySource};

/// Tunables for key allocation.
#[derive(Debug, Clone)]
pub struct AllocationSettings {
    /// Length of generated keys.
    pub key_length: usize,
    /// Generated candidates tried before giving up.
    pub max_attempts: u32,
    /// Lifetime of a new record, added to its creation time.
    pub ttl: Duration,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            max_attempts: 5,
            ttl: Duration::days(1),
        }
    }
}

/// Service implementing the alias engine on top of an injected registry.
pub struct AliasService {
    repository: Arc<dyn AliasRepository>,
    key_source: Arc<dyn KeySource>,
    settings: AllocationSettings,
}

impl AliasService {
    /// Creates a service that generates keys with [`RandomKeySource`].
    pub fn new(repository: Arc<dyn AliasRepository>, settings: AllocationSettings) -> Self {
        Self::with_key_source(repository, Arc::new(RandomKeySource), settings)
    }

    /// Creates a service with a custom candidate source.
    pub fn with_key_source(
        repository: Arc<dyn AliasRepository>,
        key_source: Arc<dyn KeySource>,
        settings: AllocationSettings,
    ) -> Self {
        Self {
            repository,
            key_source,
            settings,
        }
    }

    /// Reserves a short key for `original_url` and persists the record.
    ///
    /// # Key Selection
    ///
    /// - If `requested_key` is given, it is used as-is unless the registry
    ///   already holds it
    /// - Otherwise up to `max_attempts` random candidates are tried and the
    ///   first one the registry does not know is used
    ///
    /// An empty `requested_key` is treated as absent.
    ///
    /// The existence check is only an early exit. A concurrent allocator can
    /// still take the key before our insert lands, in which case the
    /// registry's uniqueness violation is reported as `DuplicateKey`.
    ///
    /// # Errors
    ///
    /// - [`AliasError::DuplicateKey`] if the requested key is taken
    /// - [`AliasError::AllocationExhausted`] if every generated candidate was taken
    /// - [`AliasError::ExpiryOutOfRange`] if the configured lifetime overflows the clock
    /// - [`AliasError::StorageFailure`] on registry errors
    pub async fn allocate(
        &self,
        original_url: String,
        requested_key: Option<String>,
        owner_id: i64,
    ) -> Result<AliasRecord, AliasError> {
        let short_key = match requested_key.filter(|k| !k.is_empty()) {
            Some(key) => {
                if self.repository.find_by_key(&key).await?.is_some() {
                    warn!(short_key = %key, owner_id, "Short key already exists");
                    return Err(AliasError::DuplicateKey { key });
                }
                key
            }
            None => self.generate_unique_key().await?,
        };

        let now = Utc::now();
        let Some(expires_at) = now.checked_add_signed(self.settings.ttl) else {
            error!(ttl_seconds = self.settings.ttl.num_seconds(), "Link lifetime overflows");
            return Err(AliasError::ExpiryOutOfRange);
        };

        let new_record = NewAliasRecord {
            original_url,
            short_key: short_key.clone(),
            owner_id,
            created_at: now,
            expires_at,
        };

        match self.repository.insert(new_record).await {
            Ok(record) => {
                info!(
                    short_key = %record.short_key,
                    id = record.id,
                    owner_id,
                    "Created short URL"
                );
                Ok(record)
            }
            Err(RegistryError::UniqueViolation { .. }) => {
                warn!(short_key = %short_key, owner_id, "Short key taken by a concurrent insert");
                Err(AliasError::DuplicateKey { key: short_key })
            }
            Err(e) => {
                error!(error = %e, owner_id, "Failed to insert short URL");
                Err(e.into())
            }
        }
    }

    /// Resolves a short key to its redirect target and counts the click.
    ///
    /// Checks run in a fixed order and the first failing one wins:
    ///
    /// 1. no record: [`AliasError::NotFound`]
    /// 2. record disabled: [`AliasError::Inactive`]
    /// 3. `expires_at` in the past: [`AliasError::Expired`]
    ///
    /// On success the counter is bumped by the registry in one atomic
    /// statement; the service never writes back a value it read.
    pub async fn resolve(&self, short_key: &str) -> Result<String, AliasError> {
        let Some(record) = self.repository.find_by_key(short_key).await? else {
            warn!(short_key, "Redirect failed: no URL with this short key");
            return Err(AliasError::NotFound);
        };

        if !record.is_active {
            warn!(short_key, "Redirect failed: URL is inactive");
            return Err(AliasError::Inactive);
        }

        if record.is_expired_at(Utc::now()) {
            warn!(short_key, expires_at = %record.expires_at, "Redirect failed: URL has expired");
            return Err(AliasError::Expired);
        }

        self.repository.increment_clicks(record.id).await?;

        info!(short_key, target = %record.original_url, "Redirecting");
        Ok(record.original_url)
    }

    /// Deletes a record on behalf of `requesting_user_id`.
    ///
    /// Existence is checked before ownership so probing someone else's ids
    /// reveals nothing beyond `NotFound`. Ownership is checked before the
    /// delete so non-owners never reach a destructive call. If the record
    /// disappears between lookup and delete, the result is `NotFound`.
    pub async fn delete(&self, record_id: i64, requesting_user_id: i64) -> Result<(), AliasError> {
        let Some(record) = self.repository.find_by_id(record_id).await? else {
            warn!(record_id, "Delete failed: no URL with this id");
            return Err(AliasError::NotFound);
        };

        if !record.is_owned_by(requesting_user_id) {
            warn!(
                record_id,
                requesting_user_id, "Delete refused: URL belongs to another user"
            );
            return Err(AliasError::NotAuthorized);
        }

        if self.repository.delete_by_id(record_id).await? == 0 {
            warn!(record_id, "Delete failed: URL vanished before delete");
            return Err(AliasError::NotFound);
        }

        info!(record_id, requesting_user_id, "Deleted short URL");
        Ok(())
    }

    /// Lists an owner's records newest first, optionally filtered by `is_active`.
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        page: i64,
        per_page: i64,
        active: Option<bool>,
    ) -> Result<AliasPage, AliasError> {
        let (items, total) = self
            .repository
            .list_by_owner(owner_id, page, per_page, active)
            .await?;

        debug!(owner_id, page, per_page, total, "Listed short URLs");

        Ok(AliasPage {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Draws candidates until one is free in the registry.
    async fn generate_unique_key(&self) -> Result<String, AliasError> {
        let attempts = self.settings.max_attempts;

        for _ in 0..attempts {
            let candidate = self.key_source.candidate(self.settings.key_length);

            if self.repository.find_by_key(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        error!(attempts, "Failed to generate unique short key");
        Err(AliasError::AllocationExhausted { attempts })
    }
}
