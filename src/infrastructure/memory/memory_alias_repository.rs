//! In-memory alias repository.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::entities::{AliasRecord, NewAliasRecord};
use crate::domain::errors::RegistryError;
use crate::domain::repositories::AliasRepository;

/// Constraint name reported on duplicate short keys, matching the database.
pub const SHORT_KEY_CONSTRAINT: &str = "urls_short_key_key";

#[derive(Default)]
struct Store {
    records: BTreeMap<i64, AliasRecord>,
    next_id: i64,
}

/// Alias repository backed by a mutex-guarded map.
///
/// Uniqueness is checked and the record inserted under one lock, so two
/// concurrent inserts of the same key cannot both succeed.
#[derive(Default)]
pub struct InMemoryAliasRepository {
    inner: Mutex<Store>,
}

impl InMemoryAliasRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Store>, RegistryError> {
        self.inner
            .lock()
            .map_err(|_| RegistryError::Storage("mutex poisoned".into()))
    }
}

#[async_trait]
impl AliasRepository for InMemoryAliasRepository {
    async fn insert(&self, new_record: NewAliasRecord) -> Result<AliasRecord, RegistryError> {
        let mut store = self.lock()?;

        if store
            .records
            .values()
            .any(|r| r.short_key == new_record.short_key)
        {
            return Err(RegistryError::UniqueViolation {
                constraint: SHORT_KEY_CONSTRAINT.to_string(),
            });
        }

        store.next_id += 1;
        let record = AliasRecord {
            id: store.next_id,
            original_url: new_record.original_url,
            short_key: new_record.short_key,
            is_active: true,
            expires_at: new_record.expires_at,
            created_at: new_record.created_at,
            click_count: 0,
            owner_id: new_record.owner_id,
        };
        store.records.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<AliasRecord>, RegistryError> {
        let store = self.lock()?;
        Ok(store
            .records
            .values()
            .find(|r| r.short_key == short_key)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AliasRecord>, RegistryError> {
        let store = self.lock()?;
        Ok(store.records.get(&id).cloned())
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), RegistryError> {
        let mut store = self.lock()?;
        if let Some(record) = store.records.get_mut(&id) {
            record.click_count += 1;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, RegistryError> {
        let mut store = self.lock()?;
        Ok(u64::from(store.records.remove(&id).is_some()))
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: i64,
        per_page: i64,
        active: Option<bool>,
    ) -> Result<(Vec<AliasRecord>, i64), RegistryError> {
        let store = self.lock()?;

        let mut matching: Vec<&AliasRecord> = store
            .records
            .values()
            .filter(|r| r.owner_id == owner_id)
            .filter(|r| active.is_none_or(|a| r.is_active == a))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let offset = (page - 1).saturating_mul(per_page).max(0) as usize;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(per_page.max(0) as usize)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<bool, RegistryError> {
        let mut store = self.lock()?;
        match store.records.get_mut(&id) {
            Some(record) => {
                record.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
