//! Alias engine scenarios against the in-memory registry, including
//! concurrent resolution and the check-then-insert race.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Barrier;
use url_alias::application::services::{AliasService, AllocationSettings};
use url_alias::domain::entities::{AliasRecord, NewAliasRecord};
use url_alias::domain::errors::{AliasError, RegistryError};
use url_alias::domain::repositories::AliasRepository;
use url_alias::infrastructure::memory::InMemoryAliasRepository;

fn service(repo: Arc<InMemoryAliasRepository>) -> AliasService {
    AliasService::new(repo, AllocationSettings::default())
}

#[tokio::test]
async fn test_create_and_resolve_counts_clicks() {
    let repo = Arc::new(InMemoryAliasRepository::new());
    let svc = service(repo.clone());

    let record = svc
        .allocate("https://example.com".to_string(), None, 1)
        .await
        .unwrap();

    assert_eq!(record.short_key.len(), 6);
    assert!(record.short_key.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(record.expires_at > record.created_at);

    assert_eq!(svc.resolve(&record.short_key).await.unwrap(), "https://example.com");
    let stored = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.click_count, 1);

    svc.resolve(&record.short_key).await.unwrap();
    let stored = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.click_count, 2);
}

#[tokio::test]
async fn test_same_explicit_key_twice() {
    let svc = service(Arc::new(InMemoryAliasRepository::new()));

    svc.allocate("https://a.example".to_string(), Some("exmpl".to_string()), 1)
        .await
        .unwrap();
    let err = svc
        .allocate("https://b.example".to_string(), Some("exmpl".to_string()), 2)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AliasError::DuplicateKey {
            key: "exmpl".to_string()
        }
    );
}

#[tokio::test]
async fn test_short_keys_are_case_sensitive() {
    let svc = service(Arc::new(InMemoryAliasRepository::new()));

    let lower = svc
        .allocate("https://lower.example".to_string(), Some("exmpl".to_string()), 1)
        .await
        .unwrap();
    let upper = svc
        .allocate("https://upper.example".to_string(), Some("EXMPL".to_string()), 1)
        .await
        .unwrap();

    assert_ne!(lower.id, upper.id);
    assert_eq!(svc.resolve("exmpl").await.unwrap(), "https://lower.example");
    assert_eq!(svc.resolve("EXMPL").await.unwrap(), "https://upper.example");
    assert_eq!(svc.resolve("Exmpl").await.unwrap_err(), AliasError::NotFound);
}

#[tokio::test]
async fn test_expired_record_is_expired_not_missing() {
    let repo = Arc::new(InMemoryAliasRepository::new());
    let now = Utc::now();
    repo.insert(NewAliasRecord {
        original_url: "https://example.com".to_string(),
        short_key: "past01".to_string(),
        owner_id: 1,
        created_at: now - Duration::days(2),
        expires_at: now - Duration::days(1),
    })
    .await
    .unwrap();

    let svc = service(repo);

    assert_eq!(svc.resolve("past01").await.unwrap_err(), AliasError::Expired);
    assert_eq!(svc.resolve("never1").await.unwrap_err(), AliasError::NotFound);
}

#[tokio::test]
async fn test_delete_rules() {
    let svc = service(Arc::new(InMemoryAliasRepository::new()));
    let record = svc
        .allocate("https://example.com".to_string(), None, 1)
        .await
        .unwrap();

    assert_eq!(svc.delete(record.id, 2).await.unwrap_err(), AliasError::NotAuthorized);
    assert_eq!(svc.delete(9_999, 1).await.unwrap_err(), AliasError::NotFound);

    svc.delete(record.id, 1).await.unwrap();
    assert_eq!(svc.delete(record.id, 1).await.unwrap_err(), AliasError::NotFound);
    assert_eq!(
        svc.resolve(&record.short_key).await.unwrap_err(),
        AliasError::NotFound
    );
}

#[tokio::test]
async fn test_list_pagination_with_active_filter() {
    let repo = Arc::new(InMemoryAliasRepository::new());
    let svc = service(repo.clone());

    for i in 0..15 {
        let record = svc
            .allocate(format!("https://example.com/{i}"), None, 1)
            .await
            .unwrap();
        if i >= 10 {
            repo.set_active(record.id, false).await.unwrap();
        }
    }

    let page = svc.list_for_owner(1, 2, 5, Some(true)).await.unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total, 10);
    assert_eq!(page.total_pages(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_lose_no_clicks() {
    const RESOLVES: usize = 50;

    let repo = Arc::new(InMemoryAliasRepository::new());
    let svc = Arc::new(service(repo.clone()));
    let record = svc
        .allocate("https://example.com".to_string(), Some("hot001".to_string()), 1)
        .await
        .unwrap();

    let handles: Vec<_> = (0..RESOLVES)
        .map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.resolve("hot001").await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.click_count, RESOLVES as i64);
}

/// Registry whose lookups wait until both allocators have looked, so both
/// pass the existence check before either inserts.
struct RacingRepository {
    inner: InMemoryAliasRepository,
    barrier: Barrier,
}

#[async_trait]
impl AliasRepository for RacingRepository {
    async fn insert(&self, new_record: NewAliasRecord) -> Result<AliasRecord, RegistryError> {
        self.inner.insert(new_record).await
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<AliasRecord>, RegistryError> {
        let found = self.inner.find_by_key(short_key).await;
        self.barrier.wait().await;
        found
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AliasRecord>, RegistryError> {
        self.inner.find_by_id(id).await
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), RegistryError> {
        self.inner.increment_clicks(id).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, RegistryError> {
        self.inner.delete_by_id(id).await
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: i64,
        per_page: i64,
        active: Option<bool>,
    ) -> Result<(Vec<AliasRecord>, i64), RegistryError> {
        self.inner
            .list_by_owner(owner_id, page, per_page, active)
            .await
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<bool, RegistryError> {
        self.inner.set_active(id, active).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_insert_race_on_same_key_has_one_winner() {
    let repo = Arc::new(RacingRepository {
        inner: InMemoryAliasRepository::new(),
        barrier: Barrier::new(2),
    });
    let svc = Arc::new(AliasService::new(repo.clone(), AllocationSettings::default()));

    let attempts: Vec<_> = (1..=2)
        .map(|owner_id| {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.allocate(
                    format!("https://owner{owner_id}.example"),
                    Some("race01".to_string()),
                    owner_id,
                )
                .await
            })
        })
        .collect();

    let mut results = Vec::new();
    for attempt in attempts {
        results.push(attempt.await.unwrap());
    }

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(AliasError::DuplicateKey { key }) if key == "race01"))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(duplicates, 1);

    let (records, total) = repo.inner.list_by_owner(1, 1, 10, None).await.unwrap();
    let (other, other_total) = repo.inner.list_by_owner(2, 1, 10, None).await.unwrap();
    assert_eq!(total + other_total, 1);
    assert_eq!(records.len() + other.len(), 1);
}
