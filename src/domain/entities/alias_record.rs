//! Alias record entity: the mapping from a short key to its target URL.

use chrono::{DateTime, Utc};

/// A stored short key with its redirect target and bookkeeping.
///
/// Only `is_active` and `click_count` change after insertion.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AliasRecord {
    pub id: i64,
    pub original_url: String,
    pub short_key: String,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub owner_id: i64,
}

impl AliasRecord {
    /// Returns true if `expires_at` lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Returns true if `user_id` created this record.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Input for inserting a new record.
///
/// The registry assigns `id`; new records always start active with zero clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAliasRecord {
    pub original_url: String,
    pub short_key: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// One page of an owner's records.
#[derive(Debug, Clone)]
pub struct AliasPage {
    pub items: Vec<AliasRecord>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl AliasPage {
    /// Number of pages needed to show `total` records, rounding up.
    pub fn total_pages(&self) -> i64 {
        if self.per_page <= 0 {
            return 0;
        }
        (self.total + self.per_page - 1) / self.per_page
    }
}
