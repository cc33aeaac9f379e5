//! Process-wide store of favorited images.
//!
//! The store is the only shared mutable state in the system. Every
//! successful `favorite` action appends exactly one entry, and appends from
//! arbitrarily many concurrent request handlers must never be lost or
//! duplicated, so the underlying vector sits behind a mutex. The critical
//! sections are a push and a clone; neither suspends.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One favorited image, recorded locally when the upstream favourite
/// call succeeds. Lives for the process lifetime; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteEntry {
    pub image_id: String,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            added_at: Utc::now(),
        }
    }
}

/// Concurrency-safe in-memory collection of favorited images.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    entries: Mutex<Vec<FavoriteEntry>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry. Safe to call from any number of concurrent tasks.
    pub fn add(&self, entry: FavoriteEntry) {
        self.lock().push(entry);
    }

    /// A consistent point-in-time copy of the collection.
    ///
    /// The order reflects completion order of the add operations, which is
    /// not globally defined across concurrent requests.
    pub fn snapshot(&self) -> Vec<FavoriteEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FavoriteEntry>> {
        // A poisoned lock only means another writer panicked mid-push; the
        // vector itself is still well-formed, so keep serving.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
