//! In-memory redirect store.

use crate::domain::entities::Slug;
use crate::domain::repositories::{RedirectStore, StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;

/// Redirect store keeping entries in a sharded concurrent map.
///
/// Check-and-mutate runs under the shard lock of the slug (via the entry API),
/// so it is atomic per slug while different shards proceed in parallel.
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryRedirectStore {
    entries: DashMap<Slug, String>,
}

impl MemoryRedirectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RedirectStore for MemoryRedirectStore {
    async fn get(&self, slug: &Slug) -> StoreResult<String> {
        self.entries
            .get(slug)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(slug.clone()))
    }

    async fn create(&self, slug: &Slug, target: &str) -> StoreResult<()> {
        match self.entries.entry(slug.clone()) {
            MapEntry::Occupied(_) => Err(StoreError::AlreadyExists(slug.clone())),
            MapEntry::Vacant(vacant) => {
                vacant.insert(target.to_owned());
                Ok(())
            }
        }
    }

    async fn update(&self, slug: &Slug, target: &str) -> StoreResult<()> {
        match self.entries.get_mut(slug) {
            Some(mut entry) => {
                *entry = target.to_owned();
                Ok(())
            }
            None => Err(StoreError::NotFound(slug.clone())),
        }
    }

    async fn delete(&self, slug: &Slug) -> StoreResult<()> {
        self.entries
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(slug.clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
