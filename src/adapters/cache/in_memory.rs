//! In-memory response cache for single-process deployments and tests.
//!
//! TTL expiry is lazy: an expired entry reads as a miss and is removed on
//! the next lookup. `sweep_expired` exists for explicit housekeeping.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::ports::{AIResponse, CacheError, Fingerprint, ResponseCache};

/// Thread-safe TTL cache backed by a HashMap.
///
/// Cheap to clone; clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResponseCache {
    entries: Arc<RwLock<HashMap<Fingerprint, CacheEntry>>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: AIResponse,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

impl InMemoryResponseCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry, returning how many were evicted.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Current entry count, expired entries included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<AIResponse>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(fingerprint) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => {
                    return Ok(Some(entry.response.clone()));
                }
                Some(_) => {}
            }
        }

        // Entry was expired: evict under a write lock, re-checking since
        // another writer may have refreshed it in between.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(fingerprint) {
            if entry.is_expired(now) {
                entries.remove(fingerprint);
            } else {
                return Ok(Some(entry.response.clone()));
            }
        }
        Ok(None)
    }

    async fn put(
        &self,
        fingerprint: Fingerprint,
        response: AIResponse,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let entry = CacheEntry {
            response,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(fingerprint, entry);
        Ok(())
    }
}
