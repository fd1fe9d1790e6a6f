//! Content cache collaborator: get / set-with-TTL over resolved template bodies.
//!
//! Callers treat every `CacheError` as a miss. Nothing here is ever invalidated
//! explicitly; keys carry the template version instead.

pub mod redis_cache;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

pub use self::redis_cache::RedisCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait PromptCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}

struct CachedBody {
    body: String,
    expires_at: Instant,
}

/// In-process cache with per-entry expiry and a hard capacity bound.
pub struct MemoryCache {
    entries: DashMap<String, CachedBody>,
    capacity: usize,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops expired entries, then the entry closest to expiry if still full.
    fn make_room(&self, now: Instant) {
        self.entries.retain(|_, entry| entry.expires_at > now);
        if self.entries.len() >= self.capacity {
            self.evict_soonest(None);
        }
    }

    /// Removes the entry closest to expiry, never `keep`. Returns false when
    /// nothing could be removed.
    fn evict_soonest(&self, keep: Option<&str>) -> bool {
        let soonest = self
            .entries
            .iter()
            .filter(|entry| keep != Some(entry.key().as_str()))
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| entry.key().clone());
        match soonest {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[async_trait]
impl PromptCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let hit = self
            .entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.body.clone());
        if hit.is_none() {
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        Ok(hit)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        if !self.entries.contains_key(key) && self.entries.len() >= self.capacity {
            self.make_room(now);
        }
        self.entries.insert(
            key.to_string(),
            CachedBody {
                body: value.to_string(),
                expires_at: now + ttl,
            },
        );
        // Concurrent writers can each pass the check above; trim back down.
        while self.entries.len() > self.capacity {
            if !self.evict_soonest(Some(key)) {
                break;
            }
        }
        Ok(())
    }
}
