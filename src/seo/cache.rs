//! Time-bounded SEO record cache.
//!
//! Entries expire lazily: a lookup of a stale entry removes it and reports a
//! miss. When full, the oldest *inserted* entry is evicted regardless of how
//! recently it was read.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::clock::Clock;
use crate::models::SeoRecord;

type CacheKey = (String, String);

/// A resolved record and whether it is the fixed fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSeo {
    pub record: SeoRecord,
    pub fallback: bool,
}

struct CacheEntry {
    value: CachedSeo,
    inserted_at: DateTime<Utc>,
}

pub struct SeoCache {
    ttl: chrono::Duration,
    capacity: usize,
    entries: HashMap<CacheKey, CacheEntry>,
    insertion_order: VecDeque<CacheKey>,
    clock: Arc<dyn Clock>,
}

impl SeoCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new(ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            capacity: capacity.max(1),
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            clock,
        }
    }

    /// Fresh entry for `(slug, language)`; stale entries are dropped.
    pub fn get(&mut self, slug: &str, language: &str) -> Option<CachedSeo> {
        let key = (slug.to_string(), language.to_string());
        let fresh = {
            let entry = self.entries.get(&key)?;
            self.clock.now() - entry.inserted_at < self.ttl
        };
        if fresh {
            return self.entries.get(&key).map(|entry| entry.value.clone());
        }
        tracing::debug!(slug, language, "SEO cache entry expired");
        self.remove(&key);
        None
    }

    pub fn insert(&mut self, slug: &str, language: &str, value: CachedSeo) {
        let key = (slug.to_string(), language.to_string());
        if self.entries.contains_key(&key) {
            self.remove(&key);
        } else if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                tracing::debug!(
                    slug = %oldest.0,
                    language = %oldest.1,
                    "SEO cache evicted oldest entry"
                );
                self.entries.remove(&oldest);
            }
        }

        self.insertion_order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: self.clock.now(),
            },
        );
    }

    /// Whether a fresh entry exists, without expiring anything.
    pub fn contains(&self, slug: &str, language: &str) -> bool {
        let key = (slug.to_string(), language.to_string());
        self.entries
            .get(&key)
            .is_some_and(|entry| self.clock.now() - entry.inserted_at < self.ttl)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }

    fn remove(&mut self, key: &CacheKey) {
        self.entries.remove(key);
        self.insertion_order.retain(|existing| existing != key);
    }
}
