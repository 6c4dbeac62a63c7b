use crate::ports::outbound::{ParsingResultCache, SharedParsingResults};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default lifetime of a cache entry
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Default upper bound on cached attachments
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
struct CacheEntry {
    results: SharedParsingResults,
    inserted_at: Instant,
}

/// InMemoryParsingResultCache keeps parsing results per attachment content id.
///
/// Entries expire `ttl` after insertion. Expiry is checked when an entry is
/// read; inserting prunes expired entries and then drops the oldest entries
/// until at most `max_entries` remain. The map is thread-safe, so a single
/// instance can be shared by concurrent requests.
pub struct InMemoryParsingResultCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
}

impl InMemoryParsingResultCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
        }
    }

    /// Number of entries currently held, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        entry.inserted_at.elapsed() >= self.ttl
    }

    fn evict(&self) {
        self.entries.retain(|_, entry| !self.is_expired(entry));

        while self.entries.len() > self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().inserted_at)
                .map(|entry| entry.key().clone());

            match oldest {
                Some(key) => {
                    debug!(attachment = %key, "Evicting cached parsing results");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Default for InMemoryParsingResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_MAX_ENTRIES)
    }
}

impl ParsingResultCache for InMemoryParsingResultCache {
    fn get(&self, attachment_content_id: &str) -> Option<SharedParsingResults> {
        if let Some(entry) = self.entries.get(attachment_content_id) {
            if !self.is_expired(&entry) {
                return Some(entry.results.clone());
            }
        }

        self.entries
            .remove_if(attachment_content_id, |_, entry| self.is_expired(entry));
        None
    }

    fn put(&self, attachment_content_id: &str, results: SharedParsingResults) {
        self.entries.insert(
            attachment_content_id.to_string(),
            CacheEntry {
                results,
                inserted_at: Instant::now(),
            },
        );
        self.evict();
    }
}
