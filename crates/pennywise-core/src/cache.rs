//! Response Cache - prompt-keyed response store
//!
//! Responses are keyed by a SHA-256 fingerprint of the exact prompt text
//! (case- and whitespace-sensitive, no normalization). Entries are
//! first-write-wins and live for the process lifetime; the cache is
//! explicitly non-durable.
//!
//! The base store is unbounded. Bounded/evicting backends can be swapped
//! in behind [`ResponseCache`] without touching the optimization engine.

use crate::error::Result;
use dashmap::DashMap;
use sha2::{Digest, Sha256};

/// Deterministic fingerprint of a prompt (SHA-256 hex of the raw bytes).
#[must_use]
pub fn fingerprint(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Backing store for cached responses.
///
/// A failing backend must not fail a request: the optimization engine
/// treats `Err` from `get` as a miss and ignores `Err` from `put`.
pub trait ResponseCache: Send + Sync {
    /// Look up a cached response by fingerprint.
    fn get(&self, fingerprint: &str) -> Result<Option<String>>;

    /// Insert a response. First write wins; later puts for the same
    /// fingerprint are no-ops.
    fn put(&self, fingerprint: &str, response: &str) -> Result<()>;

    /// Number of cached entries.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process concurrent cache. Unbounded, process-lifetime only.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, String>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, fingerprint: &str) -> Result<Option<String>> {
        Ok(self.entries.get(fingerprint).map(|e| e.value().clone()))
    }

    fn put(&self, fingerprint: &str, response: &str) -> Result<()> {
        self.entries
            .entry(fingerprint.to_string())
            .or_insert_with(|| response.to_string());
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(fingerprint("hello"), fingerprint("hello"));
        assert_ne!(fingerprint("hello"), fingerprint("hello "));
        assert_ne!(fingerprint("Hello"), fingerprint("hello"));
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = fingerprint("hello");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_put_get_idempotent() {
        let cache = MemoryCache::new();
        let fp = fingerprint("what is rust?");
        cache.put(&fp, "a systems language").unwrap();
        for _ in 0..10 {
            assert_eq!(
                cache.get(&fp).unwrap().as_deref(),
                Some("a systems language")
            );
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_write_wins() {
        let cache = MemoryCache::new();
        let fp = fingerprint("k");
        cache.put(&fp, "first").unwrap();
        cache.put(&fp, "second").unwrap();
        assert_eq!(cache.get(&fp).unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_miss_returns_none() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get(&fingerprint("absent")).unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_puts_same_key() {
        let cache = std::sync::Arc::new(MemoryCache::new());
        let fp = fingerprint("contended");
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = std::sync::Arc::clone(&cache);
            let fp = fp.clone();
            handles.push(std::thread::spawn(move || {
                cache.put(&fp, &format!("resp-{i}")).unwrap();
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        // Exactly one winner, and every later read agrees with it.
        assert_eq!(cache.len(), 1);
        let first = cache.get(&fp).unwrap().unwrap();
        assert_eq!(cache.get(&fp).unwrap().unwrap(), first);
    }
}
