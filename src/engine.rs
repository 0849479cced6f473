use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheConfig, ResultCache};
use crate::config::EngineConfig;
use crate::topk::select_top_k;
use crate::trie::{normalize, Trie};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or empty prefix/word, or a non-positive k. The message is the
    /// literal body sent back on the wire.
    #[error("Invalid parameters")]
    InvalidParams,
}

/// Running request counters since process start.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub queries: u64,
    pub selections: u64,
    pub inserts: u64,
    pub deletes: u64,
}

// Renders the plain-text /stats body.
impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "queries={}\nselections={}\ninserts={}\ndeletes={}\n",
            self.queries, self.selections, self.inserts, self.deletes
        )
    }
}

/// The autocomplete engine: one trie and one result cache shared by all
/// request handlers.
///
/// A single lock guards both together. A query reads the trie and touches the
/// cache; a mutation writes the trie and clears the cache before it returns.
/// Holding them under one lock means no caller can ever observe a cache entry
/// computed against a pre-mutation trie. Counters sit outside the lock as
/// plain atomics.
pub struct Engine {
    inner: Mutex<Inner>,
    insert_score: u32,
    bulk_insert_score: u32,

    queries: AtomicU64,
    selections: AtomicU64,
    inserts: AtomicU64,
    deletes: AtomicU64,
}

struct Inner {
    index: Trie,
    cache: ResultCache,
}

impl Engine {
    pub fn new(engine_cfg: &EngineConfig, cache_cfg: &CacheConfig) -> Self {
        // A disabled cache is just a zero-slot ring: every get misses, every
        // put is dropped.
        let capacity = if cache_cfg.enabled {
            cache_cfg.capacity
        } else {
            0
        };

        Self {
            inner: Mutex::new(Inner {
                index: Trie::new(),
                cache: ResultCache::new(capacity),
            }),
            insert_score: engine_cfg.insert_score,
            bulk_insert_score: engine_cfg.bulk_insert_score,
            queries: AtomicU64::new(0),
            selections: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Top-k completions of a prefix, rendered one word per line with a
    /// trailing newline each. An unknown prefix and a prefix with no matches
    /// both yield an empty body.
    pub fn query(&self, prefix: &str, k: i64) -> Result<String, Error> {
        if prefix.is_empty() || k <= 0 {
            return Err(Error::InvalidParams);
        }
        let k = k as usize;
        self.queries.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.lock();

        if let Some(body) = inner.cache.get(prefix, k) {
            return Ok(body.to_string());
        }

        let body = match inner.index.find_prefix_node(prefix) {
            Some(node) => {
                let mut out = String::new();
                for c in select_top_k(node, &normalize(prefix), k) {
                    out.push_str(&c.word);
                    out.push('\n');
                }
                out
            }
            None => String::new(),
        };

        inner.cache.put(prefix, k, body.clone());
        Ok(body)
    }

    /// Add a word with the interactive seed score. Re-inserting an existing
    /// word changes nothing but still invalidates the cache.
    pub fn insert(&self, word: &str) -> Result<(), Error> {
        if word.is_empty() {
            return Err(Error::InvalidParams);
        }
        self.inserts.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.lock();
        inner.index.insert(word, self.insert_score);
        inner.cache.clear();
        Ok(())
    }

    /// Remove a word. Returns whether it was present. The cache is cleared
    /// either way, matching the wire contract this engine inherited.
    pub fn delete(&self, word: &str) -> Result<bool, Error> {
        if word.is_empty() {
            return Err(Error::InvalidParams);
        }
        self.deletes.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.lock();
        let found = inner.index.delete(word);
        inner.cache.clear();
        Ok(found)
    }

    /// Record a usage of a word, bumping its popularity by one. Returns
    /// whether the word was found. The cache is cleared either way.
    pub fn select(&self, word: &str) -> Result<bool, Error> {
        if word.is_empty() {
            return Err(Error::InvalidParams);
        }
        self.selections.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.lock();
        let found = inner.index.increment_score(word);
        inner.cache.clear();
        Ok(found)
    }

    /// Seed a word from the bulk dictionary load. Returns whether a new word
    /// was added. Not counted in request stats.
    pub fn bulk_insert(&self, word: &str) -> bool {
        let mut inner = self.lock();
        let added = inner.index.insert(word, self.bulk_insert_score);
        inner.cache.clear();
        added
    }

    pub fn stats(&self) -> Stats {
        Stats {
            queries: self.queries.load(Ordering::Relaxed),
            selections: self.selections.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }

    /// JSON dump of the whole index for the debug endpoint.
    pub fn dump(&self) -> serde_json::Value {
        self.lock().index.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(&EngineConfig::default(), &CacheConfig::default())
    }

    #[test]
    fn query_rejects_invalid_parameters() {
        let e = engine();
        assert!(matches!(e.query("", 5), Err(Error::InvalidParams)));
        assert!(matches!(e.query("ca", 0), Err(Error::InvalidParams)));
        assert!(matches!(e.query("ca", -3), Err(Error::InvalidParams)));
    }

    #[test]
    fn mutations_reject_empty_words() {
        let e = engine();
        assert!(e.insert("").is_err());
        assert!(e.delete("").is_err());
        assert!(e.select("").is_err());
    }

    #[test]
    fn inserted_word_appears_under_every_prefix() {
        let e = engine();
        e.insert("carton").unwrap();

        for prefix in ["c", "ca", "car", "carton"] {
            let body = e.query(prefix, 10).unwrap();
            assert!(body.contains("carton\n"), "missing under {:?}", prefix);
        }
    }

    #[test]
    fn unknown_prefix_yields_empty_body() {
        let e = engine();
        e.insert("cat").unwrap();
        assert_eq!(e.query("dog", 5).unwrap(), "");
    }

    #[test]
    fn select_invalidates_cached_results() {
        let e = engine();
        for w in ["cat", "car", "cart"] {
            assert!(e.bulk_insert(w));
        }

        // All three tie on the bulk seed score; car and cart are discovered
        // first in a-z order.
        assert_eq!(e.query("ca", 2).unwrap(), "car\ncart\n");

        // Boosting cart must displace the cached answer, not serve it stale.
        assert!(e.select("cart").unwrap());
        assert_eq!(e.query("ca", 2).unwrap(), "cart\ncar\n");
    }

    #[test]
    fn insert_invalidates_cached_results() {
        let e = engine();
        e.insert("apple").unwrap();
        assert_eq!(e.query("app", 5).unwrap(), "apple\n");

        e.insert("apply").unwrap();
        let body = e.query("app", 5).unwrap();
        assert!(body.contains("apply\n"));
    }

    #[test]
    fn deleted_word_disappears_from_results() {
        let e = engine();
        e.insert("cat").unwrap();
        e.insert("car").unwrap();
        assert!(e.query("ca", 5).unwrap().contains("cat\n"));

        assert!(e.delete("cat").unwrap());
        let body = e.query("ca", 5).unwrap();
        assert!(!body.contains("cat\n"));
        assert!(body.contains("car\n"));

        // Deleting again reports not found.
        assert!(!e.delete("cat").unwrap());
    }

    #[test]
    fn select_on_missing_word_reports_not_found() {
        let e = engine();
        assert!(!e.select("ghost").unwrap());
    }

    #[test]
    fn normalized_inserts_are_equivalent() {
        let e = engine();
        e.insert("Hello!!").unwrap();
        assert_eq!(e.query("hel", 5).unwrap(), "hello\n");

        // The same word again is a no-op.
        e.insert("hello").unwrap();
        assert_eq!(e.query("hel", 5).unwrap(), "hello\n");
    }

    #[test]
    fn stats_count_served_requests() {
        let e = engine();
        e.insert("cat").unwrap();
        e.query("c", 1).unwrap();
        e.query("c", 1).unwrap();
        e.select("cat").unwrap();
        e.delete("cat").unwrap();
        assert!(e.query("", 1).is_err());

        let s = e.stats();
        assert_eq!(s.queries, 2);
        assert_eq!(s.selections, 1);
        assert_eq!(s.inserts, 1);
        assert_eq!(s.deletes, 1);
        assert_eq!(
            s.to_string(),
            "queries=2\nselections=1\ninserts=1\ndeletes=1\n"
        );
    }

    #[test]
    fn disabled_cache_still_serves_fresh_results() {
        let cfg = CacheConfig {
            enabled: false,
            capacity: 20,
        };
        let e = Engine::new(&EngineConfig::default(), &cfg);
        e.insert("cat").unwrap();
        assert_eq!(e.query("ca", 5).unwrap(), "cat\n");
        assert_eq!(e.query("ca", 5).unwrap(), "cat\n");
    }
}
