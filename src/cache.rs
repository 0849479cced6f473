use serde::Deserialize;

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Number of (prefix, k) result slots.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    20
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            capacity: default_cache_capacity(),
        }
    }
}

/// Fixed-capacity cache of rendered query results, keyed by (prefix, k).
///
/// Slots are recycled in round-robin insertion order: once full, the
/// least-recently-inserted slot is overwritten next, regardless of hits.
/// A ring, not an LRU. Any index mutation invalidates every slot at once,
/// since a single word can change the answer for an unbounded number of
/// prefixes.
pub struct ResultCache {
    slots: Vec<Option<Slot>>,
    next: usize,
}

#[derive(Clone)]
struct Slot {
    prefix: String,
    k: usize,
    body: String,
}

impl ResultCache {
    /// Create a cache with the given number of slots. Zero slots yields a
    /// cache that never hits.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            next: 0,
        }
    }

    pub fn get(&self, prefix: &str, k: usize) -> Option<&str> {
        self.slots
            .iter()
            .flatten()
            .find(|s| s.k == k && s.prefix == prefix)
            .map(|s| s.body.as_str())
    }

    /// Store a result, overwriting the oldest slot when full. Never fails.
    pub fn put(&mut self, prefix: &str, k: usize, body: String) {
        if self.slots.is_empty() {
            return;
        }

        self.slots[self.next] = Some(Slot {
            prefix: prefix.to_string(),
            k,
            body,
        });
        self.next = (self.next + 1) % self.slots.len();
    }

    /// Invalidate every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let mut c = ResultCache::new(4);
        assert_eq!(c.get("ca", 2), None);

        c.put("ca", 2, "cart\ncar\n".to_string());
        assert_eq!(c.get("ca", 2), Some("cart\ncar\n"));

        // Same prefix, different k, is a different key.
        assert_eq!(c.get("ca", 3), None);
    }

    #[test]
    fn recycles_oldest_slot_when_full() {
        let mut c = ResultCache::new(2);
        c.put("a", 1, "a\n".to_string());
        c.put("b", 1, "b\n".to_string());
        c.put("c", 1, "c\n".to_string());

        assert_eq!(c.get("a", 1), None);
        assert_eq!(c.get("b", 1), Some("b\n"));
        assert_eq!(c.get("c", 1), Some("c\n"));
    }

    #[test]
    fn eviction_ignores_hits() {
        let mut c = ResultCache::new(2);
        c.put("a", 1, "a\n".to_string());
        c.put("b", 1, "b\n".to_string());

        // Hitting "a" does not save it; it is still the oldest insertion.
        assert_eq!(c.get("a", 1), Some("a\n"));
        c.put("c", 1, "c\n".to_string());
        assert_eq!(c.get("a", 1), None);
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut c = ResultCache::new(4);
        c.put("a", 1, "a\n".to_string());
        c.put("b", 2, "b\n".to_string());

        c.clear();
        assert_eq!(c.get("a", 1), None);
        assert_eq!(c.get("b", 2), None);
    }

    #[test]
    fn zero_capacity_never_stores() {
        let mut c = ResultCache::new(0);
        c.put("a", 1, "a\n".to_string());
        assert_eq!(c.get("a", 1), None);
    }
}
