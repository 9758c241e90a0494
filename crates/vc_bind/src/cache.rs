//! A small bounded least-recently-used cache.

use core::fmt;
use core::hash::Hash;
use core::num::NonZeroUsize;

use lru::LruCache;

use crate::hash::FixedHashState;

// -----------------------------------------------------------------------------
// LookupStats

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
}

// -----------------------------------------------------------------------------
// LookupCache

/// An [`LruCache`] holding at most `max_entries` entries, with hit/miss
/// counters.
///
/// Every read or write of a key marks it as most recently used; inserting a
/// new key into a full cache evicts the least recently used one. The cache
/// is not synchronized, wrap it in a lock to share it.
///
/// # Examples
///
/// ```
/// use vc_bind::cache::LookupCache;
///
/// let mut cache = LookupCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");
/// cache.put("c", 3);
///
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(1));
/// ```
pub struct LookupCache<K, V> {
    entries: LruCache<K, V, FixedHashState>,
    stats: LookupStats,
}

impl<K: Hash + Eq, V: Clone> LookupCache<K, V> {
    /// Creates a cache never holding more than `max_entries`.
    ///
    /// `max_entries` is raised to 1 if zero.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::with_hasher(max_entries, FixedHashState),
            stats: LookupStats::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn max_entries(&self) -> usize {
        self.entries.cap().get()
    }

    #[inline]
    pub fn stats(&self) -> LookupStats {
        self.stats
    }

    /// Returns a copy of the value for `key` and marks it as recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.hits += 1;
                Some(value.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Returns the value for `key` without touching recency or statistics.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.peek(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Inserts `value` for `key`, returning the replaced value.
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry first.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.entries.put(key, value)
    }

    /// Removes every entry; statistics are kept.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Hash + Eq, V> fmt::Debug for LookupCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupCache")
            .field("len", &self.entries.len())
            .field("max_entries", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::{LookupCache, LookupStats};

    #[test]
    fn bounded_insertion_order() {
        let mut cache: LookupCache<String, usize> = LookupCache::new(200);
        for i in 0..=200 {
            cache.put(format!("k{i}"), i);
            assert!(cache.len() <= 200);
        }
        assert_eq!(cache.len(), 200);
        // first inserted, never read, goes first
        assert!(!cache.contains_key(&String::from("k0")));
        assert!(cache.contains_key(&String::from("k1")));
        assert!(cache.contains_key(&String::from("k200")));
    }

    #[test]
    fn read_refreshes_recency() {
        let mut cache = LookupCache::new(3);
        cache.put(1, 'a');
        cache.put(2, 'b');
        cache.put(3, 'c');
        assert_eq!(cache.get(&1), Some('a'));
        cache.put(4, 'd');
        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&2));

        // peek does not refresh
        assert_eq!(cache.peek(&3), Some(&'c'));
        cache.put(5, 'e');
        assert!(!cache.contains_key(&3));
    }

    #[test]
    fn replace_does_not_evict() {
        let mut cache = LookupCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("a", 10), Some(1));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&"b"), Some(&2));
        cache.put("c", 3);
        assert!(!cache.contains_key(&"b"));
        assert_eq!(cache.peek(&"a"), Some(&10));
    }

    #[test]
    fn stats() {
        let mut cache = LookupCache::new(4);
        cache.put('x', ());
        cache.get(&'x');
        cache.get(&'y');
        cache.get(&'x');
        assert_eq!(cache.stats(), LookupStats { hits: 2, misses: 1 });

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut cache = LookupCache::new(0);
        cache.put(1, 1);
        cache.put(2, 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.max_entries(), 1);
        assert!(cache.contains_key(&2));
    }
}
