//! # Bounded LRU Cache
//!
//! [`BoundedCache`] is the single-threaded engine: an access-ordered
//! [`LruStore`] held in a [`ReclaimableSlot`] and capped at `max_size`
//! entries.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │ BoundedCache<K, V>          max_size: usize                   │
//!   │                                                               │
//!   │   ReclaimableSlot ── Some(LruStore) ──┐   or   None (reclaimed)│
//!   │                                       ▼                       │
//!   │   ┌───────────────────────────────────────────────────────┐   │
//!   │   │ FxHashMap<K, NodeId>  ──►  RecencyList<(K, V)>        │   │
//!   │   │                       head (MRU) ◄──► ... ◄──► tail   │   │
//!   │   └───────────────────────────────────────────────────────┘   │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method                 | Recency | Recreates store | Description                        |
//! |------------------------|---------|-----------------|------------------------------------|
//! | `get_or_compute`       | yes     | yes             | Resident value or compute + insert |
//! | `try_get_or_compute`   | yes     | yes             | Same, failing computations skipped |
//! | `get`                  | yes     | no              | Lookup counting as a use           |
//! | `peek`                 | no      | no              | Lookup without reordering          |
//! | `contains`             | no      | no              | Key existence                      |
//! | `remove`               | -       | no              | Remove and return a value          |
//! | `clear`                | -       | -               | Discard the whole store            |
//! | `evict_under_pressure` | -       | -               | Same as `clear`, counted as relief |
//!
//! ## Reclamation
//!
//! The whole store may be dropped at any point between operations, either by
//! an explicit [`clear`](BoundedCache::clear) or by a memory-pressure hook
//! ([`evict_under_pressure`](BoundedCache::evict_under_pressure), usually
//! driven by [`PressureRegistry`](crate::pressure::PressureRegistry)).
//! A reclaimed cache reads as empty and allocates a fresh store on the next
//! `get_or_compute`. Correctness never depends on reclamation happening.
//!
//! ## Thread Safety
//!
//! `BoundedCache` is **not** thread-safe. Confine it to one thread or go
//! through [`SynchronizedCache`](crate::cache::synchronized::SynchronizedCache).

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

use crate::builder::CacheConfig;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot, MetricsSnapshotProvider};
use crate::store::lru::LruStore;
use crate::store::slot::ReclaimableSlot;

/// Bound used when none is given.
pub const DEFAULT_MAX_SIZE: usize = 1024;

/// Size-bounded, reclaimable LRU cache.
///
/// # Example
///
/// ```
/// use memokit::cache::bounded::BoundedCache;
///
/// let mut cache = BoundedCache::new(2).unwrap();
/// cache.get_or_compute("a", |_| 1);
/// cache.get_or_compute("b", |_| 2);
/// cache.get_or_compute("c", |_| 3);
///
/// assert!(!cache.contains(&"a"));
/// assert!(cache.is_full());
/// ```
pub struct BoundedCache<K, V> {
    slot: ReclaimableSlot<K, V>,
    max_size: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `max_size` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self, ConfigError> {
        if max_size == 0 {
            return Err(ConfigError::zero_max_size());
        }
        Ok(Self {
            slot: ReclaimableSlot::empty(),
            max_size,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    /// Creates a cache from a [`CacheConfig`], validating it first.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config.max_size)
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs at most once and only when `key` is absent. A hit
    /// counts as a use for LRU purposes. If the store was reclaimed, a fresh
    /// one is created first.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::cache::bounded::BoundedCache;
    ///
    /// let mut cache = BoundedCache::new(8).unwrap();
    /// let mut calls = 0;
    /// assert_eq!(*cache.get_or_compute(3, |k| { calls += 1; k * 10 }), 30);
    /// assert_eq!(*cache.get_or_compute(3, |k| { calls += 1; k * 10 }), 30);
    /// assert_eq!(calls, 1);
    /// ```
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        match self.try_get_or_compute(key, |key| Ok::<V, Infallible>(compute(key))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// When `compute` returns `Err`, nothing is stored, nothing is evicted,
    /// and the error is handed back unchanged.
    pub fn try_get_or_compute<E, F>(&mut self, key: K, compute: F) -> Result<&V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        let max_size = self.max_size;
        let store = self.slot.get_or_create(max_size);

        if let Some(id) = store.touch(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_hit();
            return Ok(store.value(id));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_miss();

        let value = compute(&key)?;

        // A shrunken bound is applied here, so this may evict more than one.
        while store.len() >= max_size {
            if store.pop_lru().is_none() {
                break;
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
            tracing::trace!(len = store.len(), max_size, "evicted least recently used entry");
        }

        let (id, _) = store.push(key, value);
        #[cfg(feature = "metrics")]
        self.metrics.record_insert();
        Ok(store.value(id))
    }

    /// Returns the value for `key`, marking it most recently used.
    ///
    /// Never computes anything and never recreates a reclaimed store.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let found = self.slot.get_mut().and_then(|store| store.get(key));
        #[cfg(feature = "metrics")]
        self.metrics.record_lookup(found.is_some());
        found
    }

    /// Returns the value for `key` without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let found = self.slot.get().and_then(|store| store.peek(key));
        #[cfg(feature = "metrics")]
        self.metrics.record_lookup(found.is_some());
        found
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slot.get().is_some_and(|store| store.contains(key))
    }

    /// Removes `key` and returns its value, if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.slot.get_mut()?.remove(key);
        #[cfg(feature = "metrics")]
        if removed.is_some() {
            self.metrics.record_removal();
        }
        removed
    }

    /// Discards the backing store; the next write recreates it empty.
    pub fn clear(&mut self) {
        let discarded = self.slot.reclaim();
        #[cfg(feature = "metrics")]
        self.metrics.record_reclamation();
        tracing::debug!(discarded, "cache cleared");
    }

    /// Drops the whole backing store in response to memory pressure.
    ///
    /// Returns how many entries were discarded. Equivalent to
    /// [`clear`](Self::clear) as far as callers can observe.
    pub fn evict_under_pressure(&mut self) -> usize {
        let discarded = self.slot.reclaim();
        #[cfg(feature = "metrics")]
        self.metrics.record_reclamation();
        tracing::debug!(
            discarded,
            max_size = self.max_size,
            "backing store reclaimed under memory pressure"
        );
        discarded
    }

    /// Number of resident entries (`0` while reclaimed).
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// `true` once the cache holds `max_size` entries.
    ///
    /// After [`set_max_size`](Self::set_max_size) shrinks the bound, the
    /// resident count may exceed it until the next insertion; that also
    /// reads as full.
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_size
    }

    /// `true` if there is currently no backing store.
    pub fn is_reclaimed(&self) -> bool {
        self.slot.is_reclaimed()
    }

    /// Changes the bound used by future insertions.
    ///
    /// Resident entries are not evicted here; the next insertion trims the
    /// cache down to the new bound.
    pub fn set_max_size(&mut self, max_size: usize) -> Result<(), ConfigError> {
        if max_size == 0 {
            return Err(ConfigError::zero_max_size());
        }
        tracing::debug!(from = self.max_size, to = max_size, "max_size changed");
        self.max_size = max_size;
        Ok(())
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.slot.get().into_iter().flat_map(|store| store.keys())
    }

    /// The key that the next eviction would remove.
    pub fn lru_key(&self) -> Option<&K> {
        self.slot.get().and_then(LruStore::peek_lru)
    }

    /// Verifies that the index and the recency list agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match self.slot.get() {
            Some(store) => store.validate().map_err(InvariantError::new),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            hits: self.metrics.hits(),
            misses: self.metrics.misses(),
            inserts: self.metrics.inserts(),
            evictions: self.metrics.evictions(),
            removals: self.metrics.removals(),
            reclamations: self.metrics.reclamations(),
            len: self.len(),
            max_size: self.max_size,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> Default for BoundedCache<K, V> {
    /// Creates a cache bounded at [`DEFAULT_MAX_SIZE`].
    fn default() -> Self {
        Self {
            slot: ReclaimableSlot::empty(),
            max_size: DEFAULT_MAX_SIZE,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("len", &self.len())
            .field("max_size", &self.max_size)
            .field("reclaimed", &self.is_reclaimed())
            .finish_non_exhaustive()
    }
}
