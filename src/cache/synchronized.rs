//! # Synchronized Cache
//!
//! [`SynchronizedCache`] wraps a [`BoundedCache`] in
//! `Arc<parking_lot::RwLock<_>>`. Cloning the handle shares the cache.
//!
//! ## Lock Modes
//!
//! | Method                                | Lock      | Notes                               |
//! |---------------------------------------|-----------|-------------------------------------|
//! | `get_or_compute`, `try_get_or_compute`| Write     | Presence check + compute + insert   |
//! | `get`                                 | Read      | Peek; does not refresh recency      |
//! | `contains`                            | Read      |                                     |
//! | `len`, `is_empty`, `is_full`          | Read      |                                     |
//! | `max_size`, `is_reclaimed`            | Read      |                                     |
//! | `remove`, `clear`                     | Write     |                                     |
//! | `set_max_size`                        | Write     |                                     |
//! | `evict_under_pressure`                | Write     |                                     |
//!
//! ## Concurrency Model
//!
//! ```text
//!   Thread 1                Thread 2                Thread 3
//!      │ get_or_compute(k)     │ get_or_compute(k)     │ get(j)
//!      ▼                       ▼                       ▼
//!   ┌───────────────────────────────────────────────────────────┐
//!   │                    RwLock<BoundedCache>                   │
//!   │                                                           │
//!   │  get_or_compute holds WRITE for check + compute + insert, │
//!   │  so a key is computed at most once however many threads   │
//!   │  ask for it. Reads share the lock with each other only.   │
//!   └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The computation runs **while the write lock is held**. Keep it short and
//! never call back into the same cache from inside it: `parking_lot` locks
//! are not reentrant, so that deadlocks. Guards are released on every exit
//! path, including a panicking computation, and the lock does not poison.

use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::cache::bounded::BoundedCache;
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::{MemoCache, Reclaim};

/// Thread-safe handle to a shared [`BoundedCache`].
///
/// Cloning the handle shares the cache. [`get`](Self::get) runs under the
/// shared lock and therefore does not refresh LRU recency; only hits through
/// [`get_or_compute`](Self::get_or_compute) count as a use.
pub struct SynchronizedCache<K, V> {
    inner: Arc<RwLock<BoundedCache<K, V>>>,
}

impl<K, V> Clone for SynchronizedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SynchronizedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache holding at most `max_size` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::cache::synchronized::SynchronizedCache;
    ///
    /// let cache: SynchronizedCache<u32, String> = SynchronizedCache::new(100).unwrap();
    /// assert_eq!(cache.max_size(), 100);
    /// assert!(cache.is_empty());
    /// assert!(SynchronizedCache::<u32, String>::new(0).is_err());
    /// ```
    pub fn new(max_size: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_bounded(BoundedCache::new(max_size)?))
    }

    /// Takes ownership of an existing cache and shares it.
    pub fn from_bounded(cache: BoundedCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Returns the resident value for `key` or computes and stores it.
    ///
    /// Holds the write lock for the whole call, so concurrent callers asking
    /// for the same key see exactly one computation.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::cache::synchronized::SynchronizedCache;
    ///
    /// let cache = SynchronizedCache::new(10).unwrap();
    /// assert_eq!(cache.get_or_compute("k", |_| 7), 7);
    /// assert_eq!(cache.get_or_compute("k", |_| unreachable!()), 7);
    /// ```
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
        V: Clone,
    {
        let mut cache = self.inner.write();
        cache.get_or_compute(key, compute).clone()
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute); an
    /// `Err` is returned to the caller and nothing is cached.
    pub fn try_get_or_compute<E, F>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
        V: Clone,
    {
        let mut cache = self.inner.write();
        cache.try_get_or_compute(key, compute).cloned()
    }

    /// Returns a clone of the value for `key`.
    ///
    /// Runs under the shared lock, so it does not refresh LRU recency;
    /// hits through [`get_or_compute`](Self::get_or_compute) do.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let cache = self.inner.read();
        cache.peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    pub fn is_full(&self) -> bool {
        let cache = self.inner.read();
        cache.is_full()
    }

    pub fn max_size(&self) -> usize {
        let cache = self.inner.read();
        cache.max_size()
    }

    pub fn is_reclaimed(&self) -> bool {
        let cache = self.inner.read();
        cache.is_reclaimed()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear();
    }

    pub fn set_max_size(&self, max_size: usize) -> Result<(), ConfigError> {
        let mut cache = self.inner.write();
        cache.set_max_size(max_size)
    }

    /// Drops the backing store; see [`BoundedCache::evict_under_pressure`].
    pub fn evict_under_pressure(&self) -> usize {
        let mut cache = self.inner.write();
        cache.evict_under_pressure()
    }

    /// `true` if both handles share the same underlying cache.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K, V> SynchronizedCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Weak handle for a [`PressureRegistry`](crate::pressure::PressureRegistry).
    ///
    /// The handle does not keep the cache alive.
    pub fn reclaim_handle(&self) -> Weak<dyn Reclaim + Send + Sync> {
        Arc::<RwLock<BoundedCache<K, V>>>::downgrade(&self.inner)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> SynchronizedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for SynchronizedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> MemoCache<K, V> for SynchronizedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        SynchronizedCache::get_or_compute(self, key, compute)
    }

    fn clear(&self) {
        SynchronizedCache::clear(self);
    }

    fn set_max_size(&self, max_size: usize) -> Result<(), ConfigError> {
        SynchronizedCache::set_max_size(self, max_size)
    }

    fn len(&self) -> usize {
        SynchronizedCache::len(self)
    }

    fn max_size(&self) -> usize {
        SynchronizedCache::max_size(self)
    }
}

impl<K, V> Default for SynchronizedCache<K, V> {
    /// Creates a shared cache bounded at
    /// [`DEFAULT_MAX_SIZE`](crate::cache::bounded::DEFAULT_MAX_SIZE).
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoundedCache::default())),
        }
    }
}

impl<K, V> From<BoundedCache<K, V>> for SynchronizedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(cache: BoundedCache<K, V>) -> Self {
        Self::from_bounded(cache)
    }
}

impl<K, V> fmt::Debug for SynchronizedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("SynchronizedCache")
            .field("len", &cache.len())
            .field("max_size", &cache.max_size())
            .field("reclaimed", &cache.is_reclaimed())
            .finish_non_exhaustive()
    }
}
