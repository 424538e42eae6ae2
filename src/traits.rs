//! # Cache Seams
//!
//! Two small traits separate the memoization and reclamation layers from the
//! concrete cache types.
//!
//! ```text
//!   ┌──────────────────────────────────────┐     ┌─────────────────────────────┐
//!   │          MemoCache<K, V>             │     │          Reclaim            │
//!   │                                      │     │                             │
//!   │  get_or_compute(&, K, F) → V         │     │  reclaim(&) → usize         │
//!   │  clear(&)                            │     │                             │
//!   │  set_max_size(&, usize) → Result     │     └──────────────┬──────────────┘
//!   │  len(&) / max_size(&)                │                    │
//!   └──────────────────┬───────────────────┘                    │
//!                      │                                        │
//!        ┌─────────────┴──────────────┐                         │
//!        ▼                            ▼                         ▼
//!   SynchronizedCache<K, V>     RefCell<BoundedCache>   RwLock<BoundedCache>
//!   (shared across threads)     (single thread)         (held by SynchronizedCache,
//!                                                        registered for pressure relief)
//! ```
//!
//! | Trait       | Used by                         | Purpose                              |
//! |-------------|---------------------------------|--------------------------------------|
//! | `MemoCache` | `MemoizedFn`, `MemoizedBiFn`    | Compute-if-absent through `&self`    |
//! | `Reclaim`   | `PressureRegistry`              | Drop a whole cache on memory pressure|
//!
//! Both take `&self`: the memoizers are called through shared references, and
//! the pressure registry only holds weak, shared handles.

use std::cell::RefCell;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::cache::bounded::BoundedCache;
use crate::error::ConfigError;

/// A cache a memoizer can compute through.
///
/// `compute` may run while the implementation holds internal exclusive
/// access (a write lock, a `RefCell` borrow). It must not call back into the
/// same cache: with [`SynchronizedCache`](crate::cache::synchronized::SynchronizedCache)
/// that deadlocks, with `RefCell<BoundedCache>` it panics.
///
/// # Example
///
/// ```
/// use memokit::cache::synchronized::SynchronizedCache;
/// use memokit::traits::MemoCache;
///
/// fn square_through<C: MemoCache<u64, u64>>(cache: &C, x: u64) -> u64 {
///     cache.get_or_compute(x, |x| x * x)
/// }
///
/// let cache = SynchronizedCache::new(16).unwrap();
/// assert_eq!(square_through(&cache, 12), 144);
/// assert_eq!(MemoCache::len(&cache), 1);
/// ```
pub trait MemoCache<K, V> {
    /// Returns the resident value for `key` or computes, stores and returns it.
    fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V;

    /// Discards every resident entry.
    fn clear(&self);

    /// Changes the bound applied by future insertions.
    fn set_max_size(&self, max_size: usize) -> Result<(), ConfigError>;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn max_size(&self) -> usize;
}

/// Something that can drop all of its cached contents on request.
pub trait Reclaim {
    /// Discards everything reclaimable and returns how many entries went.
    fn reclaim(&self) -> usize;
}

impl<K, V> MemoCache<K, V> for RefCell<BoundedCache<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        self.borrow_mut().get_or_compute(key, compute).clone()
    }

    fn clear(&self) {
        self.borrow_mut().clear();
    }

    fn set_max_size(&self, max_size: usize) -> Result<(), ConfigError> {
        self.borrow_mut().set_max_size(max_size)
    }

    fn len(&self) -> usize {
        self.borrow().len()
    }

    fn max_size(&self) -> usize {
        self.borrow().max_size()
    }
}

impl<K, V> Reclaim for RwLock<BoundedCache<K, V>>
where
    K: Eq + Hash + Clone,
{
    fn reclaim(&self) -> usize {
        self.write().evict_under_pressure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refcell_cache_memoizes_single_threaded() {
        let cache = RefCell::new(BoundedCache::new(2).unwrap());
        let mut calls = 0;

        assert_eq!(cache.get_or_compute(4, |x| { calls += 1; x * 2 }), 8);
        assert_eq!(cache.get_or_compute(4, |x| { calls += 1; x * 2 }), 8);
        assert_eq!(calls, 1);
        assert_eq!(MemoCache::len(&cache), 1);
        assert!(!MemoCache::is_empty(&cache));

        MemoCache::set_max_size(&cache, 5).unwrap();
        assert_eq!(MemoCache::max_size(&cache), 5);
        MemoCache::clear(&cache);
        assert_eq!(MemoCache::len(&cache), 0);
    }

    #[test]
    #[should_panic]
    fn refcell_cache_reentrant_compute_panics() {
        let cache: RefCell<BoundedCache<u32, u32>> = RefCell::new(BoundedCache::new(4).unwrap());
        cache.get_or_compute(1, |_| cache.get_or_compute(2, |_| 2));
    }

    #[test]
    fn rwlock_cache_reclaims_through_trait() {
        let lock = RwLock::new(BoundedCache::new(4).unwrap());
        lock.write().get_or_compute("a", |_| 1);
        lock.write().get_or_compute("b", |_| 2);

        assert_eq!(lock.reclaim(), 2);
        assert!(lock.read().is_reclaimed());
        assert_eq!(lock.reclaim(), 0);
    }
}
