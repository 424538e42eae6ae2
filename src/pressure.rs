//! Memory-pressure relief across many caches.
//!
//! A [`PressureRegistry`] keeps weak handles to [`Reclaim`] targets, usually
//! [`SynchronizedCache`]s. When the host decides memory is tight it calls
//! [`relieve`](PressureRegistry::relieve), which drops every live cache's
//! backing store. Caches keep working afterwards: the next write recreates
//! an empty store.
//!
//! ```text
//!   PressureRegistry
//!     targets: RwLock<Vec<Weak<dyn Reclaim>>>
//!        │
//!        ├── Weak ──► RwLock<BoundedCache<A, R>>   (live: reclaimed)
//!        ├── Weak ──► RwLock<BoundedCache<B, S>>   (live: reclaimed)
//!        └── Weak ──► (dropped)                    (pruned)
//! ```
//!
//! Registration does not extend a cache's lifetime. `relieve` upgrades the
//! live handles, releases its own lock, and only then takes each cache's
//! write lock, one at a time.
//!
//! Nothing in this crate calls `relieve` on its own. Memoized results are
//! always recomputable, so relieving pressure early or never is safe.

use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::RwLock;

use crate::cache::synchronized::SynchronizedCache;
use crate::traits::Reclaim;

type ReclaimHandle = Weak<dyn Reclaim + Send + Sync>;

/// Shared list of caches to empty under memory pressure.
///
/// Cloning the registry shares the list.
///
/// # Example
///
/// ```
/// use memokit::cache::synchronized::SynchronizedCache;
/// use memokit::pressure::PressureRegistry;
///
/// let registry = PressureRegistry::new();
/// let cache = SynchronizedCache::new(8).unwrap();
/// registry.register_cache(&cache);
///
/// cache.get_or_compute(1u32, |k| k * 2);
/// assert_eq!(registry.relieve(), 1);
/// assert!(cache.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct PressureRegistry {
    targets: Arc<RwLock<Vec<ReclaimHandle>>>,
}

static GLOBAL_REGISTRY: OnceLock<PressureRegistry> = OnceLock::new();

impl PressureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry.
    pub fn global() -> &'static PressureRegistry {
        GLOBAL_REGISTRY.get_or_init(PressureRegistry::new)
    }

    /// Adds `handle`, forgetting any registered targets that were dropped.
    pub fn register(&self, handle: ReclaimHandle) {
        let mut targets = self.targets.write();
        targets.retain(|handle| handle.strong_count() > 0);
        targets.push(handle);
    }

    pub fn register_cache<K, V>(&self, cache: &SynchronizedCache<K, V>)
    where
        K: Eq + Hash + Clone + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        self.register(cache.reclaim_handle());
    }

    /// Reclaims every live registered target and forgets dropped ones.
    ///
    /// Returns the total number of entries discarded.
    pub fn relieve(&self) -> usize {
        let live: Vec<Arc<dyn Reclaim + Send + Sync>> = {
            let mut targets = self.targets.write();
            targets.retain(|handle| handle.strong_count() > 0);
            targets.iter().filter_map(Weak::upgrade).collect()
        };

        let discarded: usize = live.iter().map(|target| target.reclaim()).sum();
        tracing::info!(caches = live.len(), discarded, "relieved memory pressure");
        discarded
    }

    /// Number of registered targets that are still alive.
    pub fn len(&self) -> usize {
        self.targets
            .read()
            .iter()
            .filter(|handle| handle.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PressureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressureRegistry")
            .field("live", &self.len())
            .finish()
    }
}
