//! Canonical shared instances of immutable values.
//!
//! An [`Interner`] hands out one `Arc<T>` per distinct value, so equal values
//! requested from different places share a single allocation and compare
//! pointer-equal. Entries are never evicted; use it for small, closed sets
//! such as error codes or identifiers, typically held in a `static`
//! [`LazyLock`](std::sync::LazyLock).
//!
//! Lookups take the read lock. A miss re-checks under the write lock before
//! inserting, so two racing callers still receive the same instance.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Thread-safe pool of canonical `Arc<T>` instances.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, LazyLock};
/// use memokit::intern::Interner;
///
/// static CODES: LazyLock<Interner<String>> = LazyLock::new(Interner::new);
///
/// let a = CODES.intern("E042");
/// let b = CODES.intern("E042");
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(CODES.len(), 1);
/// ```
pub struct Interner<T> {
    pool: RwLock<FxHashMap<T, Arc<T>>>,
}

impl<T> Interner<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            pool: RwLock::new(FxHashMap::default()),
        }
    }

    /// Returns the canonical instance equal to `value`, creating it on first use.
    pub fn intern<Q>(&self, value: &Q) -> Arc<T>
    where
        T: Borrow<Q>,
        Q: ToOwned<Owned = T> + Hash + Eq + ?Sized,
    {
        if let Some(existing) = self.pool.read().get(value) {
            return Arc::clone(existing);
        }

        let mut pool = self.pool.write();
        if let Some(existing) = pool.get(value) {
            return Arc::clone(existing);
        }
        let owned = value.to_owned();
        let shared = Arc::new(owned.clone());
        pool.insert(owned, Arc::clone(&shared));
        shared
    }

    /// Returns the canonical instance if `value` was interned before.
    pub fn get<Q>(&self, value: &Q) -> Option<Arc<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pool.read().get(value).cloned()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pool.read().contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.pool.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.read().is_empty()
    }
}

impl<T> Default for Interner<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Interner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.pool.read().len())
            .finish()
    }
}
