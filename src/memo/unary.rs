//! Single-argument memoization.
//!
//! [`MemoizedFn`] pairs a delegate `Fn(&A) -> R` with a [`MemoCache`] keyed
//! by the argument. Calling [`apply`](MemoizedFn::apply) returns the cached
//! result when one is resident and otherwise runs the delegate once.
//!
//! ```text
//!   apply(arg) ──► cache.get_or_compute(arg, |a| delegate(a)) ──► R
//!                      │ hit: resident value, recency refreshed
//!                      └ miss: delegate runs once, result stored
//! ```
//!
//! The cache defaults to a private [`SynchronizedCache`]; pass a clone of an
//! existing one to [`MemoizedFn::with_cache`] to share results between
//! memoizers.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::cache::synchronized::SynchronizedCache;
use crate::error::ConfigError;
use crate::traits::MemoCache;

/// Memoizing wrapper around a single-argument function.
///
/// # Example
///
/// ```
/// use memokit::memo::unary::MemoizedFn;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = AtomicUsize::new(0);
/// let len = MemoizedFn::new(|s: &String| {
///     calls.fetch_add(1, Ordering::Relaxed);
///     s.len()
/// });
///
/// assert_eq!(len.apply("hello".to_string()), 5);
/// assert_eq!(len.apply("hello".to_string()), 5);
/// assert_eq!(calls.load(Ordering::Relaxed), 1);
/// ```
pub struct MemoizedFn<A, R, F, C = SynchronizedCache<A, R>> {
    delegate: F,
    cache: C,
    _marker: PhantomData<fn(&A) -> R>,
}

impl<A, R, F> MemoizedFn<A, R, F, SynchronizedCache<A, R>>
where
    A: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&A) -> R,
{
    /// Memoizes `delegate` with a private cache of
    /// [`DEFAULT_MAX_SIZE`](crate::cache::bounded::DEFAULT_MAX_SIZE) entries.
    pub fn new(delegate: F) -> Self {
        Self::with_cache(delegate, SynchronizedCache::default())
    }

    /// Memoizes `delegate` with a private cache of `max_memoized` entries.
    pub fn with_max_memoized(delegate: F, max_memoized: usize) -> Result<Self, ConfigError> {
        Ok(Self::with_cache(delegate, SynchronizedCache::new(max_memoized)?))
    }
}

impl<A, R, F, C> MemoizedFn<A, R, F, C> {
    /// Memoizes `delegate` through an existing cache.
    pub fn with_cache(delegate: F, cache: C) -> Self {
        Self {
            delegate,
            cache,
            _marker: PhantomData,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn delegate(&self) -> &F {
        &self.delegate
    }
}

impl<A, R, F, C> MemoizedFn<A, R, F, C>
where
    F: Fn(&A) -> R,
    C: MemoCache<A, R>,
{
    /// Returns `delegate(&arg)`, computing it at most once while resident.
    ///
    /// A panicking delegate propagates to the caller and nothing is cached.
    pub fn apply(&self, arg: A) -> R {
        self.cache.get_or_compute(arg, &self.delegate)
    }

    /// Forgets every memoized result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Changes how many results are kept; takes effect on the next insertion.
    pub fn set_max_memoized(&self, max_memoized: usize) -> Result<(), ConfigError> {
        self.cache.set_max_size(max_memoized)
    }

    pub fn max_memoized(&self) -> usize {
        self.cache.max_size()
    }

    /// Number of results currently memoized.
    pub fn memoized_len(&self) -> usize {
        self.cache.len()
    }
}

impl<A, R, F, C> Clone for MemoizedFn<A, R, F, C>
where
    F: Clone,
    C: Clone,
{
    /// Clones share the cache when `C` is a shared handle.
    fn clone(&self) -> Self {
        Self {
            delegate: self.delegate.clone(),
            cache: self.cache.clone(),
            _marker: PhantomData,
        }
    }
}

impl<A, R, F, C: fmt::Debug> fmt::Debug for MemoizedFn<A, R, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizedFn")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Memoizes `delegate` with the default bound.
///
/// ```
/// let double = memokit::memo::memoize(|x: &u32| x * 2);
/// assert_eq!(double.apply(21), 42);
/// ```
pub fn memoize<A, R, F>(delegate: F) -> MemoizedFn<A, R, F>
where
    A: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&A) -> R,
{
    MemoizedFn::new(delegate)
}
