//! Two-argument memoization keyed by [`CompositeKey`].

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::cache::synchronized::SynchronizedCache;
use crate::error::ConfigError;
use crate::memo::key::CompositeKey;
use crate::traits::MemoCache;

/// Memoizing wrapper around a two-argument function.
///
/// Results are cached under `CompositeKey::new(a, b)`, so `apply(a, b)` and
/// `apply(b, a)` are memoized separately.
///
/// # Example
///
/// ```
/// use memokit::memo::binary::MemoizedBiFn;
///
/// let pow = MemoizedBiFn::new(|base: &u64, exp: &u32| base.pow(*exp));
/// assert_eq!(pow.apply(2, 10), 1024);
/// assert_eq!(pow.apply(10, 2), 100);
/// assert_eq!(pow.memoized_len(), 2);
/// ```
pub struct MemoizedBiFn<A, B, R, F, C = SynchronizedCache<CompositeKey<A, B>, R>> {
    delegate: F,
    cache: C,
    _marker: PhantomData<fn(&A, &B) -> R>,
}

impl<A, B, R, F> MemoizedBiFn<A, B, R, F, SynchronizedCache<CompositeKey<A, B>, R>>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&A, &B) -> R,
{
    pub fn new(delegate: F) -> Self {
        Self::with_cache(delegate, SynchronizedCache::default())
    }

    pub fn with_max_memoized(delegate: F, max_memoized: usize) -> Result<Self, ConfigError> {
        Ok(Self::with_cache(delegate, SynchronizedCache::new(max_memoized)?))
    }
}

impl<A, B, R, F, C> MemoizedBiFn<A, B, R, F, C> {
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

impl<A, B, R, F, C> MemoizedBiFn<A, B, R, F, C>
where
    A: Hash,
    B: Hash,
    F: Fn(&A, &B) -> R,
    C: MemoCache<CompositeKey<A, B>, R>,
{
    /// Returns `delegate(&a, &b)`, computing it at most once while resident.
    pub fn apply(&self, a: A, b: B) -> R {
        self.cache
            .get_or_compute(CompositeKey::new(a, b), |key| {
                (self.delegate)(key.first(), key.second())
            })
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn set_max_memoized(&self, max_memoized: usize) -> Result<(), ConfigError> {
        self.cache.set_max_size(max_memoized)
    }

    pub fn max_memoized(&self) -> usize {
        self.cache.max_size()
    }

    pub fn memoized_len(&self) -> usize {
        self.cache.len()
    }
}

impl<A, B, R, F, C> Clone for MemoizedBiFn<A, B, R, F, C>
where
    F: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            delegate: self.delegate.clone(),
            cache: self.cache.clone(),
            _marker: PhantomData,
        }
    }
}

impl<A, B, R, F, C: fmt::Debug> fmt::Debug for MemoizedBiFn<A, B, R, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizedBiFn")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Memoizes a two-argument `delegate` with the default bound.
pub fn memoize_bi<A, B, R, F>(delegate: F) -> MemoizedBiFn<A, B, R, F>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&A, &B) -> R,
{
    MemoizedBiFn::new(delegate)
}
