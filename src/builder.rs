//! Configuration and builders for caches and memoizers.
//!
//! [`CacheConfig`] carries the one tunable, `max_size`. [`CacheBuilder`]
//! turns it into a [`BoundedCache`] or a [`SynchronizedCache`];
//! [`MemoizeBuilder`] assembles a [`MemoizedFn`] or [`MemoizedBiFn`] from a
//! delegate plus either an injected cache or a bound.
//!
//! Every builder validates on `build*`, never later.
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::{CacheBuilder, MemoizeBuilder};
//! use memokit::pressure::PressureRegistry;
//!
//! let registry = PressureRegistry::new();
//! let cache = CacheBuilder::new()
//!     .max_size(64)
//!     .reclaim_under(&registry)
//!     .build::<u64, String>()
//!     .unwrap();
//! assert_eq!(cache.max_size(), 64);
//! assert_eq!(registry.len(), 1);
//!
//! let shout = MemoizeBuilder::new()
//!     .delegate(|s: &String| s.to_uppercase())
//!     .max_memoized(16)
//!     .build()
//!     .unwrap();
//! assert_eq!(shout.apply("hi".to_string()), "HI");
//! ```

use std::hash::Hash;

use crate::cache::bounded::{BoundedCache, DEFAULT_MAX_SIZE};
use crate::cache::synchronized::SynchronizedCache;
use crate::error::ConfigError;
use crate::memo::binary::MemoizedBiFn;
use crate::memo::key::CompositeKey;
use crate::memo::unary::MemoizedFn;
use crate::pressure::PressureRegistry;

/// Cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident entries; must be greater than 0.
    pub max_size: usize,
}

impl CacheConfig {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::zero_max_size());
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Default)]
pub struct CacheBuilder {
    config: CacheConfig,
    registry: Option<PressureRegistry>,
}

impl CacheBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self {
            config,
            registry: None,
        }
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.config.max_size = max_size;
        self
    }

    /// Registers caches built by [`build`](Self::build) with `registry`.
    pub fn reclaim_under(mut self, registry: &PressureRegistry) -> Self {
        self.registry = Some(registry.clone());
        self
    }

    /// Builds a single-owner cache. A configured registry is ignored: only
    /// shared caches can be reclaimed from outside.
    pub fn build_bounded<K, V>(&self) -> Result<BoundedCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        BoundedCache::from_config(&self.config)
    }

    /// Builds a shared cache and registers it for pressure relief if a
    /// registry was configured.
    ///
    /// # Example
    ///
    /// ```rust
    /// use memokit::builder::CacheBuilder;
    ///
    /// let cache = CacheBuilder::new().build::<&str, usize>().unwrap();
    /// assert_eq!(cache.max_size(), 1024);
    ///
    /// assert!(CacheBuilder::new().max_size(0).build::<&str, usize>().is_err());
    /// ```
    pub fn build<K, V>(&self) -> Result<SynchronizedCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let cache = SynchronizedCache::from_bounded(self.build_bounded()?);
        if let Some(registry) = &self.registry {
            registry.register_cache(&cache);
        }
        Ok(cache)
    }
}

/// Builder for [`MemoizedFn`] and [`MemoizedBiFn`].
///
/// A delegate is required. The cache is either injected with
/// [`cache`](Self::cache) or created from [`max_memoized`](Self::max_memoized)
/// (default 1024); supplying both is a configuration error.
pub struct MemoizeBuilder<K, R, F> {
    delegate: Option<F>,
    cache: Option<SynchronizedCache<K, R>>,
    max_memoized: Option<usize>,
    registry: Option<PressureRegistry>,
}

impl<K, R, F> MemoizeBuilder<K, R, F> {
    pub fn new() -> Self {
        Self {
            delegate: None,
            cache: None,
            max_memoized: None,
            registry: None,
        }
    }

    pub fn delegate(mut self, delegate: F) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Memoizes through an existing, possibly shared, cache.
    pub fn cache(mut self, cache: SynchronizedCache<K, R>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn max_memoized(mut self, max_memoized: usize) -> Self {
        self.max_memoized = Some(max_memoized);
        self
    }

    pub fn reclaim_under(mut self, registry: &PressureRegistry) -> Self {
        self.registry = Some(registry.clone());
        self
    }
}

impl<K, R, F> MemoizeBuilder<K, R, F>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn into_parts(self) -> Result<(F, SynchronizedCache<K, R>), ConfigError> {
        let delegate = self
            .delegate
            .ok_or_else(|| ConfigError::new("memoizer requires a delegate function"))?;

        let cache = match (self.cache, self.max_memoized) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::new("cannot set both a cache and max_memoized"));
            },
            (Some(cache), None) => cache,
            (None, max_memoized) => {
                SynchronizedCache::new(max_memoized.unwrap_or(DEFAULT_MAX_SIZE))?
            },
        };

        if let Some(registry) = &self.registry {
            registry.register_cache(&cache);
        }
        Ok((delegate, cache))
    }
}

impl<A, R, F> MemoizeBuilder<A, R, F>
where
    A: Eq + Hash + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(&A) -> R,
{
    pub fn build(self) -> Result<MemoizedFn<A, R, F>, ConfigError> {
        let (delegate, cache) = self.into_parts()?;
        Ok(MemoizedFn::with_cache(delegate, cache))
    }
}

impl<A, B, R, F> MemoizeBuilder<CompositeKey<A, B>, R, F>
where
    A: Eq + Hash + Clone + Send + Sync + 'static,
    B: Eq + Hash + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    F: Fn(&A, &B) -> R,
{
    pub fn build_bi(self) -> Result<MemoizedBiFn<A, B, R, F>, ConfigError> {
        let (delegate, cache) = self.into_parts()?;
        Ok(MemoizedBiFn::with_cache(delegate, cache))
    }
}

impl<K, R, F> Default for MemoizeBuilder<K, R, F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mod config {
        use super::*;

        #[test]
        fn default_config_uses_default_bound() {
            let config = CacheConfig::default();
            assert_eq!(config.max_size, 1024);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn zero_bound_is_invalid() {
            let err = CacheConfig::new(0).validate().unwrap_err();
            assert_eq!(err.message(), "max_size must be greater than 0");
        }
    }

    mod cache_builder {
        use super::*;

        #[test]
        fn builds_bounded_and_synchronized() {
            let builder = CacheBuilder::from_config(CacheConfig::new(3));
            let bounded: BoundedCache<u8, u8> = builder.build_bounded().unwrap();
            assert_eq!(bounded.max_size(), 3);

            let shared = builder.build::<u8, u8>().unwrap();
            assert_eq!(shared.max_size(), 3);
        }

        #[test]
        fn rejects_zero_bound() {
            assert!(CacheBuilder::new().max_size(0).build_bounded::<u8, u8>().is_err());
            assert!(CacheBuilder::new().max_size(0).build::<u8, u8>().is_err());
        }

        #[test]
        fn registers_with_registry() {
            let registry = PressureRegistry::new();
            let cache = CacheBuilder::new()
                .max_size(4)
                .reclaim_under(&registry)
                .build::<u32, u32>()
                .unwrap();
            cache.get_or_compute(1, |k| *k);

            assert_eq!(registry.len(), 1);
            assert_eq!(registry.relieve(), 1);
            assert!(cache.is_empty());
        }
    }

    mod memoize_builder {
        use super::*;

        #[test]
        fn missing_delegate_is_an_error() {
            let builder: MemoizeBuilder<u8, u8, fn(&u8) -> u8> = MemoizeBuilder::new();
            let err = builder.build().unwrap_err();
            assert!(err.message().contains("delegate"));
        }

        #[test]
        fn cache_and_bound_conflict() {
            let cache: SynchronizedCache<u8, u8> = SynchronizedCache::new(2).unwrap();
            let err = MemoizeBuilder::new()
                .delegate(|x: &u8| *x)
                .cache(cache)
                .max_memoized(4)
                .build()
                .unwrap_err();
            assert!(err.message().contains("both"));
        }

        #[test]
        fn zero_bound_is_an_error() {
            let result = MemoizeBuilder::new()
                .delegate(|x: &u8| *x)
                .max_memoized(0)
                .build();
            assert!(result.is_err());
        }

        #[test]
        fn default_cache_when_none_given() {
            let memo = MemoizeBuilder::new().delegate(|x: &u8| *x).build().unwrap();
            assert_eq!(memo.max_memoized(), DEFAULT_MAX_SIZE);
        }

        #[test]
        fn injected_cache_is_shared() {
            let cache: SynchronizedCache<u32, u32> = SynchronizedCache::new(8).unwrap();
            let memo = MemoizeBuilder::new()
                .delegate(|x: &u32| x * 3)
                .cache(cache.clone())
                .build()
                .unwrap();
            assert_eq!(memo.apply(5), 15);
            assert_eq!(cache.get(&5), Some(15));
        }

        #[test]
        fn builds_binary_memoizer() {
            let calls = AtomicUsize::new(0);
            let memo: MemoizedBiFn<u8, u8, u16, _> = MemoizeBuilder::new()
                .delegate(|a: &u8, b: &u8| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    u16::from(*a) * u16::from(*b)
                })
                .max_memoized(8)
                .build_bi()
                .unwrap();

            assert_eq!(memo.apply(12, 12), 144);
            assert_eq!(memo.apply(12, 12), 144);
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn registered_memoizer_is_relieved() {
            let registry = PressureRegistry::new();
            let memo = MemoizeBuilder::new()
                .delegate(|x: &u64| x + 1)
                .reclaim_under(&registry)
                .build()
                .unwrap();
            memo.apply(1);
            memo.apply(2);

            assert_eq!(registry.relieve(), 2);
            assert_eq!(memo.memoized_len(), 0);
        }
    }
}
