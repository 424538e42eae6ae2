//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache or memoizer is configured with
//!   invalid parameters (a zero bound, a missing delegate, conflicting
//!   builder inputs). Always reported at construction time.
//! - [`InvariantError`]: Returned by
//!   [`BoundedCache::check_invariants`](crate::cache::bounded::BoundedCache::check_invariants)
//!   when the internal index and recency list disagree.
//!
//! A cache miss is not an error: lookups return `Option`. Failures raised by a
//! memoized computation belong to the caller and are never wrapped here.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::cache::bounded::BoundedCache;
//! use memokit::error::ConfigError;
//!
//! let cache: Result<BoundedCache<String, i32>, ConfigError> = BoundedCache::new(100);
//! assert!(cache.is_ok());
//!
//! let bad = BoundedCache::<String, i32>::new(0);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

/// Error returned when cache configuration parameters are invalid.
///
/// # Example
///
/// ```
/// use memokit::cache::bounded::BoundedCache;
///
/// let err = BoundedCache::<u64, u64>::new(0).unwrap_err();
/// assert!(err.to_string().contains("max_size"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn zero_max_size() -> Self {
        Self::new("max_size must be greater than 0")
    }
}

/// Error returned when internal cache invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("max_size must be greater than 0");
        assert_eq!(err.to_string(), "max_size must be greater than 0");
        assert_eq!(err.message(), "max_size must be greater than 0");
    }

    #[test]
    fn zero_max_size_names_the_parameter() {
        assert!(ConfigError::zero_max_size().message().contains("max_size"));
    }

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/list length mismatch");
        assert_eq!(err.to_string(), "index/list length mismatch");
        let copy = err.clone();
        assert_eq!(err, copy);
    }

    #[test]
    fn both_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
        assert_error::<InvariantError>();
    }
}
