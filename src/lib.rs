//! memokit: bounded LRU caches with memory-pressure reclamation, and
//! function memoization built on them.
//!
//! ## Layers
//!
//! ```text
//!   memo::{MemoizedFn, MemoizedBiFn}      delegate + MemoCache
//!              │
//!   cache::SynchronizedCache              Arc<RwLock<BoundedCache>>
//!              │
//!   cache::BoundedCache                   bound + LRU eviction
//!              │
//!   store::ReclaimableSlot                Option<LruStore>, droppable
//!              │
//!   store::{LruStore, RecencyList}        index + recency order
//! ```
//!
//! [`pressure::PressureRegistry`] reaches shared caches through weak handles
//! and drops their stores on request. [`intern::Interner`] keeps canonical
//! shared instances of immutable values.
//!
//! ## Quick Start
//!
//! ```
//! use memokit::prelude::*;
//!
//! let digits = memoize(|n: &u32| (1..=*n).map(|i| i.to_string()).collect::<String>());
//! assert_eq!(digits.apply(5), "12345");
//!
//! let cache = SynchronizedCache::new(2).unwrap();
//! for key in ["a", "b", "c"] {
//!     cache.get_or_compute(key, |k| k.len());
//! }
//! assert!(!cache.contains(&"a"));
//! ```

pub mod builder;
pub mod cache;
pub mod error;
pub mod intern;
pub mod memo;
pub mod pressure;
pub mod prelude;
pub mod store;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
