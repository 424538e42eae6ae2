//! Bounded LRU caches.
//!
//! - [`bounded::BoundedCache`]: single-owner cache, `&mut self` API.
//! - [`synchronized::SynchronizedCache`]: shared handle over
//!   `Arc<RwLock<BoundedCache>>`, safe to clone across threads.

pub mod bounded;
pub mod synchronized;

pub use bounded::{BoundedCache, DEFAULT_MAX_SIZE};
pub use synchronized::SynchronizedCache;
