//! Storage building blocks underneath the caches.
//!
//! ```text
//!   ReclaimableSlot ──► Option<LruStore> ──► FxHashMap<K, NodeId>
//!                                        └─► RecencyList<Entry<K, V>>
//! ```

pub mod lru;
pub mod recency;
pub mod slot;

pub use lru::LruStore;
pub use recency::{NodeId, RecencyList};
pub use slot::ReclaimableSlot;
