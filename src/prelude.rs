pub use crate::builder::{CacheBuilder, CacheConfig, MemoizeBuilder};
pub use crate::cache::bounded::{BoundedCache, DEFAULT_MAX_SIZE};
pub use crate::cache::synchronized::SynchronizedCache;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::intern::Interner;
pub use crate::memo::binary::{MemoizedBiFn, memoize_bi};
pub use crate::memo::key::CompositeKey;
pub use crate::memo::unary::{MemoizedFn, memoize};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{CacheMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::pressure::PressureRegistry;
pub use crate::traits::{MemoCache, Reclaim};
