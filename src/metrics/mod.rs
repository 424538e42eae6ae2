//! Hit/miss and eviction counters, compiled in with the `metrics` feature.
//!
//! Recording and reading are split the same way as the caches themselves:
//! [`CacheMetrics`] only records (through `&self`, so the shared-lock read
//! path can count hits), and [`MetricsSnapshotProvider`] only reads.

pub mod recorder;
pub mod snapshot;

pub use recorder::CacheMetrics;
pub use snapshot::{CacheMetricsSnapshot, MetricsSnapshotProvider};
