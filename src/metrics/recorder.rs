use std::sync::atomic::{AtomicU64, Ordering};

/// Counters owned by one [`BoundedCache`](crate::cache::bounded::BoundedCache).
///
/// Relaxed atomics: counters are observational and never order other memory.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    removals: AtomicU64,
    reclamations: AtomicU64,
}

impl CacheMetrics {
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lookup(&self, hit: bool) {
        if hit {
            self.record_hit();
        } else {
            self.record_miss();
        }
    }

    #[inline]
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a whole-store discard (clear or memory pressure).
    #[inline]
    pub fn record_reclamation(&self) {
        self.reclamations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    pub fn reclamations(&self) -> u64 {
        self.reclamations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_increment() {
        let metrics = CacheMetrics::default();
        assert_eq!(metrics.hits(), 0);

        metrics.record_lookup(true);
        metrics.record_lookup(false);
        metrics.record_lookup(false);
        metrics.record_insert();
        metrics.record_eviction();
        metrics.record_removal();
        metrics.record_reclamation();

        assert_eq!(metrics.hits(), 1);
        assert_eq!(metrics.misses(), 2);
        assert_eq!(metrics.inserts(), 1);
        assert_eq!(metrics.evictions(), 1);
        assert_eq!(metrics.removals(), 1);
        assert_eq!(metrics.reclamations(), 1);
    }
}
