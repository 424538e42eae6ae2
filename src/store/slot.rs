//! Indirection cell whose backing store can be dropped wholesale.
//!
//! A [`ReclaimableSlot`] is either occupied by an [`LruStore`] or reclaimed.
//! Reclaimed reads behave exactly like an empty store; only the write path
//! ([`get_or_create`](ReclaimableSlot::get_or_create)) brings a store back.

use std::hash::Hash;

use crate::store::lru::LruStore;

/// Initial index capacity of a freshly created store, capped by the bound.
const INITIAL_STORE_CAPACITY: usize = 16;

#[derive(Debug)]
pub struct ReclaimableSlot<K, V> {
    store: Option<LruStore<K, V>>,
}

impl<K, V> ReclaimableSlot<K, V> {
    /// Creates a slot with no store; the first write allocates one.
    pub fn empty() -> Self {
        Self { store: None }
    }
}

impl<K, V> ReclaimableSlot<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn is_reclaimed(&self) -> bool {
        self.store.is_none()
    }

    pub fn get(&self) -> Option<&LruStore<K, V>> {
        self.store.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut LruStore<K, V>> {
        self.store.as_mut()
    }

    /// Returns the live store, creating one sized for `max_size` if needed.
    pub fn get_or_create(&mut self, max_size: usize) -> &mut LruStore<K, V> {
        if self.store.is_none() {
            tracing::trace!(max_size, "allocating backing store");
        }
        self.store
            .get_or_insert_with(|| LruStore::with_capacity(max_size.min(INITIAL_STORE_CAPACITY)))
    }

    /// Drops the store; returns how many entries went with it.
    pub fn reclaim(&mut self) -> usize {
        self.store.take().map_or(0, |store| store.len())
    }

    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, LruStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for ReclaimableSlot<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_reads_as_empty() {
        let slot: ReclaimableSlot<u8, u8> = ReclaimableSlot::empty();
        assert!(slot.is_reclaimed());
        assert!(slot.get().is_none());
        assert_eq!(slot.len(), 0);
        assert!(slot.is_empty());
    }

    #[test]
    fn get_or_create_is_lazy_and_stable() {
        let mut slot = ReclaimableSlot::empty();
        slot.get_or_create(8).push(1, "one");
        assert!(!slot.is_reclaimed());

        slot.get_or_create(8).push(2, "two");
        assert_eq!(slot.len(), 2);
    }

    #[test]
    fn reclaim_reports_discarded_entries() {
        let mut slot = ReclaimableSlot::empty();
        {
            let store = slot.get_or_create(4);
            store.push('a', 1);
            store.push('b', 2);
        }
        assert_eq!(slot.reclaim(), 2);
        assert!(slot.is_reclaimed());
        assert_eq!(slot.reclaim(), 0);
        assert!(slot.get_mut().is_none());
    }
}
