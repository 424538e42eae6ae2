//! Access-ordered key/value storage.
//!
//! [`LruStore`] pairs an `FxHashMap<K, NodeId>` index with a [`RecencyList`]
//! of `(K, V)` entries. It knows nothing about bounds; the owning
//! [`BoundedCache`](crate::cache::bounded::BoundedCache) decides when to call
//! [`pop_lru`](LruStore::pop_lru).

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::store::recency::{NodeId, RecencyList};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Hash index plus recency list; front of the list is the MRU entry.
#[derive(Debug)]
pub struct LruStore<K, V> {
    index: FxHashMap<K, NodeId>,
    order: RecencyList<Entry<K, V>>,
}

impl<K, V> LruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: RecencyList::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Marks `key` as most recently used and returns its handle.
    pub fn touch(&mut self, key: &K) -> Option<NodeId> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        Some(id)
    }

    /// Lookup that refreshes recency.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.touch(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Lookup that leaves recency untouched.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Value behind a handle returned by [`touch`](Self::touch) or
    /// [`push`](Self::push).
    ///
    /// # Panics
    ///
    /// Panics if the entry has since been removed.
    pub fn value(&self, id: NodeId) -> &V {
        &self.order[id].value
    }

    /// Inserts a key that is not yet present at the MRU position.
    ///
    /// An existing mapping for `key` is replaced and its old value returned.
    pub fn push(&mut self, key: K, value: V) -> (NodeId, Option<V>) {
        let previous = self.remove(&key);
        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        (id, previous)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Key of the least recently used entry.
    pub fn peek_lru(&self) -> Option<&K> {
        self.order.back().map(|entry| &entry.key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Checks that the index and the recency list describe the same entries.
    pub fn validate(&self) -> Result<(), String> {
        self.order.validate()?;
        if self.order.len() != self.index.len() {
            return Err(format!(
                "index holds {} keys but recency list holds {} entries",
                self.index.len(),
                self.order.len()
            ));
        }
        for entry in self.order.iter() {
            let id = self
                .index
                .get(&entry.key)
                .ok_or_else(|| "listed entry missing from index".to_string())?;
            if !self.order.contains(*id) {
                return Err("index points at a freed node".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<K: Clone + Eq + Hash, V>(store: &LruStore<K, V>) -> Vec<K> {
        store.keys().cloned().collect()
    }

    #[test]
    fn push_and_get() {
        let mut store = LruStore::with_capacity(4);
        store.push("a", 1);
        store.push("b", 2);

        assert_eq!(store.get(&"a"), Some(&1));
        assert_eq!(store.get(&"z"), None);
        assert_eq!(store.len(), 2);
        store.validate().unwrap();
    }

    #[test]
    fn get_refreshes_recency_but_peek_does_not() {
        let mut store = LruStore::with_capacity(4);
        store.push(1, "one");
        store.push(2, "two");
        store.push(3, "three");

        assert_eq!(store.peek(&1), Some(&"one"));
        assert_eq!(store.peek_lru(), Some(&1));

        assert_eq!(store.get(&1), Some(&"one"));
        assert_eq!(keys(&store), vec![1, 3, 2]);
        assert_eq!(store.peek_lru(), Some(&2));
    }

    #[test]
    fn push_existing_key_replaces_value() {
        let mut store = LruStore::with_capacity(4);
        store.push("k", 1);
        store.push("other", 2);
        let (id, previous) = store.push("k", 10);

        assert_eq!(previous, Some(1));
        assert_eq!(*store.value(id), 10);
        assert_eq!(store.len(), 2);
        assert_eq!(keys(&store), vec!["k", "other"]);
        store.validate().unwrap();
    }

    #[test]
    fn pop_lru_keeps_index_in_sync() {
        let mut store = LruStore::with_capacity(4);
        store.push(1, 'a');
        store.push(2, 'b');

        assert_eq!(store.pop_lru(), Some((1, 'a')));
        assert!(!store.contains(&1));
        assert_eq!(store.pop_lru(), Some((2, 'b')));
        assert_eq!(store.pop_lru(), None);
        assert!(store.is_empty());
        store.validate().unwrap();
    }

    #[test]
    fn remove_missing_is_none() {
        let mut store: LruStore<u32, u32> = LruStore::with_capacity(1);
        assert_eq!(store.remove(&7), None);
        store.push(7, 49);
        assert_eq!(store.remove(&7), Some(49));
        assert_eq!(store.touch(&7), None);
    }
}
