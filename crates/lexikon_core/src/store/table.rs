//! Insertion-ordered record table.

use std::collections::HashMap;
use std::hash::Hash;

/// Map from id to record that iterates in insertion order.
#[derive(Debug, Clone)]
pub(crate) struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V> Table<K, V> {
    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.rows.get_mut(key)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    /// Inserts a new row. Returns `false` (and leaves the table untouched)
    /// when the key already exists.
    pub(crate) fn insert_new(&mut self, key: K, value: V) -> bool {
        if self.rows.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.rows.insert(key, value);
        true
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.rows.remove(key)?;
        self.order.retain(|existing| existing != key);
        Some(value)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|key| self.rows.get(key))
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}
