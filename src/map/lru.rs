use std::hash::Hash;

use log::debug;

use super::linked::{LinkedMap, OrderedIter};

/// A bounded map that evicts its least-recently-used entry.
///
/// `get` and `insert` both count as a use and promote the entry to
/// most-recent; `peek` does not. The eldest entry sits at the front of
/// the underlying insertion-ordered map.
#[derive(Debug)]
pub struct LruMap<K, V> {
    entries: LinkedMap<K, V>,
    max_len: usize,
}

impl<K, V> LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Zero capacity rounds up to one.
    pub fn new(max_len: usize) -> Self {
        LruMap {
            entries: LinkedMap::new(),
            max_len: max_len.max(1),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.max_len
    }

    /// Returns the replaced value for an existing key, which is
    /// promoted rather than evicted. A fresh key on a full map evicts
    /// the least-recently-used entry first.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.entries.contains_key(&key) {
            let old = self.entries.insert(key.clone(), value);
            self.entries.move_to_back(&key);
            return old;
        }
        if self.is_full() {
            debug!("at capacity ({}), evicting least-recently-used", self.max_len);
            self.entries.pop_front();
        }
        self.entries.insert(key, value)
    }

    /// Promotes the entry to most-recently-used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.entries.move_to_back(key) {
            return None;
        }
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if !self.entries.move_to_back(key) {
            return None;
        }
        self.entries.get_mut(key)
    }

    /// Reads without disturbing the use order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.entries.pop_front()
    }

    /// Iterates least- to most-recently-used.
    pub fn iter(&self) -> OrderedIter<'_, K, V> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lru_keys<'a>(map: &'a LruMap<&'a str, i32>) -> Vec<&'a str> {
        map.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn evicts_least_recently_used_first() {
        let mut map = LruMap::new(3);
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        map.insert("d", 4);
        assert!(!map.contains_key(&"a"));
        assert_eq!(lru_keys(&map), ["b", "c", "d"]);
    }

    #[test]
    fn get_counts_as_a_use() {
        let mut map = LruMap::new(3);
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        assert_eq!(map.get(&"a"), Some(&1));
        map.insert("d", 4);
        // "b" was eldest once "a" was promoted.
        assert!(!map.contains_key(&"b"));
        assert_eq!(lru_keys(&map), ["c", "a", "d"]);
    }

    #[test]
    fn peek_does_not_promote() {
        let mut map = LruMap::new(2);
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.peek(&"a"), Some(&1));
        map.insert("c", 3);
        assert!(!map.contains_key(&"a"));
    }

    #[test]
    fn reinserting_promotes_instead_of_evicting() {
        let mut map = LruMap::new(2);
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 10), Some(1));
        assert_eq!(map.len(), 2);
        assert_eq!(lru_keys(&map), ["b", "a"]);
        map.insert("c", 3);
        assert!(!map.contains_key(&"b"));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut map = LruMap::new(4);
        for i in 0..100 {
            map.insert(i, i);
            assert!(map.len() <= 4);
        }
        assert_eq!(map.pop_lru(), Some((96, 96)));
    }

    #[test]
    fn zero_capacity_rounds_up() {
        let mut map = LruMap::new(0);
        map.insert("a", 1);
        assert_eq!(map.max_len(), 1);
        map.insert("b", 2);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&"b"));
    }
}
