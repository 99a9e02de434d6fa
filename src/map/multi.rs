use std::collections::HashMap;
use std::hash::Hash;

/// A map from keys to any number of values.
///
/// Values under one key keep their insertion order. `len` counts keys;
/// `total_len` counts every value.
#[derive(Debug)]
pub struct MultiMap<K, V> {
    inner: HashMap<K, Vec<V>>,
    total: usize,
}

impl<K, V> MultiMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        MultiMap {
            inner: HashMap::new(),
            total: 0,
        }
    }

    /// Appends `value` under `key`.
    pub fn insert(&mut self, key: K, value: V) {
        self.inner.entry(key).or_default().push(value);
        self.total += 1;
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.inner.get(key).map(|values| values.as_slice())
    }

    /// Removes every value under `key`.
    pub fn remove(&mut self, key: &K) -> Option<Vec<V>> {
        let values = self.inner.remove(key)?;
        self.total -= values.len();
        Some(values)
    }

    /// Removes one occurrence of `value` under `key`; the key goes
    /// with its last value.
    pub fn remove_value(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        let Some(values) = self.inner.get_mut(key) else {
            return false;
        };
        let Some(at) = values.iter().position(|v| v == value) else {
            return false;
        };
        values.remove(at);
        self.total -= 1;
        if values.is_empty() {
            self.inner.remove(key);
        }
        true
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Looks for `value` under any key.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.values().any(|values| values.contains(value))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of values across every key.
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.inner.keys()
    }

    /// Iterates keys with their value slices.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> + '_ {
        self.inner
            .iter()
            .map(|(key, values)| (key, values.as_slice()))
    }

    /// Iterates every (key, value) pair.
    pub fn flat_iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.inner
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key, v)))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}

impl<K: Eq + Hash, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for MultiMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for MultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MultiMap::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn collects_values_per_key() {
        let map: MultiMap<_, _> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(map.get(&"a"), Some(&[1, 3][..]));
        assert_eq!(map.get(&"b"), Some(&[2][..]));
        assert_eq!(map.len(), 2);
        assert_eq!(map.total_len(), 3);
    }

    #[test]
    fn remove_value_takes_one_occurrence() {
        let mut map: MultiMap<_, _> = [("a", 1), ("a", 2), ("a", 1)].into_iter().collect();
        assert!(map.remove_value(&"a", &1));
        assert_eq!(map.get(&"a"), Some(&[2, 1][..]));
        assert_eq!(map.total_len(), 2);
        assert!(!map.remove_value(&"a", &9));
        assert!(!map.remove_value(&"b", &1));
    }

    #[test]
    fn key_disappears_with_its_last_value() {
        let mut map = MultiMap::new();
        map.insert("a", 1);
        assert!(map.remove_value(&"a", &1));
        assert!(!map.contains_key(&"a"));
        assert!(map.is_empty());
        assert_eq!(map.total_len(), 0);
    }

    #[test]
    fn contains_value_scans_every_key() {
        let map: MultiMap<_, _> = [("a", 1), ("b", 2)].into_iter().collect();
        assert!(map.contains_value(&2));
        assert!(!map.contains_value(&3));
    }

    #[test]
    fn flat_iter_visits_every_pair() {
        let map: MultiMap<_, _> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(map.flat_iter().count(), 3);
        let total: i32 = map.flat_iter().map(|(_, v)| *v).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn remove_returns_the_whole_list() {
        let mut map: MultiMap<_, _> = [("a", 1), ("a", 2)].into_iter().collect();
        assert_eq!(map.remove(&"a"), Some(vec![1, 2]));
        assert_eq!(map.remove(&"a"), None);
        assert_eq!(map.total_len(), 0);
    }
}
