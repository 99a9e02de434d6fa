use std::collections::HashMap;
use std::hash::Hash;

/// A 1:1 map queryable by key or by value.
///
/// Both directions are stored, so keys and values are cloned on
/// insert. Inserting a pairing that would break the bijection evicts
/// the old pairings on both sides first.
#[derive(Debug)]
pub struct BidiMap<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
}

impl<K, V> BidiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        BidiMap {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }

    /// Pairs `key` with `value`, returning the value previously paired
    /// with `key`. Any existing pairing involving either side is
    /// dropped to keep the map 1:1.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(old_value) = self.forward.get(&key) {
            self.backward.remove(old_value);
        }
        if let Some(old_key) = self.backward.get(&value) {
            self.forward.remove(old_key);
        }
        let old = self.forward.insert(key.clone(), value.clone());
        self.backward.insert(value, key);
        old
    }

    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.backward.get(value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.backward.contains_key(value)
    }

    pub fn remove_by_key(&mut self, key: &K) -> Option<V> {
        let value = self.forward.remove(key)?;
        self.backward.remove(&value);
        Some(value)
    }

    pub fn remove_by_value(&mut self, value: &V) -> Option<K> {
        let key = self.backward.remove(value)?;
        self.forward.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Flips the map so values become keys.
    pub fn into_inverse(self) -> BidiMap<V, K> {
        BidiMap {
            forward: self.backward,
            backward: self.forward,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.forward.iter()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }
}

impl<K, V> Default for BidiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for BidiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BidiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BidiMap::new();
        map.extend(iter);
        map
    }
}
