use std::collections::HashMap;
use std::hash::Hash;

use crate::functor::Factory;

/// A map that manufactures missing values on demand.
///
/// `get` never comes back empty-handed: absent keys are populated from
/// the factory first. `peek` looks up without manufacturing.
#[derive(Debug)]
pub struct LazyMap<K, V, F> {
    inner: HashMap<K, V>,
    factory: F,
}

impl<K, V, F> LazyMap<K, V, F>
where
    K: Eq + Hash,
    F: Factory<V>,
{
    pub fn new(factory: F) -> Self {
        LazyMap {
            inner: HashMap::new(),
            factory,
        }
    }

    /// The value under `key`, created if absent.
    pub fn get(&mut self, key: K) -> &V {
        let LazyMap { inner, factory } = self;
        inner.entry(key).or_insert_with(|| factory.create())
    }

    pub fn get_mut(&mut self, key: K) -> &mut V {
        let LazyMap { inner, factory } = self;
        inner.entry(key).or_insert_with(|| factory.create())
    }

    /// Looks up without manufacturing.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.inner.iter()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Takes the populated map, dropping the factory.
    pub fn into_inner(self) -> HashMap<K, V> {
        self.inner
    }
}
