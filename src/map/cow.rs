use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

/// A copy-on-write map for read-mostly workloads.
///
/// Readers clone an `Arc` snapshot and never wait on writers for
/// longer than the pointer swap; writers clone the current map, apply
/// the change, and swap the snapshot in. Writes are O(n), so this
/// suits tables that are built once and consulted constantly.
pub struct CowMap<K, V> {
    snapshot: RwLock<Arc<HashMap<K, V>>>,
}

impl<K, V> CowMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        CowMap {
            snapshot: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// The current snapshot. Stays coherent while held, even across
    /// concurrent writes, which build their own copies.
    pub fn snapshot(&self) -> Arc<HashMap<K, V>> {
        self.snapshot.read().clone()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.snapshot.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.snapshot.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.snapshot.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.read().is_empty()
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut guard = self.snapshot.write();
        let mut next: HashMap<K, V> = (**guard).clone();
        let old = next.insert(key, value);
        *guard = Arc::new(next);
        old
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut guard = self.snapshot.write();
        let mut next: HashMap<K, V> = (**guard).clone();
        let old = next.remove(key);
        *guard = Arc::new(next);
        old
    }

    pub fn clear(&self) {
        *self.snapshot.write() = Arc::new(HashMap::new());
    }
}

impl<K, V> Default for CowMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::thread::spawn;

    use super::*;

    #[test]
    fn reads_see_writes() {
        let map = CowMap::new();
        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("a", 2), Some(1));
        assert_eq!(map.get(&"a"), Some(2));
        assert_eq!(map.remove(&"a"), Some(2));
        assert!(map.is_empty());
    }

    #[test]
    fn held_snapshots_do_not_move() {
        let map = CowMap::new();
        map.insert("a", 1);
        let before = map.snapshot();
        map.insert("b", 2);
        assert_eq!(before.len(), 1);
        assert_eq!(map.len(), 2);
        assert_eq!(before.get("a"), Some(&1));
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let map = Arc::new(CowMap::new());
        map.insert(0u32, 0u32);

        let writer = {
            let map = map.clone();
            spawn(move || {
                for i in 1..100 {
                    map.insert(i, i);
                }
            })
        };
        let reader = {
            let map = map.clone();
            spawn(move || {
                for _ in 0..100 {
                    // Key 0 predates both threads and must always be
                    // visible.
                    assert_eq!(map.get(&0), Some(0));
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(map.len(), 100);
    }
}
