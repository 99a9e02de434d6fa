use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;

/// Entries held inline before spilling.
const INLINE_MAX: usize = 3;

/// A map optimized for three or fewer entries.
///
/// Small maps live in a flat inline array probed linearly, with no
/// hashing and no heap allocation. The fourth distinct key spills the
/// map into a `HashMap`; removals never convert back, though `clear`
/// resets to inline storage.
#[derive(Debug)]
pub struct Flat3Map<K, V> {
    store: Store<K, V>,
}

#[derive(Debug)]
enum Store<K, V> {
    Inline {
        entries: [Option<(K, V)>; INLINE_MAX],
        len: usize,
    },
    Spilled(HashMap<K, V>),
}

impl<K, V> Flat3Map<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Flat3Map {
            store: Store::Inline {
                entries: [None, None, None],
                len: 0,
            },
        }
    }

    pub fn len(&self) -> usize {
        match &self.store {
            Store::Inline { len, .. } => *len,
            Store::Spilled(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the map still fits in inline storage.
    pub fn is_inline(&self) -> bool {
        matches!(self.store, Store::Inline { .. })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.store {
            Store::Inline { entries, len } => entries[..*len]
                .iter()
                .filter_map(|slot| slot.as_ref())
                .find(|entry| entry.0 == *key)
                .map(|entry| &entry.1),
            Store::Spilled(map) => map.get(key),
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Store::Spilled(map) = &mut self.store {
            return map.insert(key, value);
        }

        let Store::Inline { entries, len } = &mut self.store else {
            unreachable!()
        };
        for slot in entries[..*len].iter_mut() {
            let entry = slot.as_mut().expect("inline slot is occupied");
            if entry.0 == key {
                return Some(mem::replace(&mut entry.1, value));
            }
        }
        if *len < INLINE_MAX {
            entries[*len] = Some((key, value));
            *len += 1;
            return None;
        }

        // Fourth distinct key: spill into a hash map for good.
        let mut map = HashMap::with_capacity(INLINE_MAX + 1);
        for slot in entries.iter_mut() {
            let (k, v) = slot.take().expect("inline slot is occupied");
            map.insert(k, v);
        }
        map.insert(key, value);
        self.store = Store::Spilled(map);
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.store {
            Store::Inline { entries, len } => {
                let at = entries[..*len]
                    .iter()
                    .position(|slot| slot.as_ref().expect("inline slot is occupied").0 == *key)?;
                let (_, value) = entries[at].take().expect("inline slot is occupied");
                // Move the last live entry into the hole.
                *len -= 1;
                if at != *len {
                    entries[at] = entries[*len].take();
                }
                Some(value)
            }
            Store::Spilled(map) => map.remove(key),
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        let inner = match &self.store {
            Store::Inline { entries, len } => IterInner::Inline(entries[..*len].iter()),
            Store::Spilled(map) => IterInner::Spilled(map.iter()),
        };
        Iter { inner }
    }

    /// Drops every entry and returns to inline storage.
    pub fn clear(&mut self) {
        self.store = Store::Inline {
            entries: [None, None, None],
            len: 0,
        };
    }
}

impl<K: Eq + Hash, V> Default for Flat3Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, K, V> {
    inner: IterInner<'a, K, V>,
}

enum IterInner<'a, K, V> {
    Inline(std::slice::Iter<'a, Option<(K, V)>>),
    Spilled(hash_map::Iter<'a, K, V>),
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Inline(slots) => {
                let slot = slots.next()?;
                let (key, value) = slot.as_ref().expect("inline slot is occupied");
                Some((key, value))
            }
            IterInner::Spilled(entries) => entries.next(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stays_inline_up_to_three_entries() {
        let mut map = Flat3Map::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        assert!(map.is_inline());
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&"b"), Some(&2));
    }

    #[test]
    fn spills_on_the_fourth_key_and_stays_spilled() {
        let mut map = Flat3Map::new();
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            map.insert(key, i);
        }
        assert!(!map.is_inline());
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&"a"), Some(&0));
        map.remove(&"a");
        map.remove(&"b");
        assert!(!map.is_inline());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn updating_never_spills() {
        let mut map = Flat3Map::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        assert_eq!(map.insert("b", 20), Some(2));
        assert!(map.is_inline());
        assert_eq!(map.get(&"b"), Some(&20));
    }

    #[test]
    fn inline_removal_compacts() {
        let mut map = Flat3Map::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        assert_eq!(map.remove(&"a"), Some(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"b"), Some(&2));
        assert_eq!(map.get(&"c"), Some(&3));
        assert_eq!(map.remove(&"a"), None);
        assert_eq!(map.iter().count(), 2);
    }

    #[test]
    fn clear_returns_to_inline() {
        let mut map = Flat3Map::new();
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            map.insert(key, i);
        }
        map.clear();
        assert!(map.is_inline());
        assert!(map.is_empty());
    }
}
