use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::trace;
use parking_lot::{Mutex, MutexGuard};

/// The default number of buckets to use.
const DEFAULT_BUCKETS: usize = 255;

/// A fixed-bucket concurrent map with one lock per bucket.
///
/// Per-key operations lock only the owning bucket, so threads touching
/// different buckets never contend. The bucket count is fixed at
/// construction and the map never rehashes; size the bucket count for
/// the expected load. Aggregates like `len` and `contains_value` lock
/// one bucket at a time and are out of date as soon as they return.
/// For a consistent whole-map view, use [`BucketMap::atomic`].
pub struct BucketMap<K, V> {
    buckets: Vec<Mutex<Vec<(K, V)>>>,
}

fn bucket_of<K: Hash>(key: &K, buckets: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % buckets as u64) as usize
}

impl<K, V> BucketMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Zero rounds up to a single bucket.
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(1);
        let mut v = Vec::with_capacity(buckets);
        v.resize_with(buckets, || Mutex::new(Vec::new()));
        BucketMap { buckets: v }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket(&self, key: &K) -> &Mutex<Vec<(K, V)>> {
        &self.buckets[bucket_of(key, self.buckets.len())]
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut bucket = self.bucket(&key).lock();
        match bucket.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
            None => {
                bucket.push((key, value));
                None
            }
        }
    }

    /// Clones the value out so the bucket lock is not held by the
    /// caller.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.bucket(key)
            .lock()
            .iter()
            .find(|entry| entry.0 == *key)
            .map(|entry| entry.1.clone())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.bucket(key).lock().iter().any(|entry| entry.0 == *key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut bucket = self.bucket(key).lock();
        let at = bucket.iter().position(|entry| entry.0 == *key)?;
        Some(bucket.swap_remove(at).1)
    }

    /// Sums bucket sizes one lock at a time; stale on arrival.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.lock().is_empty())
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.buckets
            .iter()
            .any(|b| b.lock().iter().any(|entry| entry.1 == *value))
    }

    pub fn clear(&self) {
        for bucket in &self.buckets {
            bucket.lock().clear();
        }
    }

    /// Runs `f` with every bucket locked, in ascending index order, so
    /// the closure observes and mutates a frozen whole map. Two
    /// concurrent `atomic` calls take the locks in the same order and
    /// cannot deadlock each other.
    pub fn atomic<R>(&self, f: impl FnOnce(&mut AtomicView<'_, K, V>) -> R) -> R {
        trace!("locking all {} buckets", self.buckets.len());
        let guards: Vec<MutexGuard<'_, Vec<(K, V)>>> =
            self.buckets.iter().map(|b| b.lock()).collect();
        let mut view = AtomicView { guards };
        f(&mut view)
    }
}

impl<K: Eq + Hash, V> Default for BucketMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The whole-map view handed to [`BucketMap::atomic`].
///
/// Holds every bucket guard, so map methods cannot be re-entered while
/// it lives; all access goes through the view.
pub struct AtomicView<'a, K, V> {
    guards: Vec<MutexGuard<'a, Vec<(K, V)>>>,
}

impl<K, V> AtomicView<'_, K, V>
where
    K: Eq + Hash,
{
    fn bucket_mut(&mut self, key: &K) -> &mut Vec<(K, V)> {
        let at = bucket_of(key, self.guards.len());
        &mut self.guards[at]
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.guards[bucket_of(key, self.guards.len())]
            .iter()
            .find(|entry| entry.0 == *key)
            .map(|entry| &entry.1)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_mut(&key);
        match bucket.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
            None => {
                bucket.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = self.bucket_mut(key);
        let at = bucket.iter().position(|entry| entry.0 == *key)?;
        Some(bucket.swap_remove(at).1)
    }

    pub fn len(&self) -> usize {
        self.guards.iter().map(|g| g.len()).sum()
    }

    pub fn iter<'s>(&'s self) -> impl Iterator<Item = (&'s K, &'s V)> + 's {
        self.guards
            .iter()
            .flat_map(|g| g.iter().map(|entry| (&entry.0, &entry.1)))
    }
}
