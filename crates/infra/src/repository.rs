use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keyed record store ordered by key, so listings come back in id order.
///
/// Poisoned locks are recovered; a record is only ever replaced whole.
#[derive(Debug)]
pub struct InMemoryRepository<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> InMemoryRepository<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<K, V>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<K, V>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> Default for InMemoryRepository<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryRepository<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    pub fn get(&self, key: &K) -> Option<V> {
        self.read().get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    pub fn upsert(&self, key: K, value: V) {
        self.write().insert(key, value);
    }

    /// Insert or replace `key` unless another record matches `clashes`.
    ///
    /// The check and the write happen under one lock. Returns `false` (and
    /// writes nothing) on a clash; the record stored under `key` itself is
    /// never tested.
    pub fn upsert_unless(&self, key: K, value: V, mut clashes: impl FnMut(&V) -> bool) -> bool {
        let mut map = self.write();
        if map.iter().any(|(k, v)| *k != key && clashes(v)) {
            return false;
        }
        map.insert(key, value);
        true
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.write().remove(key)
    }

    pub fn list(&self) -> Vec<V> {
        self.read().values().cloned().collect()
    }

    pub fn filter(&self, mut pred: impl FnMut(&V) -> bool) -> Vec<V> {
        self.read().values().filter(|v| pred(v)).cloned().collect()
    }

    pub fn find(&self, mut pred: impl FnMut(&V) -> bool) -> Option<V> {
        self.read().values().find(|v| pred(v)).cloned()
    }

    /// Drop every record matching `pred`; returns how many were removed.
    pub fn remove_where(&self, mut pred: impl FnMut(&V) -> bool) -> usize {
        let mut map = self.write();
        let before = map.len();
        map.retain(|_k, v| !pred(v));
        before - map.len()
    }

    /// Apply `f` to every record matching `pred`; returns how many were touched.
    pub fn update_where(&self, mut pred: impl FnMut(&V) -> bool, mut f: impl FnMut(&mut V)) -> usize {
        let mut map = self.write();
        let mut touched = 0;
        for v in map.values_mut() {
            if pred(v) {
                f(v);
                touched += 1;
            }
        }
        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_ordered_by_key() {
        let repo = InMemoryRepository::new();
        repo.upsert(3, "c");
        repo.upsert(1, "a");
        repo.upsert(2, "b");
        assert_eq!(repo.list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_and_update_where_report_counts() {
        let repo = InMemoryRepository::new();
        for i in 1..=5 {
            repo.upsert(i, i * 10);
        }

        assert_eq!(repo.remove_where(|v| *v > 30), 2);
        assert_eq!(repo.update_where(|v| *v < 20, |v| *v = 0), 1);
        assert_eq!(repo.list(), vec![0, 20, 30]);
        assert_eq!(repo.find(|v| *v == 20), Some(20));
        assert!(!repo.contains(&5));
    }

    #[test]
    fn upsert_unless_skips_its_own_key() {
        let repo = InMemoryRepository::new();
        repo.upsert(1, "soy");

        assert!(!repo.upsert_unless(2, "soy", |v| *v == "soy"));
        assert!(!repo.contains(&2));

        // Rewriting key 1 with the same value only meets itself.
        assert!(repo.upsert_unless(1, "soy", |v| *v == "soy"));
        assert!(repo.upsert_unless(2, "miso", |v| *v == "miso"));
        assert_eq!(repo.list(), vec!["soy", "miso"]);
    }
}
