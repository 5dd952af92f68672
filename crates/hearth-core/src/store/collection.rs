// ── Generic reactive entity collection ──
//
// Concurrent storage keyed by a typed id, with push-based change
// notification via `watch` channels. Snapshots are kept sorted by id so
// consumers render rows in a stable order (the dashboard lists devices
// and events in id order).

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// A reactive collection for a single entity type, keyed by its id.
///
/// Every mutation rebuilds the sorted snapshot broadcast to subscribers
/// and bumps a version counter.
pub(crate) struct EntityCollection<K, T>
where
    K: Copy + Eq + Hash + Ord + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    by_id: DashMap<K, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,

    /// Extracts the sort/lookup key from an entity.
    key_of: fn(&T) -> K,
}

impl<K, T> EntityCollection<K, T>
where
    K: Copy + Eq + Hash + Ord + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(key_of: fn(&T) -> K) -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
            key_of,
        }
    }

    /// Insert or update an entity. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, entity: T) -> bool {
        let id = (self.key_of)(&entity);
        let is_new = !self.by_id.contains_key(&id);
        self.by_id.insert(id, Arc::new(entity));

        self.rebuild_snapshot();
        self.bump_version();

        is_new
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, id: &K) -> Option<Arc<T>> {
        let removed = self.by_id.remove(id).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    /// Look up an entity by id.
    pub(crate) fn get(&self, id: &K) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    pub(crate) fn contains(&self, id: &K) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Return all current ids in the collection.
    pub(crate) fn ids(&self) -> Vec<K> {
        self.by_id.iter().map(|r| *r.key()).collect()
    }

    /// Remove every entity whose id fails the predicate. Returns how many
    /// rows were dropped.
    pub(crate) fn retain_ids(&self, keep: impl Fn(&K) -> bool) -> usize {
        let before = self.by_id.len();
        self.by_id.retain(|id, _| keep(id));
        let dropped = before - self.by_id.len();
        if dropped > 0 {
            self.rebuild_snapshot();
            self.bump_version();
        }
        dropped
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values into an id-sorted snapshot vec and broadcast it.
    fn rebuild_snapshot(&self) {
        let mut values: Vec<Arc<T>> = self.by_id.iter().map(|r| Arc::clone(r.value())).collect();
        values.sort_by_key(|v| (self.key_of)(v));
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: i64,
        label: String,
    }

    fn row(id: i64, label: &str) -> Row {
        Row {
            id,
            label: label.into(),
        }
    }

    fn collection() -> EntityCollection<i64, Row> {
        EntityCollection::new(|r| r.id)
    }

    #[test]
    fn upsert_returns_true_for_new_id() {
        let col = collection();
        assert!(col.upsert(row(1, "a")));
        assert!(!col.upsert(row(1, "b")));
        assert_eq!(col.get(&1).unwrap().label, "b");
    }

    #[test]
    fn remove_is_idempotent() {
        let col = collection();
        col.upsert(row(1, "a"));

        assert_eq!(col.remove(&1).unwrap().label, "a");
        assert!(col.remove(&1).is_none());
        assert_eq!(col.len(), 0);
    }

    #[test]
    fn snapshot_is_sorted_by_id() {
        let col = collection();
        col.upsert(row(3, "c"));
        col.upsert(row(1, "a"));
        col.upsert(row(2, "b"));

        let snap = col.snapshot();
        let ids: Vec<i64> = snap.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn retain_ids_drops_and_notifies() {
        let col = collection();
        col.upsert(row(1, "a"));
        col.upsert(row(2, "b"));
        col.upsert(row(3, "c"));

        let dropped = col.retain_ids(|id| *id != 2);
        assert_eq!(dropped, 1);
        assert!(!col.contains(&2));
        assert_eq!(col.snapshot().len(), 2);
    }

    #[test]
    fn subscribe_sees_mutations() {
        let col = collection();
        let rx = col.subscribe();
        col.upsert(row(1, "a"));
        assert_eq!(rx.borrow().len(), 1);
    }
}
