//! Rebuild scenarios against the in-memory stores: multi-path rebuilds must
//! replace record identities, and a failed rebuild must leave the store
//! exactly as it found it.

use cabletrace_core::{
    MaintainError, MemoryPathStore, MemoryTopology, NodeCodec, NodeRef, PathEntry, PathId,
    PathMaintainer, PathRecord, PathStore, StoreError,
};

/// Path store wrapper that fails inserts after a set number have succeeded
struct FailingStore {
    inner: MemoryPathStore,
    inserts_allowed: usize,
    inserts_done: usize,
}

impl FailingStore {
    fn new(inner: MemoryPathStore, inserts_allowed: usize) -> Self {
        Self {
            inner,
            inserts_allowed,
            inserts_done: 0,
        }
    }
}

impl PathStore for FailingStore {
    fn find_paths_containing(
        &self,
        entry: &PathEntry,
    ) -> Result<Vec<(PathId, PathRecord)>, StoreError> {
        self.inner.find_paths_containing(entry)
    }

    fn insert(&mut self, record: PathRecord) -> Result<PathId, StoreError> {
        if self.inserts_done >= self.inserts_allowed {
            return Err(StoreError::Backend("injected insert failure".to_string()));
        }
        self.inserts_done += 1;
        self.inner.insert(record)
    }

    fn delete(&mut self, id: PathId) -> Result<(), StoreError> {
        self.inner.delete(id)
    }

    fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let snapshot = self.inner.clone();
        let inserts_done = self.inserts_done;
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.inner = snapshot;
                self.inserts_done = inserts_done;
                Err(err)
            }
        }
    }
}

/// o1 --- front ~ rear --- far: tracing from either endpoint produces a path
/// that traverses the front port, giving two records with distinct origins.
fn two_paths_through_front() -> (MemoryTopology, NodeRef, NodeRef, NodeRef) {
    let mut topology = MemoryTopology::new();
    let o1 = topology.add_endpoint(1);
    let far = topology.add_endpoint(2);
    let rear = topology.add_rear_port(20, 1);
    let front = topology.add_front_port(10, rear, 1);
    topology.connect(o1, front);
    topology.connect(rear, far);
    (topology, o1, far, front)
}

#[test]
fn rebuild_replaces_both_affected_records() {
    let (topology, o1, far, front) = two_paths_through_front();
    let codec = NodeCodec::builtin();
    let mut store = MemoryPathStore::new();

    let maintainer = PathMaintainer::new(&topology, &codec);
    // Both directions traverse the front port: one path from each end
    let id1 = maintainer.create_from_origin(&mut store, o1).unwrap().unwrap();
    let id2 = maintainer.create_from_origin(&mut store, far).unwrap().unwrap();
    let before: Vec<PathRecord> = store.records().map(|(_, r)| r.clone()).collect();

    let rebuilt = maintainer.rebuild_paths_through(&mut store, front).unwrap();
    assert_eq!(rebuilt, 2);
    assert_eq!(store.len(), 2);

    // Stale identities are gone
    assert!(store.get(id1).is_none());
    assert!(store.get(id2).is_none());

    // Topology is unchanged, so content is equivalent record for record
    let mut after: Vec<PathRecord> = store.records().map(|(_, r)| r.clone()).collect();
    let mut expected = before;
    expected.sort_by(|a, b| a.path.cmp(&b.path));
    after.sort_by(|a, b| a.path.cmp(&b.path));
    assert_eq!(after, expected);

    let origins: Vec<_> = store.records().filter_map(|(_, r)| r.origin).collect();
    assert!(origins.contains(&o1));
    assert!(origins.contains(&far));
}

#[test]
fn failed_rebuild_leaves_store_untouched() {
    let (topology, o1, far, front) = two_paths_through_front();
    let codec = NodeCodec::builtin();
    let mut seed = MemoryPathStore::new();

    let maintainer = PathMaintainer::new(&topology, &codec);
    maintainer.create_from_origin(&mut seed, o1).unwrap().unwrap();
    maintainer.create_from_origin(&mut seed, far).unwrap().unwrap();
    let before: Vec<(PathId, PathRecord)> = seed
        .records()
        .map(|(id, r)| (id, r.clone()))
        .collect();

    // Allow the first re-insert, fail the second: the rebuild dies mid-flight
    let mut store = FailingStore::new(seed, 1);
    let err = maintainer
        .rebuild_paths_through(&mut store, front)
        .unwrap_err();
    assert!(matches!(
        err,
        MaintainError::Transaction(StoreError::Backend(_))
    ));

    // Exactly the pre-rebuild records, ids included: no partial deletes
    let after: Vec<(PathId, PathRecord)> = store
        .inner
        .records()
        .map(|(id, r)| (id, r.clone()))
        .collect();
    assert_eq!(after, before);
}

#[test]
fn rebuild_skips_records_without_origin() {
    let (topology, o1, _far, front) = two_paths_through_front();
    let codec = NodeCodec::builtin();
    let mut store = MemoryPathStore::new();

    let maintainer = PathMaintainer::new(&topology, &codec);
    maintainer.create_from_origin(&mut store, o1).unwrap().unwrap();

    // An origin-less record through the same node is deleted but not rebuilt
    let orphan = PathRecord::new(None, None, vec![codec.encode(front).unwrap()]);
    store.insert(orphan).unwrap();

    let rebuilt = maintainer.rebuild_paths_through(&mut store, front).unwrap();
    assert_eq!(rebuilt, 2);
    assert_eq!(store.len(), 1);
    let (_, record) = store.records().next().unwrap();
    assert_eq!(record.origin, Some(o1));
}
