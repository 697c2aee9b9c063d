//! Store interfaces the core depends on
//!
//! The topology graph and the persisted path set live outside this crate; the
//! core reads the former and issues whole-record create/delete operations
//! against the latter. Both are expressed as explicit traits so nothing here
//! reaches for hidden global state.

use thiserror::Error;

use crate::node::NodeRef;
use crate::path::{PathEntry, PathId, PathRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No path record with id {0}")]
    NotFound(PathId),
    #[error("Path store backend error: {0}")]
    Backend(String),
}

/// Read-only view of the physical topology
///
/// Links are undirected in meaning but stored as a reference: `link(a) == b`
/// implies `link(b) == a` for a cabled pair.
pub trait TopologyStore {
    /// Whether the node currently exists
    fn contains(&self, node: NodeRef) -> bool;

    /// Far end of the cable attached to this node, if any
    fn link(&self, node: NodeRef) -> Option<NodeRef>;

    /// The rear port a front port is internally wired to
    fn rear_partner(&self, front: NodeRef) -> Option<NodeRef>;

    /// Fan-out width of a rear port (how many front positions it serves)
    fn positions(&self, rear: NodeRef) -> Option<u32>;

    /// Front port at the given 1-based position behind a rear port
    fn front_at_position(&self, rear: NodeRef, position: u32) -> Option<NodeRef>;
}

/// Persistence surface for path records
///
/// Records are immutable once stored: every mutation is delete-then-insert,
/// and ids are never reused for replacement content.
pub trait PathStore {
    /// All stored records whose entry sequence contains the given entry
    fn find_paths_containing(&self, entry: &PathEntry)
        -> Result<Vec<(PathId, PathRecord)>, StoreError>;

    /// Store a record, assigning it a fresh id
    fn insert(&mut self, record: PathRecord) -> Result<PathId, StoreError>;

    /// Remove a record by id
    fn delete(&mut self, id: PathId) -> Result<(), StoreError>;

    /// Run `f` as one atomic unit of work
    ///
    /// Every mutation made inside `f` commits together; if `f` returns an
    /// error, none of them do and the prior state is fully restored. Readers
    /// must never observe a partially applied unit.
    fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
        E: From<StoreError>;
}
