//! Path maintenance
//!
//! Keeps the persisted path set consistent with the topology. Records are
//! never edited in place: a topology change deletes every path traversing the
//! changed node and re-derives each one from its origin, all inside a single
//! store transaction so readers never see a half-rebuilt state.

use thiserror::Error;
use tracing::{debug, info};

use crate::codec::{EncodeError, NodeCodec};
use crate::node::NodeRef;
use crate::path::PathId;
use crate::store::{PathStore, StoreError, TopologyStore};
use crate::trace::{PathTracer, TraceError};

#[derive(Error, Debug)]
pub enum MaintainError {
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("Path store transaction failed: {0}")]
    Transaction(#[from] StoreError),
}

/// Creates and rebuilds persisted path records
#[derive(Debug)]
pub struct PathMaintainer<'a, T: TopologyStore> {
    topology: &'a T,
    codec: &'a NodeCodec,
}

impl<'a, T: TopologyStore> PathMaintainer<'a, T> {
    pub fn new(topology: &'a T, codec: &'a NodeCodec) -> Self {
        Self { topology, codec }
    }

    /// Trace the path starting at `node` and persist it
    ///
    /// No-op when the node has no link. Always a fresh insert, never a diff;
    /// repeating the call for an unchanged topology persists an equivalent
    /// record.
    pub fn create_from_origin<P: PathStore>(
        &self,
        store: &mut P,
        node: NodeRef,
    ) -> Result<Option<PathId>, MaintainError> {
        let tracer = PathTracer::new(self.topology, self.codec);
        match tracer.from_origin(node)? {
            Some(record) => {
                let id = store.insert(record)?;
                debug!(origin = %node, id = %id, "created path from origin");
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Rebuild every persisted path that traverses `node`
    ///
    /// One atomic unit of work: each affected record is deleted and, when it
    /// had a resolved origin, re-derived from that origin. On any failure the
    /// store is left exactly as it was before the call. Returns the number of
    /// records that were rebuilt.
    pub fn rebuild_paths_through<P: PathStore>(
        &self,
        store: &mut P,
        node: NodeRef,
    ) -> Result<usize, MaintainError> {
        let entry = self.codec.encode(node)?;

        store.transaction(|store| {
            let stale = store.find_paths_containing(&entry)?;
            let count = stale.len();

            for (id, record) in stale {
                store.delete(id)?;
                if let Some(origin) = record.origin {
                    self.create_from_origin(store, origin)?;
                }
            }

            info!(node = %node, rebuilt = count, "rebuilt paths through node");
            Ok(count)
        })
    }
}
