//! Forward path tracer
//!
//! Walks outward from a node along its cable, chaining through pass-through
//! panels, until an endpoint terminates the path or nothing further can be
//! resolved. The walk is a pure function of the current topology state.

use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::codec::{DecodeError, EncodeError, NodeCodec};
use crate::node::{NodeKind, NodeRef};
use crate::path::{PathEntry, PathRecord};
use crate::store::TopologyStore;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Derives path records by walking the topology from an origin node
#[derive(Debug)]
pub struct PathTracer<'a, T: TopologyStore> {
    topology: &'a T,
    codec: &'a NodeCodec,
}

impl<'a, T: TopologyStore> PathTracer<'a, T> {
    pub fn new(topology: &'a T, codec: &'a NodeCodec) -> Self {
        Self { topology, codec }
    }

    /// Trace the path starting at `origin`
    ///
    /// Returns `None` when the origin has no link - there is nothing to
    /// trace. Otherwise the record's entries run outward from the origin
    /// (excluding the origin itself), ending either at an endpoint
    /// (`destination` set) or unterminated (`destination` none) when the walk
    /// reaches a pass-through that cannot be resolved further: a rear port
    /// with fan-out width other than 1, a partner with no cable, or a wiring
    /// loop.
    pub fn from_origin(&self, origin: NodeRef) -> Result<Option<PathRecord>, TraceError> {
        let Some(first) = self.topology.link(origin) else {
            return Ok(None);
        };

        let mut entries: Vec<PathEntry> = Vec::new();
        let mut visited = HashSet::from([origin]);
        let mut current = first;

        let destination = loop {
            if !visited.insert(current) {
                // Wiring loop; end unterminated rather than spin
                break None;
            }
            entries.push(self.codec.encode(current)?);

            let partner = match current.kind {
                NodeKind::Endpoint => break Some(current),
                NodeKind::FrontPort => self.topology.rear_partner(current),
                NodeKind::RearPort => {
                    // Ambiguous fan-out resolves to no continuation
                    if self.topology.positions(current) == Some(1) {
                        self.topology.front_at_position(current, 1)
                    } else {
                        None
                    }
                }
            };

            let Some(partner) = partner else {
                break None;
            };
            if !visited.insert(partner) {
                break None;
            }
            entries.push(self.codec.encode(partner)?);

            match self.topology.link(partner) {
                Some(next) => current = next,
                None => break None,
            }
        };

        debug!(
            origin = %origin,
            entries = entries.len(),
            terminated = destination.is_some(),
            "traced path from origin"
        );

        Ok(Some(PathRecord::new(Some(origin), destination, entries)))
    }
}
