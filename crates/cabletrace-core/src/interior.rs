//! Interior path builder
//!
//! A pass-through port sits between two cable segments, so the path through
//! it cannot be derived from one end alone: the downstream side follows the
//! port's own cable, the upstream side follows its internal partner's. This
//! module splices both traces into a single ordered path running from the far
//! downstream end toward the far upstream end, then normalizes it.

use tracing::debug;

use crate::codec::NodeCodec;
use crate::node::{NodeKind, NodeRef};
use crate::path::{PathEntry, PathRecord};
use crate::store::TopologyStore;
use crate::trace::{PathTracer, TraceError};

/// Builds the full path traversing an interior (pass-through) node
#[derive(Debug)]
pub struct InteriorPathBuilder<'a, T: TopologyStore> {
    topology: &'a T,
    codec: &'a NodeCodec,
}

impl<'a, T: TopologyStore> InteriorPathBuilder<'a, T> {
    pub fn new(topology: &'a T, codec: &'a NodeCodec) -> Self {
        Self { topology, codec }
    }

    /// Compute the path through `node`, tracing both directions
    ///
    /// Returns `None` for nodes that are not pass-throughs - an expected
    /// input class, not an error. The resulting record leaves `destination`
    /// unset for later derivation.
    pub fn build(&self, node: NodeRef) -> Result<Option<PathRecord>, TraceError> {
        let upstream_partner = match node.kind {
            NodeKind::Endpoint => return Ok(None),
            NodeKind::FrontPort => self.topology.rear_partner(node),
            NodeKind::RearPort => {
                // A rear port serving more than one front position has no
                // single upstream continuation; punt rather than guess.
                if self.topology.positions(node) == Some(1) {
                    self.topology.front_at_position(node, 1)
                } else {
                    None
                }
            }
        };

        let tracer = PathTracer::new(self.topology, self.codec);
        let downstream = tracer.from_origin(node)?;
        let upstream = match upstream_partner {
            Some(partner) => tracer.from_origin(partner)?,
            None => None,
        };

        let mut path: Vec<PathEntry> = Vec::new();
        if let Some(down) = &downstream {
            path.extend(down.path.iter().rev().cloned());
        }
        path.push(self.codec.encode(node)?);
        if let (Some(partner), Some(up)) = (upstream_partner, &upstream) {
            path.push(self.codec.encode(partner)?);
            path.extend(up.path.iter().cloned());
        }

        // A path must never begin at an unconnected stub
        if let Some(first) = path.first() {
            let first_node = self.codec.decode(first, self.topology)?;
            if self.topology.link(first_node).is_none() {
                path.remove(0);
            }
        }

        let origin = match path.first() {
            Some(first) => Some(self.codec.decode(first, self.topology)?),
            None => None,
        };

        debug!(
            node = %node,
            entries = path.len(),
            upstream = upstream_partner.is_some(),
            "built interior path"
        );

        Ok(Some(PathRecord::new(origin, None, path)))
    }
}
