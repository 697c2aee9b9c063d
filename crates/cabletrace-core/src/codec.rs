//! Node codec - converts node references to path entries and back
//!
//! The persisted form of a node is `"<type_tag>:<identifier>"`, ordinary
//! decimal on both sides. Identifiers are integers, so the separator can never
//! appear inside a field.

use thiserror::Error;

use crate::node::{NodeId, NodeKind, NodeRef, TypeRegistry, TypeTag};
use crate::path::PathEntry;
use crate::store::TopologyStore;

const SEPARATOR: char = ':';

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Node kind {0:?} is not registered")]
    Unregistered(NodeKind),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed path entry {0:?}")]
    Malformed(String),
    #[error("No node kind registered under tag {0}")]
    UnknownTag(TypeTag),
    #[error("Path entry references a node that no longer exists: {0}")]
    Dangling(NodeRef),
}

/// Encodes and decodes path entries against an explicit type registry
#[derive(Debug, Clone)]
pub struct NodeCodec {
    registry: TypeRegistry,
}

impl NodeCodec {
    pub fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    /// Codec over the conventional built-in tags
    pub fn builtin() -> Self {
        Self::new(TypeRegistry::builtin())
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Serialize a node reference into its persisted entry token
    pub fn encode(&self, node: NodeRef) -> Result<PathEntry, EncodeError> {
        let tag = self
            .registry
            .tag_for(node.kind)
            .ok_or(EncodeError::Unregistered(node.kind))?;
        Ok(PathEntry(format!("{}{}{}", tag, SEPARATOR, node.id)))
    }

    /// Resolve an entry token back to a node reference
    ///
    /// Fails with `Dangling` when the referenced node is gone from the
    /// topology; callers walking persisted paths should treat that as "this
    /// path is stale" rather than a hard fault.
    pub fn decode(
        &self,
        entry: &PathEntry,
        topology: &impl TopologyStore,
    ) -> Result<NodeRef, DecodeError> {
        let malformed = || DecodeError::Malformed(entry.0.clone());

        let mut parts = entry.0.split(SEPARATOR);
        let tag_part = parts.next().ok_or_else(malformed)?;
        let id_part = parts.next().ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        let tag = TypeTag(tag_part.parse::<u32>().map_err(|_| malformed())?);
        let id = NodeId(id_part.parse::<u64>().map_err(|_| malformed())?);

        let kind = self
            .registry
            .kind_for(tag)
            .ok_or(DecodeError::UnknownTag(tag))?;

        let node = NodeRef { kind, id };
        if !topology.contains(node) {
            return Err(DecodeError::Dangling(node));
        }
        Ok(node)
    }
}
