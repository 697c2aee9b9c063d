//! Node references and the type registry
//!
//! Every physical entity that can appear in a cable path is identified by a
//! `NodeRef`: a closed kind plus a numeric identifier unique within that kind.
//! The `TypeRegistry` maps kinds to the stable small-integer tags used in the
//! persisted path format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric identifier of a node, unique within its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable small-integer tag identifying a node kind in the persisted format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag(pub u32);

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a physical node
///
/// Pass-through kinds sit on opposite faces of a panel: a front port declares
/// exactly one rear partner (one-to-many seen from the rear), while a rear
/// port fans out to `positions` front ports (many-to-one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Terminates a cable directly (e.g. an interface)
    Endpoint,
    /// Pass-through, panel front face; paired with one rear port
    FrontPort,
    /// Pass-through, panel rear face; fans out to one or more front ports
    RearPort,
}

impl NodeKind {
    /// Whether this kind sits between two cable segments
    pub fn is_pass_through(&self) -> bool {
        matches!(self, NodeKind::FrontPort | NodeKind::RearPort)
    }
}

/// Reference to one physical entity in the topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    /// Which concrete kind the node is
    pub kind: NodeKind,
    /// Identifier unique within the kind
    pub id: NodeId,
}

impl NodeRef {
    pub fn new(kind: NodeKind, id: u64) -> Self {
        Self {
            kind,
            id: NodeId(id),
        }
    }

    pub fn endpoint(id: u64) -> Self {
        Self::new(NodeKind::Endpoint, id)
    }

    pub fn front_port(id: u64) -> Self {
        Self::new(NodeKind::FrontPort, id)
    }

    pub fn rear_port(id: u64) -> Self {
        Self::new(NodeKind::RearPort, id)
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self.kind, self.id)
    }
}

/// Bidirectional map between node kinds and their persisted type tags
///
/// Passed explicitly into the codec at construction; there is no process-wide
/// registry. Tags must be stable across runs since they appear in persisted
/// path entries.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    tags: HashMap<NodeKind, TypeTag>,
    kinds: HashMap<TypeTag, NodeKind>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the conventional tags for all recognized kinds
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(NodeKind::Endpoint, TypeTag(1));
        registry.register(NodeKind::FrontPort, TypeTag(2));
        registry.register(NodeKind::RearPort, TypeTag(3));
        registry
    }

    /// Register a kind under a tag, replacing any previous mapping either way
    pub fn register(&mut self, kind: NodeKind, tag: TypeTag) {
        if let Some(old_tag) = self.tags.remove(&kind) {
            self.kinds.remove(&old_tag);
        }
        if let Some(old_kind) = self.kinds.remove(&tag) {
            self.tags.remove(&old_kind);
        }
        self.tags.insert(kind, tag);
        self.kinds.insert(tag, kind);
    }

    /// Tag registered for a kind, if any
    pub fn tag_for(&self, kind: NodeKind) -> Option<TypeTag> {
        self.tags.get(&kind).copied()
    }

    /// Kind registered under a tag, if any
    pub fn kind_for(&self, tag: TypeTag) -> Option<NodeKind> {
        self.kinds.get(&tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_round_trips() {
        let registry = TypeRegistry::builtin();
        for kind in [NodeKind::Endpoint, NodeKind::FrontPort, NodeKind::RearPort] {
            let tag = registry.tag_for(kind).unwrap();
            assert_eq!(registry.kind_for(tag), Some(kind));
        }
    }

    #[test]
    fn test_builtin_tags_are_distinct() {
        let registry = TypeRegistry::builtin();
        let endpoint = registry.tag_for(NodeKind::Endpoint).unwrap();
        let front = registry.tag_for(NodeKind::FrontPort).unwrap();
        let rear = registry.tag_for(NodeKind::RearPort).unwrap();
        assert_ne!(endpoint, front);
        assert_ne!(endpoint, rear);
        assert_ne!(front, rear);
    }

    #[test]
    fn test_reregister_replaces_both_directions() {
        let mut registry = TypeRegistry::new();
        registry.register(NodeKind::Endpoint, TypeTag(10));
        registry.register(NodeKind::Endpoint, TypeTag(20));

        assert_eq!(registry.tag_for(NodeKind::Endpoint), Some(TypeTag(20)));
        assert_eq!(registry.kind_for(TypeTag(20)), Some(NodeKind::Endpoint));
        // The stale tag must not resolve anymore
        assert_eq!(registry.kind_for(TypeTag(10)), None);
    }

    #[test]
    fn test_pass_through_kinds() {
        assert!(NodeKind::FrontPort.is_pass_through());
        assert!(NodeKind::RearPort.is_pass_through());
        assert!(!NodeKind::Endpoint.is_pass_through());
    }
}
