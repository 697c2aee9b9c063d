//! In-memory topology and path stores
//!
//! Reference implementations of the store traits, used by the test suite and
//! by embedders that keep their model in process. `MemoryPathStore`
//! implements transactions by snapshotting state and restoring it when the
//! unit of work fails.

use std::collections::{BTreeMap, HashMap};

use crate::node::NodeRef;
use crate::path::{PathEntry, PathId, PathRecord};
use crate::store::{PathStore, StoreError, TopologyStore};

#[derive(Debug, Clone)]
enum NodeData {
    Endpoint,
    FrontPort { rear: NodeRef, position: u32 },
    RearPort { positions: u32 },
}

/// Mutable in-memory topology graph
#[derive(Debug, Clone, Default)]
pub struct MemoryTopology {
    nodes: HashMap<NodeRef, NodeData>,
    links: HashMap<NodeRef, NodeRef>,
}

impl MemoryTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint node (terminates a cable directly)
    pub fn add_endpoint(&mut self, id: u64) -> NodeRef {
        let node = NodeRef::endpoint(id);
        self.nodes.insert(node, NodeData::Endpoint);
        node
    }

    /// Add a rear port with the given fan-out width
    pub fn add_rear_port(&mut self, id: u64, positions: u32) -> NodeRef {
        let node = NodeRef::rear_port(id);
        self.nodes.insert(node, NodeData::RearPort { positions });
        node
    }

    /// Add a front port wired to `rear` at the given 1-based position
    pub fn add_front_port(&mut self, id: u64, rear: NodeRef, position: u32) -> NodeRef {
        let node = NodeRef::front_port(id);
        self.nodes.insert(node, NodeData::FrontPort { rear, position });
        node
    }

    /// Cable two nodes together (symmetric link)
    pub fn connect(&mut self, a: NodeRef, b: NodeRef) {
        self.links.insert(a, b);
        self.links.insert(b, a);
    }

    /// Remove the cable attached to a node, if any
    pub fn disconnect(&mut self, node: NodeRef) {
        if let Some(peer) = self.links.remove(&node) {
            self.links.remove(&peer);
        }
    }

    /// Remove a node entirely, along with any cable attached to it
    pub fn remove(&mut self, node: NodeRef) {
        self.disconnect(node);
        self.nodes.remove(&node);
    }
}

impl TopologyStore for MemoryTopology {
    fn contains(&self, node: NodeRef) -> bool {
        self.nodes.contains_key(&node)
    }

    fn link(&self, node: NodeRef) -> Option<NodeRef> {
        self.links.get(&node).copied()
    }

    fn rear_partner(&self, front: NodeRef) -> Option<NodeRef> {
        match self.nodes.get(&front) {
            Some(NodeData::FrontPort { rear, .. }) => Some(*rear),
            _ => None,
        }
    }

    fn positions(&self, rear: NodeRef) -> Option<u32> {
        match self.nodes.get(&rear) {
            Some(NodeData::RearPort { positions }) => Some(*positions),
            _ => None,
        }
    }

    fn front_at_position(&self, rear: NodeRef, position: u32) -> Option<NodeRef> {
        self.nodes.iter().find_map(|(node, data)| match data {
            NodeData::FrontPort { rear: r, position: p } if *r == rear && *p == position => {
                Some(*node)
            }
            _ => None,
        })
    }
}

/// In-memory path record store with snapshot-based transactions
#[derive(Debug, Clone, Default)]
pub struct MemoryPathStore {
    records: BTreeMap<PathId, PathRecord>,
    next_id: u64,
}

impl MemoryPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored record by id
    pub fn get(&self, id: PathId) -> Option<&PathRecord> {
        self.records.get(&id)
    }

    /// All stored records in id order
    pub fn records(&self) -> impl Iterator<Item = (PathId, &PathRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }
}

impl PathStore for MemoryPathStore {
    fn find_paths_containing(
        &self,
        entry: &PathEntry,
    ) -> Result<Vec<(PathId, PathRecord)>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|(_, record)| record.contains(entry))
            .map(|(id, record)| (*id, record.clone()))
            .collect())
    }

    fn insert(&mut self, record: PathRecord) -> Result<PathId, StoreError> {
        let id = PathId(self.next_id);
        self.next_id += 1;
        self.records.insert(id, record);
        Ok(id)
    }

    fn delete(&mut self, id: PathId) -> Result<(), StoreError> {
        self.records.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let snapshot = (self.records.clone(), self.next_id);
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                (self.records, self.next_id) = snapshot;
                Err(err)
            }
        }
    }
}
