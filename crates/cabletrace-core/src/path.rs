//! Path entries and path records
//!
//! A `PathRecord` is the authoritative, serializable answer to "what connects
//! to what, transitively": an ordered sequence of opaque entry tokens running
//! from origin toward destination. Records are owned by the persistence layer;
//! this crate only computes their value.

use serde::{Deserialize, Serialize};

use crate::node::NodeRef;

/// Serialized form of a node reference: `"<type_tag>:<identifier>"`
///
/// Opaque and comparable; invertible back to a `NodeRef` through the codec.
/// This exact two-field colon-delimited decimal format is persisted and must
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathEntry(pub String);

impl PathEntry {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PathEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistence identity of a stored path record
///
/// Assigned by the path store on insert. A rebuild always deletes and
/// recreates records, so ids change even when content does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(pub u64);

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered cable path between two physical terminations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Node the path conceptually starts from, or none if unresolved
    pub origin: Option<NodeRef>,
    /// Terminal node, or none if the path ends unterminated
    pub destination: Option<NodeRef>,
    /// Entries from origin toward destination
    pub path: Vec<PathEntry>,
    /// Whether every hop is currently connectable; derived elsewhere, always
    /// false on a freshly rebuilt record pending validation
    pub is_active: bool,
    /// Whether the path forks downstream; derived elsewhere, false when fresh
    pub is_split: bool,
}

impl PathRecord {
    /// A fresh record pending validation
    pub fn new(origin: Option<NodeRef>, destination: Option<NodeRef>, path: Vec<PathEntry>) -> Self {
        Self {
            origin,
            destination,
            path,
            is_active: false,
            is_split: false,
        }
    }

    /// Whether the record traverses the given entry
    pub fn contains(&self, entry: &PathEntry) -> bool {
        self.path.iter().any(|e| e == entry)
    }
}
