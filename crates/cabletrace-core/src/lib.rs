//! Cabletrace Core - cable path tracing and maintenance
//!
//! This crate computes the authoritative answer to "what connects to what,
//! transitively" in a physical network of cables and pass-through panels:
//! - Node codec: opaque comparable path entries (`"<type_tag>:<id>"`) and back
//! - Path tracer: forward walk from an origin through pass-through chains
//! - Interior path builder: bidirectional derivation from a mid-span port
//! - Path maintainer: atomic delete-then-recreate of affected path records
//!
//! The topology graph and the persisted record set live behind the
//! `TopologyStore` and `PathStore` traits; in-memory implementations are
//! provided for tests and in-process embedders.

pub mod codec;
pub mod interior;
pub mod maintain;
pub mod memory;
pub mod node;
pub mod path;
pub mod store;
pub mod trace;

pub use codec::{DecodeError, EncodeError, NodeCodec};
pub use interior::InteriorPathBuilder;
pub use maintain::{MaintainError, PathMaintainer};
pub use memory::{MemoryPathStore, MemoryTopology};
pub use node::{NodeId, NodeKind, NodeRef, TypeRegistry, TypeTag};
pub use path::{PathEntry, PathId, PathRecord};
pub use store::{PathStore, StoreError, TopologyStore};
