#![deny(missing_docs)]
#![doc = "Core traits and data types for the sirnet epidemic engine."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, SirError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle, Sampler};
pub use types::Status;

/// Identifier for a node within a [`ContactGraph`].
///
/// Identifiers are dense: a graph with `n` nodes uses exactly the raw values
/// `0..n`, which lets per-node state live in flat arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Creates an identifier from a dense array index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Returns the dense array index for the identifier.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Read-only contact network consumed by the epidemic engine.
///
/// The engine never mutates topology; per-node status is kept by the engine
/// itself in a table indexed by [`NodeId::index`].
pub trait ContactGraph {
    /// Returns the number of nodes. Node identifiers are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Returns an iterator over all node identifiers.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_>;

    /// Returns the neighbours of `node`. Unknown nodes have no neighbours.
    fn neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;
}
