#![deny(missing_docs)]

//! Undirected contact networks implementing the `sirnet-core` graph contract.

mod edgelist;
mod hash;
mod network;
mod serialization;

pub use edgelist::{parse_edge_list, read_edge_list};
pub use hash::canonical_hash;
pub use network::ContactNetwork;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{network_from_bytes, network_from_json, network_to_bytes, network_to_json};
