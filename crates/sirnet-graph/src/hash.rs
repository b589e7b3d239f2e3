use sha2::{Digest, Sha256};
use sirnet_core::ContactGraph;

use crate::network::ContactNetwork;

/// Computes the canonical structural hash for the provided network.
///
/// Labels are ignored; two networks with the same node count and edge set
/// hash identically regardless of edge insertion order.
pub fn canonical_hash(network: &ContactNetwork) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"sirnet-contact-network");
    hasher.update((network.node_count() as u64).to_le_bytes());

    let mut edges: Vec<(u64, u64)> = network
        .edges()
        .iter()
        .map(|(a, b)| (a.as_raw(), b.as_raw()))
        .collect();
    edges.sort_unstable();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(a.to_le_bytes());
        hasher.update(b.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
