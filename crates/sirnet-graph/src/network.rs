use std::collections::BTreeSet;

use indexmap::IndexSet;
use sirnet_core::errors::{ErrorInfo, SirError};
use sirnet_core::{ContactGraph, NodeId};

/// Simple undirected contact network stored as adjacency lists.
///
/// Nodes carry a string label (the identifier used in the source edge list)
/// and a dense [`NodeId`] assigned in insertion order. Parallel edges are
/// collapsed and self-loops are rejected; neighbour lists keep the order in
/// which edges were added.
#[derive(Debug, Clone, Default)]
pub struct ContactNetwork {
    labels: IndexSet<String>,
    adjacency: Vec<Vec<NodeId>>,
    edges: Vec<(NodeId, NodeId)>,
    edge_set: BTreeSet<(NodeId, NodeId)>,
}

impl ContactNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a network with `count` isolated nodes labelled `0..count`.
    pub fn with_nodes(count: usize) -> Self {
        let mut network = Self::new();
        for index in 0..count {
            network.add_node(index.to_string());
        }
        network
    }

    /// Builds a network from index pairs, creating nodes `0..count` first.
    pub fn from_edges(count: usize, edges: &[(usize, usize)]) -> Result<Self, SirError> {
        let mut network = Self::with_nodes(count);
        for &(a, b) in edges {
            network.add_edge(NodeId::from_index(a), NodeId::from_index(b))?;
        }
        Ok(network)
    }

    /// Adds a node with the given label, returning the existing id when the
    /// label is already known.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let (index, inserted) = self.labels.insert_full(label.into());
        if inserted {
            self.adjacency.push(Vec::new());
        }
        NodeId::from_index(index)
    }

    /// Adds an undirected edge. Returns `Ok(false)` when the edge already exists.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, SirError> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(SirError::Graph(
                ErrorInfo::new("self-loop", "contact edges must join two distinct nodes")
                    .with_context("node", a.as_raw().to_string()),
            ));
        }
        let key = canonical_pair(a, b);
        if !self.edge_set.insert(key) {
            return Ok(false);
        }
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
        self.edges.push(key);
        Ok(true)
    }

    /// Adds an edge between two labelled nodes, creating them as needed.
    pub fn add_labeled_edge(&mut self, a: &str, b: &str) -> Result<bool, SirError> {
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.add_edge(a, b)
    }

    /// Returns the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges as canonical `(smaller, larger)` pairs in insertion order.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Returns the degree of `node`, or `None` for unknown nodes.
    pub fn degree(&self, node: NodeId) -> Option<usize> {
        self.adjacency.get(node.index()).map(Vec::len)
    }

    /// Returns the label attached to `node`.
    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.labels.get_index(node.index()).map(String::as_str)
    }

    /// Looks up a node by label.
    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.labels.get_index_of(label).map(NodeId::from_index)
    }

    /// Returns the node labels in id order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Returns whether `a` and `b` are joined by an edge.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_set.contains(&canonical_pair(a, b))
    }

    fn check_node(&self, node: NodeId) -> Result<(), SirError> {
        if node.index() < self.adjacency.len() {
            Ok(())
        } else {
            Err(SirError::Graph(
                ErrorInfo::new("unknown-node", "edge endpoint is not part of the network")
                    .with_context("node", node.as_raw().to_string())
                    .with_context("nodes", self.adjacency.len().to_string()),
            ))
        }
    }
}

impl ContactGraph for ContactNetwork {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new((0..self.adjacency.len()).map(NodeId::from_index))
    }

    fn neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        match self.adjacency.get(node.index()) {
            Some(list) => Box::new(list.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

fn canonical_pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
