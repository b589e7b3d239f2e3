use sirnet_core::errors::SirError;
use sirnet_core::{ContactGraph, NodeId};
use sirnet_graph::ContactNetwork;

fn ids(values: &[usize]) -> Vec<NodeId> {
    values.iter().copied().map(NodeId::from_index).collect()
}

#[test]
fn edges_are_undirected_and_ordered() {
    let network = ContactNetwork::from_edges(4, &[(0, 1), (0, 2), (3, 0)]).unwrap();
    assert_eq!(network.node_count(), 4);
    assert_eq!(network.edge_count(), 3);
    assert_eq!(
        network.neighbors(NodeId::from_index(0)).collect::<Vec<_>>(),
        ids(&[1, 2, 3])
    );
    assert_eq!(
        network.neighbors(NodeId::from_index(3)).collect::<Vec<_>>(),
        ids(&[0])
    );
    assert!(network.has_edge(NodeId::from_index(0), NodeId::from_index(3)));
    assert!(network.has_edge(NodeId::from_index(3), NodeId::from_index(0)));
    assert_eq!(network.degree(NodeId::from_index(1)), Some(1));
}

#[test]
fn duplicate_edges_collapse() {
    let mut network = ContactNetwork::with_nodes(2);
    let a = NodeId::from_index(0);
    let b = NodeId::from_index(1);
    assert!(network.add_edge(a, b).unwrap());
    assert!(!network.add_edge(b, a).unwrap());
    assert_eq!(network.edge_count(), 1);
    assert_eq!(network.degree(a), Some(1));
}

#[test]
fn self_loops_are_rejected() {
    let mut network = ContactNetwork::with_nodes(1);
    let node = NodeId::from_index(0);
    match network.add_edge(node, node).unwrap_err() {
        SirError::Graph(info) => {
            assert_eq!(info.code, "self-loop");
            assert_eq!(info.context.get("node"), Some(&"0".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_endpoints_are_rejected() {
    let err = ContactNetwork::from_edges(2, &[(0, 5)]).unwrap_err();
    match err {
        SirError::Graph(info) => {
            assert_eq!(info.code, "unknown-node");
            assert_eq!(info.context.get("node"), Some(&"5".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_nodes_have_no_neighbours() {
    let network = ContactNetwork::with_nodes(2);
    assert_eq!(network.neighbors(NodeId::from_index(10)).count(), 0);
    assert_eq!(network.degree(NodeId::from_index(10)), None);
}

#[test]
fn labels_map_to_dense_ids() {
    let mut network = ContactNetwork::new();
    network.add_labeled_edge("alice", "bob").unwrap();
    network.add_labeled_edge("carol", "alice").unwrap();
    assert_eq!(network.node_by_label("alice"), Some(NodeId::from_index(0)));
    assert_eq!(network.node_by_label("carol"), Some(NodeId::from_index(2)));
    assert_eq!(network.label(NodeId::from_index(1)), Some("bob"));
    assert_eq!(
        network.nodes().collect::<Vec<_>>(),
        ids(&[0, 1, 2])
    );
}
