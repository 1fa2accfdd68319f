use ergm_core::{Dyad, RngHandle};
use ergm_graph::{
    canonical_hash, gen_random_graph, graph_from_json, graph_to_json, Graph, GraphConfig,
    NodeAttributes, TwoPathKind,
};

fn snapshot_counts(graph: &Graph) -> Vec<u32> {
    let mut counts = Vec::new();
    for kind in TwoPathKind::DIRECTED {
        for u in 0..graph.num_nodes() {
            for v in 0..graph.num_nodes() {
                counts.push(graph.two_paths(kind, u, v));
            }
        }
    }
    counts
}

#[test]
fn five_node_toggle_on_then_off_restores_counts() {
    let mut graph = Graph::with_ties(5, GraphConfig::directed(), [(0, 1), (1, 2)]).unwrap();
    assert_eq!(graph.density(false), 2.0 / 20.0);
    let before = snapshot_counts(&graph);
    assert_eq!(graph.mixed_two_paths(0, 2), 1);

    assert!(graph.toggle(2, 0).unwrap());
    assert_eq!(graph.mixed_two_paths(2, 1), 1);
    assert_eq!(graph.mixed_two_paths(1, 0), 1);
    assert!(!graph.toggle(2, 0).unwrap());

    assert_eq!(snapshot_counts(&graph), before);
    assert_eq!(graph.density(false), 2.0 / 20.0);
}

#[test]
fn shared_sender_and_receiver_counts_follow_definitions() {
    let graph =
        Graph::with_ties(4, GraphConfig::directed(), [(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
    assert_eq!(graph.shared_senders(1, 2), 1);
    assert_eq!(graph.shared_senders(2, 1), 1);
    assert_eq!(graph.shared_receivers(1, 2), 1);
    assert_eq!(graph.mixed_two_paths(0, 3), 2);
    assert_eq!(graph.mixed_two_paths(3, 0), 0);
}

#[test]
fn insert_and_remove_enforce_requested_state() {
    let mut graph = Graph::new(3, GraphConfig::directed());
    graph.insert(0, 1).unwrap();
    assert_eq!(graph.insert(0, 1).unwrap_err().code(), "duplicate-tie");
    graph.remove(0, 1).unwrap();
    assert_eq!(graph.remove(0, 1).unwrap_err().code(), "missing-tie");
}

#[test]
fn random_existing_dyad_returns_a_present_tie() {
    let mut rng = RngHandle::from_seed(11);
    let graph = gen_random_graph(20, GraphConfig::undirected(), 0.2, &mut rng).unwrap();
    assert_eq!(graph.num_ties(), 38);
    for _ in 0..50 {
        let dyad = graph.random_existing_dyad(&mut rng).unwrap();
        assert!(graph.exists(dyad.i, dyad.j));
        assert!(dyad.i < dyad.j);
    }
    let empty = Graph::new(3, GraphConfig::directed());
    assert!(empty.random_existing_dyad(&mut rng).is_none());
}

#[test]
fn json_snapshot_restores_structure_and_metadata() {
    let mut graph =
        Graph::with_ties(4, GraphConfig::undirected(), [(0, 1), (1, 2), (2, 3)]).unwrap();
    graph.attach_zones(vec![0, 1, 2, 3]).unwrap();
    let mut attributes = NodeAttributes::default();
    attributes
        .continuous
        .push(ergm_graph::Column::new("age", vec![30.0, 41.5, f64::NAN, 22.0]));
    graph.set_attributes(attributes).unwrap();

    let json = graph_to_json(&graph).unwrap();
    let restored = graph_from_json(&json).unwrap();
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
    assert!(restored.exists(2, 1));
    assert_eq!(restored.zones().unwrap().inner_ties().len(), 2);
    assert!(restored.attributes().continuous(0, 2).is_nan());
}

#[test]
fn canonical_hash_ignores_insertion_order() {
    let a = Graph::with_ties(4, GraphConfig::directed(), [(0, 1), (2, 3), (3, 0)]).unwrap();
    let b = Graph::with_ties(4, GraphConfig::directed(), [(3, 0), (0, 1), (2, 3)]).unwrap();
    let c = Graph::with_ties(4, GraphConfig::directed(), [(1, 0), (2, 3), (3, 0)]).unwrap();
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
    assert_ne!(canonical_hash(&a), canonical_hash(&c));
}

#[test]
fn attribute_columns_are_validated_against_node_count() {
    let mut graph = Graph::new(3, GraphConfig::directed());
    let mut attributes = NodeAttributes::default();
    attributes
        .binary
        .push(ergm_graph::Column::new("smoker", vec![Some(true), None]));
    assert_eq!(
        graph.set_attributes(attributes).unwrap_err().code(),
        "attribute-length"
    );
    assert_eq!(graph.ties().iter().collect::<Vec<Dyad>>(), Vec::new());
}
