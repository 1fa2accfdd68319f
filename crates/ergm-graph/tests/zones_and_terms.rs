use ergm_core::{Dyad, RngHandle};
use ergm_graph::{gen_citation_graph, gen_zoned_graph, Graph, GraphConfig};

fn check_zone_invariants(graph: &Graph) {
    let zones = graph.zones().unwrap();
    for dyad in graph.ties().iter() {
        assert!(zones.zone(dyad.i).abs_diff(zones.zone(dyad.j)) <= 1);
    }
    for node in 0..graph.num_nodes() {
        if zones.zone(node) > 0 {
            assert!(zones.prev_wave_degree(node) > 0, "node {node}");
        }
    }
    let expected_inner = graph
        .ties()
        .iter()
        .filter(|d| zones.is_inner(d.i) && zones.is_inner(d.j))
        .count();
    assert_eq!(zones.inner_ties().len(), expected_inner);
}

#[test]
fn generated_snowball_graphs_satisfy_wave_rules() {
    let mut rng = RngHandle::from_seed(3);
    for config in [GraphConfig::directed(), GraphConfig::undirected()] {
        let graph = gen_zoned_graph(&[3, 5, 6], config, 0.3, &mut rng).unwrap();
        check_zone_invariants(&graph);
        assert_eq!(graph.zones().unwrap().max_zone(), 2);
        assert_eq!(graph.zones().unwrap().inner_nodes().len(), 8);
    }
}

#[test]
fn inner_tie_list_tracks_toggles() {
    let mut graph = Graph::with_ties(5, GraphConfig::undirected(), [(0, 1), (0, 2), (2, 3), (3, 4)])
        .unwrap();
    graph.attach_zones(vec![0, 1, 1, 2, 3]).unwrap();
    assert_eq!(graph.zones().unwrap().inner_ties().len(), 3);

    graph.toggle(1, 2).unwrap();
    assert!(graph.zones().unwrap().inner_ties().contains(Dyad::new(1, 2)));
    graph.toggle(1, 3).unwrap();
    assert_eq!(graph.zones().unwrap().prev_wave_degree(3), 2);
    assert!(graph.zones().unwrap().inner_ties().contains(Dyad::new(1, 3)));
    graph.toggle(1, 3).unwrap();
    assert_eq!(graph.zones().unwrap().prev_wave_degree(3), 1);
    check_zone_invariants(&graph);
}

#[test]
fn zone_span_is_enforced_after_attachment() {
    let mut graph = Graph::with_ties(3, GraphConfig::directed(), [(0, 1), (1, 2)]).unwrap();
    graph.attach_zones(vec![0, 1, 2]).unwrap();
    assert_eq!(graph.toggle(0, 2).unwrap_err().code(), "zone-span");
    assert!(!graph.exists(0, 2));
}

#[test]
fn zones_are_immutable_once_attached() {
    let mut graph = Graph::with_ties(2, GraphConfig::directed(), [(0, 1)]).unwrap();
    graph.attach_zones(vec![0, 1]).unwrap();
    assert_eq!(
        graph.attach_zones(vec![0, 1]).unwrap_err().code(),
        "already-attached"
    );
    let mut short = Graph::new(3, GraphConfig::directed());
    assert_eq!(short.attach_zones(vec![0]).unwrap_err().code(), "metadata-length");
}

#[test]
fn max_term_tie_list_holds_only_latest_senders() {
    let mut rng = RngHandle::from_seed(17);
    let mut graph = gen_citation_graph(&[4, 4, 3], 0.4, &mut rng).unwrap();
    let terms = graph.terms().unwrap();
    assert_eq!(terms.max_term(), 2);
    assert_eq!(terms.max_term_nodes(), &[8, 9, 10]);
    assert_eq!(terms.num_max_term_dyads(), 3 * 10);
    let expected = graph.ties().iter().filter(|d| d.i >= 8).count();
    assert_eq!(terms.max_term_ties().len(), expected);

    let added = graph.toggle(8, 0).unwrap();
    let terms = graph.terms().unwrap();
    assert_eq!(terms.max_term_ties().contains(Dyad::new(8, 0)), added);
    graph.toggle(0, 8).unwrap();
    assert!(!graph.terms().unwrap().max_term_ties().contains(Dyad::new(0, 8)));
}
