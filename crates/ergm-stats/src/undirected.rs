//! Structural change statistics for undirected graphs.

use ergm_core::Dyad;
use ergm_graph::Graph;

use crate::directed::decay;

/// Number of edges.
pub fn edge(_graph: &Graph, _dyad: Dyad, _lambda: f64) -> f64 {
    1.0
}

/// Pairs of edges sharing a node.
pub fn two_stars(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    // A loop adds one to the degree of its node.
    if dyad.is_loop() {
        return graph.degree(dyad.i) as f64;
    }
    (graph.degree(dyad.i) + graph.degree(dyad.j)) as f64
}

/// Number of triangles.
pub fn triangles(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    if dyad.is_loop() {
        return 0.0;
    }
    graph.common_neighbours(dyad.i, dyad.j) as f64
}

/// Geometrically weighted degree distribution.
pub fn alt_stars(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    let r = decay(lambda);
    if dyad.is_loop() {
        return lambda * (1.0 - r.powi(graph.degree(dyad.i) as i32));
    }
    lambda
        * (2.0
            - r.powi(graph.degree(dyad.i) as i32)
            - r.powi(graph.degree(dyad.j) as i32))
}

/// Alternating k-triangles: each edge weighted by its shared partners.
pub fn alt_k_triangles(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    if i == j {
        return 0.0;
    }
    let r = decay(lambda);
    let mut delta = 0.0;
    for &v in graph.neighbours(i) {
        if v != i && v != j && graph.exists(v, j) {
            delta += r.powi(graph.common_neighbours(i, v) as i32)
                + r.powi(graph.common_neighbours(j, v) as i32);
        }
    }
    delta + lambda * (1.0 - r.powi(graph.common_neighbours(i, j) as i32))
}

/// Alternating two-paths over all unordered pairs. Also used for bipartite
/// graphs, where pairs are always same-mode.
pub fn alt_two_paths(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    if i == j {
        return 0.0;
    }
    let r = decay(lambda);
    let mut delta = 0.0;
    for &v in graph.neighbours(i) {
        if v != i && v != j {
            delta += r.powi(graph.common_neighbours(v, j) as i32);
        }
    }
    for &v in graph.neighbours(j) {
        if v != i && v != j {
            delta += r.powi(graph.common_neighbours(i, v) as i32);
        }
    }
    delta
}
