//! Structural change statistics for two-mode graphs.

use ergm_core::{Dyad, Mode, NodeIndex};
use ergm_graph::Graph;

use crate::directed::decay;

fn endpoint(graph: &Graph, dyad: Dyad, mode: Mode) -> NodeIndex {
    if graph.mode_of(dyad.i) == Some(mode) {
        dyad.i
    } else {
        dyad.j
    }
}

/// Geometrically weighted degree distribution of mode A nodes.
pub fn alt_stars_a(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    let node = endpoint(graph, dyad, Mode::A);
    lambda * (1.0 - decay(lambda).powi(graph.degree(node) as i32))
}

/// Geometrically weighted degree distribution of mode B nodes.
pub fn alt_stars_b(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    let node = endpoint(graph, dyad, Mode::B);
    lambda * (1.0 - decay(lambda).powi(graph.degree(node) as i32))
}

/// Four-cycles `a - b - a' - b'`.
pub fn four_cycles(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    graph
        .neighbours(j)
        .iter()
        .filter(|&&v| v != i)
        .map(|&v| graph.common_neighbours(i, v) as f64)
        .sum()
}
