//! Structural change statistics for directed graphs.
//!
//! Every function returns the change for adding the arc `i -> j`, which must
//! currently be absent.

use ergm_core::Dyad;
use ergm_graph::Graph;

/// Number of arcs.
pub fn arc(_graph: &Graph, _dyad: Dyad, _lambda: f64) -> f64 {
    1.0
}

/// Number of mutual pairs.
pub fn reciprocity(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    if !dyad.is_loop() && graph.exists(dyad.j, dyad.i) {
        1.0
    } else {
        0.0
    }
}

/// Nodes with positive in-degree and zero out-degree.
pub fn sink(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    // A loop raises both degrees of one node, so it can only end a sink.
    if i == j {
        return if graph.out_degree(i) == 0 && graph.in_degree(i) > 0 { -1.0 } else { 0.0 };
    }
    let mut delta = 0.0;
    if graph.out_degree(i) == 0 && graph.in_degree(i) > 0 {
        delta -= 1.0;
    }
    if graph.out_degree(j) == 0 && graph.in_degree(j) == 0 {
        delta += 1.0;
    }
    delta
}

/// Nodes with positive out-degree and zero in-degree.
pub fn source(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    if i == j {
        return if graph.in_degree(i) == 0 && graph.out_degree(i) > 0 { -1.0 } else { 0.0 };
    }
    let mut delta = 0.0;
    if graph.in_degree(i) == 0 && graph.out_degree(i) == 0 {
        delta += 1.0;
    }
    if graph.in_degree(j) == 0 && graph.out_degree(j) > 0 {
        delta -= 1.0;
    }
    delta
}

/// Nodes with no arcs at all.
pub fn isolates(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    let mut delta = 0.0;
    if graph.degree(i) == 0 {
        delta -= 1.0;
    }
    if i != j && graph.degree(j) == 0 {
        delta -= 1.0;
    }
    delta
}

/// Pairs of arcs sharing a receiver.
pub fn in_two_stars(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    graph.in_degree(dyad.j) as f64
}

/// Pairs of arcs sharing a sender.
pub fn out_two_stars(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    graph.out_degree(dyad.i) as f64
}

/// Directed two-paths `u -> w -> v` with `u != v`.
pub fn two_path(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    if i == j {
        return 0.0;
    }
    // Neither endpoint may serve as the middle node, so the reverse arc and
    // any loops at `i` or `j` are excluded from the degree counts.
    let excluded = [graph.exists(j, i), graph.exists(j, i), graph.exists(i, i), graph.exists(j, j)]
        .into_iter()
        .filter(|&present| present)
        .count();
    (graph.in_degree(i) + graph.out_degree(j) - excluded) as f64
}

/// Transitive triads `a -> b -> c, a -> c`.
pub fn transitive_triad(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    if i == j {
        return 0.0;
    }
    (graph.mixed_two_paths(i, j) + graph.shared_receivers(i, j) + graph.shared_senders(i, j))
        as f64
}

/// Cyclic triads `a -> b -> c -> a`.
pub fn cyclic_triad(graph: &Graph, dyad: Dyad, _lambda: f64) -> f64 {
    if dyad.is_loop() {
        return 0.0;
    }
    graph.mixed_two_paths(dyad.j, dyad.i) as f64
}

/// Geometrically weighted in-degree distribution.
pub fn alt_in_stars(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    lambda * (1.0 - decay(lambda).powi(graph.in_degree(dyad.j) as i32))
}

/// Geometrically weighted out-degree distribution.
pub fn alt_out_stars(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    lambda * (1.0 - decay(lambda).powi(graph.out_degree(dyad.i) as i32))
}

/// Alternating transitive k-triangles: each arc `a -> c` is weighted by its
/// number of two-paths `a -> w -> c`.
pub fn alt_k_triangles_t(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    if i == j {
        return 0.0;
    }
    let r = decay(lambda);
    let mut delta = 0.0;
    // Arcs i -> v gain the two-path i -> j -> v.
    for &v in graph.out_neighbours(i) {
        if v != i && v != j && graph.exists(j, v) {
            delta += r.powi(graph.mixed_two_paths(i, v) as i32);
        }
    }
    // Arcs v -> j gain the two-path v -> i -> j.
    for &v in graph.in_neighbours(i) {
        if v != i && v != j && graph.exists(v, j) {
            delta += r.powi(graph.mixed_two_paths(v, j) as i32);
        }
    }
    delta + lambda * (1.0 - r.powi(graph.mixed_two_paths(i, j) as i32))
}

/// Alternating transitive two-paths over all ordered pairs.
pub fn alt_two_paths_t(graph: &Graph, dyad: Dyad, lambda: f64) -> f64 {
    let Dyad { i, j } = dyad;
    if i == j {
        return 0.0;
    }
    let r = decay(lambda);
    let mut delta = 0.0;
    for &v in graph.out_neighbours(j) {
        if v != i && v != j {
            delta += r.powi(graph.mixed_two_paths(i, v) as i32);
        }
    }
    for &v in graph.in_neighbours(i) {
        if v != i && v != j {
            delta += r.powi(graph.mixed_two_paths(v, j) as i32);
        }
    }
    delta
}

#[inline]
pub(crate) fn decay(lambda: f64) -> f64 {
    1.0 - 1.0 / lambda
}
