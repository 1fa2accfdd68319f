//! Nodal attribute change statistics. Missing values never contribute.

use ergm_core::{Dyad, NodeIndex};
use ergm_graph::Graph;

fn flag(graph: &Graph, attr: usize, node: NodeIndex) -> bool {
    graph.attributes().binary(attr, node).unwrap_or(false)
}

fn indicator(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Arcs sent by nodes with the binary attribute.
pub fn sender(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    indicator(flag(graph, attr, dyad.i))
}

/// Arcs received by nodes with the binary attribute.
pub fn receiver(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    indicator(flag(graph, attr, dyad.j))
}

/// Tie endpoints with the binary attribute.
pub fn activity(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    indicator(flag(graph, attr, dyad.i)) + indicator(flag(graph, attr, dyad.j))
}

/// Ties whose endpoints both have the binary attribute.
pub fn interaction(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    indicator(flag(graph, attr, dyad.i) && flag(graph, attr, dyad.j))
}

fn same_category(graph: &Graph, dyad: Dyad, attr: usize) -> Option<bool> {
    let attributes = graph.attributes();
    let a = attributes.categorical(attr, dyad.i)?;
    let b = attributes.categorical(attr, dyad.j)?;
    Some(a == b)
}

/// Ties between nodes in the same category.
pub fn matching(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    indicator(same_category(graph, dyad, attr) == Some(true))
}

/// Mutual pairs between nodes in the same category.
pub fn matching_reciprocity(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    indicator(
        !dyad.is_loop()
            && same_category(graph, dyad, attr) == Some(true)
            && graph.exists(dyad.j, dyad.i),
    )
}

/// Ties between nodes in different categories.
pub fn mismatching(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    indicator(same_category(graph, dyad, attr) == Some(false))
}

fn value(graph: &Graph, attr: usize, node: NodeIndex) -> f64 {
    let value = graph.attributes().continuous(attr, node);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Sum of the sender's continuous attribute over arcs.
pub fn continuous_sender(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    value(graph, attr, dyad.i)
}

/// Sum of the receiver's continuous attribute over arcs.
pub fn continuous_receiver(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    value(graph, attr, dyad.j)
}

/// Absolute difference of the endpoints' continuous attribute.
pub fn diff(graph: &Graph, dyad: Dyad, attr: usize) -> f64 {
    let attributes = graph.attributes();
    let delta = attributes.continuous(attr, dyad.i) - attributes.continuous(attr, dyad.j);
    if delta.is_nan() {
        0.0
    } else {
        delta.abs()
    }
}

/// Ties whose endpoints match on both categorical attributes.
pub fn matching_interaction(graph: &Graph, dyad: Dyad, first: usize, second: usize) -> f64 {
    indicator(
        same_category(graph, dyad, first) == Some(true)
            && same_category(graph, dyad, second) == Some(true),
    )
}
