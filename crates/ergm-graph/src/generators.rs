use ergm_core::errors::graph_error;
use ergm_core::{ErgmError, NodeIndex, RngHandle};
use rand::seq::SliceRandom;

use crate::flags::GraphConfig;
use crate::graph::Graph;

/// Generates a uniform random graph with approximately `density` of the
/// possible dyads present.
///
/// Ties are drawn by repeated uniform pair picks; invalid and duplicate picks
/// are skipped, and the attempt budget bounds the work for dense targets.
pub fn gen_random_graph(
    num_nodes: usize,
    config: GraphConfig,
    density: f64,
    rng: &mut RngHandle,
) -> Result<Graph, ErgmError> {
    if num_nodes == 0 {
        return Err(graph_error(
            "empty-graph",
            "random graph generator requires at least one node",
        ));
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(graph_error("density-range", "density must lie in [0, 1]")
            .with_context("density", density));
    }
    let mut graph = Graph::new(num_nodes, config);
    let target = (density * graph.max_dyads() as f64).round() as usize;
    let max_attempts = target.saturating_mul(32).max(num_nodes * 4);
    for _ in 0..max_attempts {
        if graph.num_ties() >= target {
            break;
        }
        let i = rng.uniform_int(num_nodes);
        let j = rng.uniform_int(num_nodes);
        match graph.insert(i, j) {
            Ok(()) => {}
            Err(err) if is_soft_error(&err) => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(graph)
}

/// Generates a snowball-shaped graph with `wave_sizes[k]` nodes in wave `k`
/// and attaches the zones.
///
/// Every node past the seed wave is tied to a random node of the preceding
/// wave; further ties between nodes at most one wave apart are added with
/// probability `density`.
pub fn gen_zoned_graph(
    wave_sizes: &[usize],
    config: GraphConfig,
    density: f64,
    rng: &mut RngHandle,
) -> Result<Graph, ErgmError> {
    if wave_sizes.is_empty() || wave_sizes.iter().any(|&size| size == 0) {
        return Err(graph_error("empty-wave", "every wave needs at least one node"));
    }
    if config.kind.is_bipartite() {
        return Err(graph_error(
            "unsupported-kind",
            "zoned generator builds one-mode graphs only",
        ));
    }
    let mut zones: Vec<u32> = Vec::new();
    let mut waves: Vec<Vec<NodeIndex>> = Vec::with_capacity(wave_sizes.len());
    for (wave, &size) in wave_sizes.iter().enumerate() {
        let start = zones.len();
        zones.extend(std::iter::repeat(wave as u32).take(size));
        waves.push((start..start + size).collect());
    }
    let num_nodes = zones.len();
    let mut graph = Graph::new(num_nodes, config);

    for wave in 1..waves.len() {
        for &node in &waves[wave] {
            if let Some(&parent) = waves[wave - 1].choose(rng) {
                graph.insert(parent, node)?;
            }
        }
    }
    for i in 0..num_nodes {
        for j in 0..num_nodes {
            if i == j || zones[i].abs_diff(zones[j]) > 1 {
                continue;
            }
            if !graph.is_directed() && i > j {
                continue;
            }
            if rng.uniform01() < density && !graph.exists(i, j) {
                graph.insert(i, j)?;
            }
        }
    }
    graph.attach_zones(zones)?;
    Ok(graph)
}

/// Generates a directed citation graph with `term_sizes[t]` nodes in term `t`
/// and attaches the terms. Nodes cite nodes of the same or earlier terms with
/// probability `density`.
pub fn gen_citation_graph(
    term_sizes: &[usize],
    density: f64,
    rng: &mut RngHandle,
) -> Result<Graph, ErgmError> {
    let terms: Vec<u32> = term_sizes
        .iter()
        .enumerate()
        .flat_map(|(term, &size)| std::iter::repeat(term as u32).take(size))
        .collect();
    if terms.is_empty() {
        return Err(graph_error(
            "empty-graph",
            "citation generator requires at least one node",
        ));
    }
    let mut graph = Graph::new(terms.len(), GraphConfig::directed());
    for i in 0..terms.len() {
        for j in 0..terms.len() {
            if i != j && terms[j] <= terms[i] && rng.uniform01() < density {
                graph.insert(i, j)?;
            }
        }
    }
    graph.attach_terms(terms)?;
    Ok(graph)
}

fn is_soft_error(error: &ErgmError) -> bool {
    matches!(
        error,
        ErgmError::Graph(info)
            if matches!(info.code.as_str(), "duplicate-tie" | "self-loop" | "same-mode")
    )
}
