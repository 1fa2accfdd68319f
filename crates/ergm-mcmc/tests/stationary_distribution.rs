//! Long-run means of the samplers against exact expectations obtained by
//! enumerating every reachable graph on a handful of nodes.

use ergm_core::{Dyad, RngHandle};
use ergm_graph::{Graph, GraphConfig};
use ergm_mcmc::{
    simulate, BasicSampler, Conditioning, ProposalStrategy, Sampler, SimulationConfig, TntSampler,
};
use ergm_stats::{StatRegistry, TermSpec};

fn candidate_dyads(num_nodes: usize, directed: bool) -> Vec<Dyad> {
    let mut dyads = Vec::new();
    for i in 0..num_nodes {
        for j in 0..num_nodes {
            if i != j && (directed || i < j) {
                dyads.push(Dyad::new(i, j));
            }
        }
    }
    dyads
}

fn exact_means(num_nodes: usize, config: GraphConfig, specs: &[TermSpec], theta: &[f64]) -> Vec<f64> {
    let dyads = candidate_dyads(num_nodes, config.kind.is_directed());
    let empty = Graph::new(num_nodes, config);
    let registry = StatRegistry::from_specs(&empty, specs).unwrap();
    let mut weighted = vec![0.0; specs.len()];
    let mut normaliser = 0.0;
    for mask in 0u32..(1 << dyads.len()) {
        let ties = dyads
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &dyad)| dyad);
        let graph = Graph::with_ties(num_nodes, config, ties).unwrap();
        let z = registry.observed(&graph).unwrap();
        let weight = z.iter().zip(theta).map(|(z, t)| z * t).sum::<f64>().exp();
        normaliser += weight;
        for (acc, value) in weighted.iter_mut().zip(&z) {
            *acc += weight * value;
        }
    }
    weighted.iter().map(|value| value / normaliser).collect()
}

fn sampled_means(
    sampler: &mut dyn Sampler,
    num_nodes: usize,
    config: GraphConfig,
    specs: &[TermSpec],
    theta: &[f64],
    seed: u64,
) -> Vec<f64> {
    let mut graph = Graph::new(num_nodes, config);
    let registry = StatRegistry::from_specs(&graph, specs).unwrap();
    let settings = SimulationConfig {
        burn_in: 2_000,
        interval: 40,
        samples: 6_000,
        seed,
        ..SimulationConfig::default()
    };
    let mut rng = RngHandle::from_seed(seed);
    let trace = simulate(&mut graph, &registry, theta, sampler, &settings, &mut rng).unwrap();
    // The tracked statistics must agree with a fresh evaluation.
    let last = trace.rows.last().unwrap();
    let fresh = registry.observed(&graph).unwrap();
    for (tracked, actual) in last.stats.iter().zip(&fresh) {
        assert!((tracked - actual).abs() < 1e-9);
    }
    trace.mean_stats()
}

fn assert_close(sampled: &[f64], exact: &[f64], tolerance: f64) {
    for (index, (s, e)) in sampled.iter().zip(exact).enumerate() {
        assert!(
            (s - e).abs() < tolerance,
            "statistic {index}: sampled {s} vs exact {e}"
        );
    }
}

#[test]
fn arc_reciprocity_matches_exact_expectation() {
    let specs = [TermSpec::named("Arc"), TermSpec::named("Reciprocity")];
    let theta = [-1.0, 1.5];
    let exact = exact_means(4, GraphConfig::directed(), &specs, &theta);

    // Pairs are independent under this model: check the enumeration itself.
    let z = 1.0 + 2.0 * (-1.0f64).exp() + (-0.5f64).exp();
    let arcs = 6.0 * (2.0 * (-1.0f64).exp() + 2.0 * (-0.5f64).exp()) / z;
    let mutual = 6.0 * (-0.5f64).exp() / z;
    assert!((exact[0] - arcs).abs() < 1e-9);
    assert!((exact[1] - mutual).abs() < 1e-9);

    let mut tnt = TntSampler::new(ProposalStrategy::default());
    let sampled = sampled_means(&mut tnt, 4, GraphConfig::directed(), &specs, &theta, 11);
    assert_close(&sampled, &exact, 0.15);

    let mut basic = BasicSampler::new(ProposalStrategy::default());
    let sampled = sampled_means(&mut basic, 4, GraphConfig::directed(), &specs, &theta, 12);
    assert_close(&sampled, &exact, 0.15);
}

#[test]
fn sparse_triangle_model_matches_exact_expectation() {
    let specs = [TermSpec::named("Edge"), TermSpec::named("Triangles")];
    let theta = [-1.5, 0.6];
    let exact = exact_means(4, GraphConfig::undirected(), &specs, &theta);

    let mut tnt = TntSampler::new(ProposalStrategy::default());
    let sampled = sampled_means(&mut tnt, 4, GraphConfig::undirected(), &specs, &theta, 21);
    assert_close(&sampled, &exact, 0.12);
}

// Seeds 0 and 1, first wave 2 and 3, outer node 4 held by the fixed arc 2 -> 4.
const WAVES: [u32; 5] = [0, 0, 1, 1, 2];
const FIXED: [(usize, usize); 1] = [(2, 4)];

fn keeps_every_wave_attached(ties: &[Dyad]) -> bool {
    (0..WAVES.len()).filter(|&node| WAVES[node] > 0).all(|node| {
        ties.iter().any(|d| {
            (d.i == node && WAVES[d.j] + 1 == WAVES[node])
                || (d.j == node && WAVES[d.i] + 1 == WAVES[node])
        })
    })
}

/// Gibbs means over every graph the snowball sampler can reach from a valid
/// start: inner arcs at most one wave apart, the outer arc held fixed, and
/// every node past the seeds tied to its preceding wave.
fn exact_snowball_means(specs: &[TermSpec], theta: &[f64]) -> (Vec<f64>, usize) {
    let n = WAVES.len();
    let inner: Vec<Dyad> = candidate_dyads(n, true)
        .into_iter()
        .filter(|d| WAVES[d.i] < 2 && WAVES[d.j] < 2 && WAVES[d.i].abs_diff(WAVES[d.j]) <= 1)
        .collect();
    let empty = Graph::new(n, GraphConfig::directed());
    let registry = StatRegistry::from_specs(&empty, specs).unwrap();
    let mut weighted = vec![0.0; specs.len()];
    let mut normaliser = 0.0;
    let mut states = 0;
    for mask in 0u32..(1 << inner.len()) {
        let ties: Vec<Dyad> = inner
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &dyad)| dyad)
            .chain(FIXED.iter().map(|&(i, j)| Dyad::new(i, j)))
            .collect();
        if !keeps_every_wave_attached(&ties) {
            continue;
        }
        states += 1;
        let graph = Graph::with_ties(n, GraphConfig::directed(), ties).unwrap();
        let z = registry.observed(&graph).unwrap();
        let weight = z.iter().zip(theta).map(|(z, t)| z * t).sum::<f64>().exp();
        normaliser += weight;
        for (acc, value) in weighted.iter_mut().zip(&z) {
            *acc += weight * value;
        }
    }
    (weighted.iter().map(|value| value / normaliser).collect(), states)
}

#[test]
fn snowball_tnt_matches_exact_expectation() {
    let specs = [
        TermSpec::named("Arc"),
        TermSpec::named("Reciprocity"),
        TermSpec::named("TransitiveTriad"),
    ];
    let theta = [-0.8, 1.0, 0.2];
    let (exact, states) = exact_snowball_means(&specs, &theta);
    // 4096 inner configurations, minus those leaving node 2 or node 3
    // without an arc to a seed: each seed-side pair of four arcs must not be
    // empty, so 2^4 * 15 * 15 remain.
    assert_eq!(states, 16 * 15 * 15);

    let mut graph = Graph::with_ties(
        WAVES.len(),
        GraphConfig::directed(),
        [(0, 2), (3, 1), (2, 4)],
    )
    .unwrap();
    graph.attach_zones(WAVES.to_vec()).unwrap();
    assert_eq!(graph.zones().unwrap().num_inner_dyads(), 12);

    let registry = StatRegistry::from_specs(&graph, &specs).unwrap();
    let settings = SimulationConfig {
        burn_in: 2_000,
        interval: 40,
        samples: 8_000,
        seed: 31,
        ..SimulationConfig::default()
    };
    let mut sampler = TntSampler::new(ProposalStrategy::new(Conditioning::Snowball, false, 10_000));
    let mut rng = RngHandle::from_seed(31);
    let trace = simulate(&mut graph, &registry, &theta, &mut sampler, &settings, &mut rng).unwrap();

    let zones = graph.zones().unwrap();
    assert!(graph.exists(2, 4));
    assert!(zones.prev_wave_degree(2) > 0 && zones.prev_wave_degree(3) > 0);
    assert_close(&trace.mean_stats(), &exact, 0.15);
}

#[test]
fn empty_candidate_space_counts_rejections() {
    // A single node without loops has no dyads at all.
    let mut graph = Graph::new(1, GraphConfig::directed());
    let registry = StatRegistry::from_specs(&graph, &[TermSpec::named("Arc")]).unwrap();
    let mut rng = RngHandle::from_seed(1);
    let mut sampler = TntSampler::new(ProposalStrategy::default());
    let outcome = sampler
        .run(&mut graph, &registry, &[0.0], 25, true, &mut rng)
        .unwrap();
    assert_eq!(outcome.proposals, 25);
    assert_eq!(outcome.accepted, 0);
    assert_eq!(outcome.acceptance_rate, 0.0);
}
