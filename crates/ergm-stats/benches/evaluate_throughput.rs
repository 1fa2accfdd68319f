use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ergm_core::RngHandle;
use ergm_graph::{gen_random_graph, GraphConfig};
use ergm_stats::{StatRegistry, TermSpec};

fn evaluate_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(5);
    let graph = gen_random_graph(1_000, GraphConfig::directed(), 0.005, &mut rng).unwrap();
    let specs: Vec<_> = [
        "Arc",
        "Reciprocity",
        "AltInStars",
        "AltOutStars",
        "AltKTrianglesT",
        "AltTwoPathsT",
    ]
    .into_iter()
    .map(TermSpec::named)
    .collect();
    let registry = StatRegistry::from_specs(&graph, &specs).unwrap();
    let theta = vec![0.1; registry.len()];
    let mut out = vec![0.0; registry.len()];
    let n = graph.num_nodes();

    c.bench_function("evaluate_alternating_1k", |b| {
        b.iter(|| {
            let i = rng.uniform_int(n);
            let j = (i + 1 + rng.uniform_int(n - 1)) % n;
            let dyad = graph.dyad(i, j);
            black_box(registry.evaluate(&graph, dyad, false, &theta, &mut out).unwrap());
        });
    });
}

criterion_group!(benches, evaluate_bench);
criterion_main!(benches);
