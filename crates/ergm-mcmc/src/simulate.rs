use ergm_core::errors::config_error;
use ergm_core::{ErgmError, RngHandle};
use ergm_graph::Graph;
use ergm_stats::StatRegistry;
use serde::{Deserialize, Serialize};

use crate::config::{SamplerConfig, SamplerKind, SimulationConfig};
use crate::determinism::chain_rng;
use crate::kernel::Sampler;
use crate::proposal::ProposalStrategy;
use crate::{BasicSampler, IfdSampler, TntSampler};

/// One recorded sample of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    /// Iterations performed after burn-in when the sample was taken.
    pub iteration: usize,
    /// Statistic vector of the graph.
    pub stats: Vec<f64>,
    /// Acceptance rate of the batch leading to this sample.
    pub acceptance_rate: f64,
    /// IFD auxiliary parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_param: Option<f64>,
    /// Arc parameter implied by the IFD auxiliary parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_parameter: Option<f64>,
}

/// Statistic trajectory of a simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrace {
    /// Statistic labels, in registry order.
    pub labels: Vec<String>,
    /// Recorded samples.
    pub rows: Vec<SampleRow>,
}

impl SimulationTrace {
    /// Column means of the recorded statistic vectors.
    pub fn mean_stats(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.labels.len()];
        if self.rows.is_empty() {
            return means;
        }
        for row in &self.rows {
            for (mean, value) in means.iter_mut().zip(&row.stats) {
                *mean += value;
            }
        }
        let count = self.rows.len() as f64;
        means.iter_mut().for_each(|mean| *mean /= count);
        means
    }

    /// Serializes the trace to JSON.
    pub fn to_json(&self) -> Result<String, ErgmError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| config_error("serialize-json", err.to_string()))
    }
}

/// Builds the sampler described by `config`.
pub fn build_sampler(config: &SamplerConfig) -> Box<dyn Sampler> {
    let strategy = ProposalStrategy::from_config(config);
    match config.kind {
        SamplerKind::Basic => Box::new(BasicSampler::new(strategy)),
        SamplerKind::Tnt => Box::new(TntSampler::new(strategy)),
        SamplerKind::Ifd => Box::new(IfdSampler::new(strategy, config.ifd_k)),
    }
}

/// Runs `burn_in` iterations, then records `samples` statistic vectors spaced
/// `interval` iterations apart. All moves are committed to `graph`.
pub fn simulate(
    graph: &mut Graph,
    registry: &StatRegistry,
    theta: &[f64],
    sampler: &mut dyn Sampler,
    config: &SimulationConfig,
    rng: &mut RngHandle,
) -> Result<SimulationTrace, ErgmError> {
    config.validate()?;
    let mut stats = registry.observed(graph)?;
    if config.burn_in > 0 {
        let outcome = sampler.run(graph, registry, theta, config.burn_in, true, rng)?;
        accumulate(&mut stats, &outcome.net_change());
        tracing::debug!(
            sampler = sampler.name(),
            burn_in = config.burn_in,
            acceptance_rate = outcome.acceptance_rate,
            "burn-in finished"
        );
    }

    let mut trace = SimulationTrace {
        labels: registry.labels().map(str::to_owned).collect(),
        rows: Vec::with_capacity(config.samples),
    };
    for sample in 1..=config.samples {
        let outcome = sampler.run(graph, registry, theta, config.interval, true, rng)?;
        accumulate(&mut stats, &outcome.net_change());
        trace.rows.push(SampleRow {
            iteration: sample * config.interval,
            stats: stats.clone(),
            acceptance_rate: outcome.acceptance_rate,
            aux_param: sampler.aux_param(),
            arc_parameter: sampler.arc_parameter(graph),
        });
    }
    Ok(trace)
}

/// Builds the configured sampler and runs [`simulate`] on chain 0 of the
/// configured seed.
pub fn simulate_from_config(
    graph: &mut Graph,
    registry: &StatRegistry,
    theta: &[f64],
    config: &SimulationConfig,
) -> Result<SimulationTrace, ErgmError> {
    let mut sampler = build_sampler(&config.sampler);
    let mut rng = chain_rng(config.seed, 0);
    simulate(graph, registry, theta, sampler.as_mut(), config, &mut rng)
}

/// Runs `chains` independent simulations, each from its own copy of `start`
/// and its own derived seed.
pub fn simulate_chains(
    start: &Graph,
    registry: &StatRegistry,
    theta: &[f64],
    config: &SimulationConfig,
    chains: usize,
) -> Result<Vec<SimulationTrace>, ErgmError> {
    (0..chains)
        .map(|chain| -> Result<SimulationTrace, ErgmError> {
            let mut graph = start.clone();
            let mut sampler = build_sampler(&config.sampler);
            let mut rng = chain_rng(config.seed, chain);
            let trace = simulate(&mut graph, registry, theta, sampler.as_mut(), config, &mut rng)?;
            tracing::info!(chain, samples = trace.rows.len(), "chain finished");
            Ok(trace)
        })
        .collect()
}

fn accumulate(stats: &mut [f64], change: &[f64]) {
    for (value, delta) in stats.iter_mut().zip(change) {
        *value += delta;
    }
}
