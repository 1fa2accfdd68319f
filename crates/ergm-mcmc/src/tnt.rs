use ergm_core::{ErgmError, RngHandle};
use ergm_graph::Graph;
use ergm_stats::StatRegistry;

use crate::kernel::{log_batch, BatchOutcome, Proposal, Sampler, Tally};
use crate::proposal::ProposalStrategy;

/// Probability of proposing the deletion of an existing tie.
pub const TIE_PROBABILITY: f64 = 0.5;

/// Tie / no-tie sampler.
///
/// With probability [`TIE_PROBABILITY`] (when any candidate tie exists) a
/// uniformly chosen tie is deleted; otherwise a uniformly chosen candidate
/// dyad is toggled. This keeps sparse graphs mixing: plain uniform toggles
/// almost always propose additions.
#[derive(Debug, Clone, Default)]
pub struct TntSampler {
    strategy: ProposalStrategy,
}

impl TntSampler {
    /// Creates a sampler over the strategy's candidate space.
    pub fn new(strategy: ProposalStrategy) -> Self {
        Self { strategy }
    }

    /// Candidate space and legality rules in use.
    pub fn strategy(&self) -> &ProposalStrategy {
        &self.strategy
    }
}

/// Log proposal ratio `q(reverse) / q(forward)` for adding a dyad when the
/// candidate space holds `dyads` dyads and `ties` ties.
pub fn add_correction(dyads: usize, ties: usize) -> f64 {
    let p = TIE_PROBABILITY;
    let d = dyads as f64;
    if ties == 0 {
        (p * d + 1.0 - p).ln()
    } else {
        let odds = p / (1.0 - p);
        (1.0 + odds * d / (ties as f64 + 1.0)).ln()
    }
}

/// Log proposal ratio for deleting one of `ties` ties.
pub fn delete_correction(dyads: usize, ties: usize) -> f64 {
    let p = TIE_PROBABILITY;
    let d = dyads as f64;
    if ties == 1 {
        (1.0 / (p * d + 1.0 - p)).ln()
    } else {
        let odds = p / (1.0 - p);
        let m = ties as f64;
        (m / (odds * d + m)).ln()
    }
}

impl Sampler for TntSampler {
    fn name(&self) -> &'static str {
        "tnt"
    }

    fn run(
        &mut self,
        graph: &mut Graph,
        registry: &StatRegistry,
        theta: &[f64],
        iterations: usize,
        commit: bool,
        rng: &mut RngHandle,
    ) -> Result<BatchOutcome, ErgmError> {
        self.strategy.validate(graph)?;
        let mut tally = Tally::new(registry, theta)?;
        for _ in 0..iterations {
            let dyads = self.strategy.num_dyads(graph);
            let ties = self.strategy.num_ties(graph);
            let picked = if ties > 0 && rng.uniform01() < TIE_PROBABILITY {
                self.strategy.random_tie(graph, rng)
            } else {
                self.strategy.random_dyad(graph, rng)?
            };
            let Some(dyad) = picked else {
                tally.reject();
                continue;
            };
            let is_delete = graph.exists(dyad.i, dyad.j);
            let (legal, correction) = if is_delete {
                (
                    self.strategy.is_legal_delete(graph, dyad),
                    delete_correction(dyads, ties),
                )
            } else {
                (
                    self.strategy.is_legal_add(graph, dyad),
                    add_correction(dyads, ties),
                )
            };
            if !legal {
                tally.reject();
                continue;
            }
            let proposal = Proposal {
                dyad,
                is_delete,
                correction,
            };
            tally.step(graph, registry, theta, proposal, 0.0, commit, rng)?;
        }
        let outcome = tally.finish(None);
        log_batch(self.name(), iterations, &outcome);
        Ok(outcome)
    }
}
