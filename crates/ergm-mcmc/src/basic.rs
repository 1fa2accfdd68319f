use ergm_core::{ErgmError, RngHandle};
use ergm_graph::Graph;
use ergm_stats::StatRegistry;

use crate::kernel::{log_batch, BatchOutcome, Proposal, Sampler, Tally};
use crate::proposal::ProposalStrategy;

/// Toggles a uniformly chosen candidate dyad. The proposal is symmetric so no
/// correction is applied.
#[derive(Debug, Clone, Default)]
pub struct BasicSampler {
    strategy: ProposalStrategy,
}

impl BasicSampler {
    /// Creates a sampler over the strategy's candidate space.
    pub fn new(strategy: ProposalStrategy) -> Self {
        Self { strategy }
    }

    /// Candidate space and legality rules in use.
    pub fn strategy(&self) -> &ProposalStrategy {
        &self.strategy
    }
}

impl Sampler for BasicSampler {
    fn name(&self) -> &'static str {
        "basic"
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
            let Some(dyad) = self.strategy.random_dyad(graph, rng)? else {
                tally.reject();
                continue;
            };
            let is_delete = graph.exists(dyad.i, dyad.j);
            let legal = if is_delete {
                self.strategy.is_legal_delete(graph, dyad)
            } else {
                self.strategy.is_legal_add(graph, dyad)
            };
            if !legal {
                tally.reject();
                continue;
            }
            let proposal = Proposal {
                dyad,
                is_delete,
                correction: 0.0,
            };
            tally.step(graph, registry, theta, proposal, 0.0, commit, rng)?;
        }
        let outcome = tally.finish(None);
        log_batch(self.name(), iterations, &outcome);
        Ok(outcome)
    }
}
