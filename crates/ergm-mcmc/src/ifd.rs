use ergm_core::{ErgmError, RngHandle};
use ergm_graph::Graph;
use ergm_stats::StatRegistry;

use crate::kernel::{log_batch, BatchOutcome, Proposal, Sampler, Tally};
use crate::proposal::ProposalStrategy;

/// Imbalance ratio `|Ndel - Nadd| / (Ndel + Nadd)` above which a batch is
/// reported as drifting.
pub const DRIFT_WARNING_RATIO: f64 = 0.8;

/// Improved fixed density sampler.
///
/// Additions and deletions are proposed with equal probability and an
/// auxiliary parameter `V` enters every log-ratio (added for additions,
/// subtracted for deletions). After each batch `V` moves towards balancing
/// accepted additions and deletions, which holds the tie count near its
/// starting value. `V` persists across `run` calls.
#[derive(Debug, Clone)]
pub struct IfdSampler {
    strategy: ProposalStrategy,
    gain: f64,
    aux_param: f64,
}

impl IfdSampler {
    /// Creates a sampler with update gain `gain` (usually 0.1) and `V = 0`.
    pub fn new(strategy: ProposalStrategy, gain: f64) -> Self {
        Self {
            strategy,
            gain,
            aux_param: 0.0,
        }
    }

    /// Current auxiliary parameter `V`.
    pub fn aux_param(&self) -> f64 {
        self.aux_param
    }

    /// Seeds the auxiliary parameter.
    pub fn set_aux_param(&mut self, value: f64) {
        self.aux_param = value;
    }

    /// Candidate space and legality rules in use.
    pub fn strategy(&self) -> &ProposalStrategy {
        &self.strategy
    }

    /// Update gain `K`.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Arc parameter implied by the current `V` for `graph`.
    pub fn implied_arc_parameter(&self, graph: &Graph) -> f64 {
        let dyads = self.strategy.num_dyads(graph);
        let ties = self.strategy.num_ties(graph);
        self.aux_param - arc_correction(dyads, ties)
    }
}

/// `ln((D - m) / (m + 1))`: the log-odds correction relating `V` to the arc
/// parameter for `D` candidate dyads holding `m` ties.
pub fn arc_correction(dyads: usize, ties: usize) -> f64 {
    let free = dyads.saturating_sub(ties) as f64;
    (free / (ties as f64 + 1.0)).ln()
}

/// `V` increment after a batch with `deletes` and `adds` accepted moves.
pub fn aux_param_step(gain: f64, deletes: usize, adds: usize) -> f64 {
    let total = deletes + adds;
    if total == 0 {
        return 0.0;
    }
    let diff = deletes as f64 - adds as f64;
    diff.signum() * gain * diff * diff / (total as f64 * total as f64)
}

impl Sampler for IfdSampler {
    fn name(&self) -> &'static str {
        "ifd"
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
        let mut forced = 0usize;
        for _ in 0..iterations {
            let ties = self.strategy.num_ties(graph);
            let dyads = self.strategy.num_dyads(graph);
            let mut is_delete = rng.uniform01() < 0.5;
            if is_delete && ties == 0 {
                is_delete = false;
                forced += 1;
            } else if !is_delete && ties >= dyads && dyads > 0 {
                is_delete = true;
                forced += 1;
            }
            let picked = if is_delete {
                self.strategy.random_tie(graph, rng)
            } else {
                self.strategy.random_absent_dyad(graph, rng)?
            };
            let Some(dyad) = picked else {
                tally.reject();
                continue;
            };
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
            let extra = if is_delete {
                -self.aux_param
            } else {
                self.aux_param
            };
            tally.step(graph, registry, theta, proposal, extra, commit, rng)?;
        }
        if forced > 0 {
            tracing::warn!(
                forced,
                iterations,
                "ifd proposals fell back to the only possible move type"
            );
        }

        let deletes = tally.accepted_deletes();
        let adds = tally.accepted_adds();
        let total = deletes + adds;
        if total > 0 {
            let imbalance = deletes.abs_diff(adds) as f64 / total as f64;
            if imbalance > DRIFT_WARNING_RATIO {
                tracing::warn!(
                    deletes,
                    adds,
                    imbalance,
                    aux_param = self.aux_param,
                    "ifd accepted moves are strongly unbalanced; density is drifting"
                );
            }
        }
        self.aux_param += aux_param_step(self.gain, deletes, adds);

        let outcome = tally.finish(Some(self.aux_param));
        log_batch(self.name(), iterations, &outcome);
        Ok(outcome)
    }

    fn aux_param(&self) -> Option<f64> {
        Some(self.aux_param)
    }

    fn arc_parameter(&self, graph: &Graph) -> Option<f64> {
        Some(self.implied_arc_parameter(graph))
    }
}
