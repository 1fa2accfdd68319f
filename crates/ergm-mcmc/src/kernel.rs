use ergm_core::errors::model_error;
use ergm_core::{Dyad, ErgmError, RngHandle};
use ergm_graph::Graph;
use ergm_stats::StatRegistry;
use serde::{Deserialize, Serialize};

/// Summary of one `run` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Accepted proposals over iterations.
    pub acceptance_rate: f64,
    /// Accepted proposals.
    pub accepted: usize,
    /// Proposals attempted, including steps with no legal candidate.
    pub proposals: usize,
    /// Accepted additions.
    pub accepted_adds: usize,
    /// Accepted deletions.
    pub accepted_deletes: usize,
    /// Sum of the change statistics of accepted additions.
    pub add_change_stats: Vec<f64>,
    /// Sum of the (negated) change statistics of accepted deletions.
    pub del_change_stats: Vec<f64>,
    /// Accepted deletions minus accepted additions.
    pub dz_arc: f64,
    /// IFD auxiliary parameter after the batch's update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifd_aux_param: Option<f64>,
}

impl BatchOutcome {
    /// Net change of the statistic vector over the batch (when committed).
    pub fn net_change(&self) -> Vec<f64> {
        self.add_change_stats
            .iter()
            .zip(&self.del_change_stats)
            .map(|(add, del)| add + del)
            .collect()
    }
}

/// A Metropolis-Hastings dyad-toggle sampler.
pub trait Sampler {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Performs exactly `iterations` proposals on `graph`.
    ///
    /// With `commit` accepted moves are kept; otherwise the graph is restored
    /// after each evaluation and only the accepted change statistics are
    /// accumulated.
    fn run(
        &mut self,
        graph: &mut Graph,
        registry: &StatRegistry,
        theta: &[f64],
        iterations: usize,
        commit: bool,
        rng: &mut RngHandle,
    ) -> Result<BatchOutcome, ErgmError>;

    /// Current auxiliary parameter, for samplers that carry one.
    fn aux_param(&self) -> Option<f64> {
        None
    }

    /// Arc parameter implied by the auxiliary parameter, for samplers that
    /// carry one.
    fn arc_parameter(&self, _graph: &Graph) -> Option<f64> {
        None
    }
}

/// A proposed toggle with its proposal-ratio correction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Proposal {
    pub dyad: Dyad,
    pub is_delete: bool,
    pub correction: f64,
}

/// Per-batch accumulators.
pub(crate) struct Tally {
    proposals: usize,
    accepted_adds: usize,
    accepted_deletes: usize,
    add: Vec<f64>,
    del: Vec<f64>,
    scratch: Vec<f64>,
}

impl Tally {
    pub fn new(registry: &StatRegistry, theta: &[f64]) -> Result<Self, ErgmError> {
        if theta.len() != registry.len() {
            return Err(
                model_error("length-mismatch", "one parameter per statistic is required")
                    .with_context("terms", registry.len())
                    .with_context("theta", theta.len()),
            );
        }
        let p = registry.len();
        Ok(Self {
            proposals: 0,
            accepted_adds: 0,
            accepted_deletes: 0,
            add: vec![0.0; p],
            del: vec![0.0; p],
            scratch: vec![0.0; p],
        })
    }

    /// Records a step with no legal candidate.
    pub fn reject(&mut self) {
        self.proposals += 1;
    }

    pub fn accepted_adds(&self) -> usize {
        self.accepted_adds
    }

    pub fn accepted_deletes(&self) -> usize {
        self.accepted_deletes
    }

    /// Evaluates `proposal` and applies the Metropolis-Hastings decision.
    ///
    /// `extra` is added to the log-ratio (the IFD auxiliary term).
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        graph: &mut Graph,
        registry: &StatRegistry,
        theta: &[f64],
        proposal: Proposal,
        extra: f64,
        commit: bool,
        rng: &mut RngHandle,
    ) -> Result<bool, ErgmError> {
        let Proposal {
            dyad,
            is_delete,
            correction,
        } = proposal;
        self.proposals += 1;
        if is_delete {
            graph.remove(dyad.i, dyad.j)?;
        }
        let weighted = registry.evaluate(graph, dyad, is_delete, theta, &mut self.scratch)?;
        let total = weighted + correction + extra;
        let accept = rng.uniform01() < total.exp();
        if accept {
            let target = if is_delete {
                self.accepted_deletes += 1;
                if !commit {
                    graph.insert(dyad.i, dyad.j)?;
                }
                &mut self.del
            } else {
                self.accepted_adds += 1;
                if commit {
                    graph.insert(dyad.i, dyad.j)?;
                }
                &mut self.add
            };
            for (acc, value) in target.iter_mut().zip(&self.scratch) {
                *acc += value;
            }
        } else if is_delete {
            graph.insert(dyad.i, dyad.j)?;
        }
        Ok(accept)
    }

    pub fn finish(self, ifd_aux_param: Option<f64>) -> BatchOutcome {
        let accepted = self.accepted_adds + self.accepted_deletes;
        let acceptance_rate = if self.proposals == 0 {
            0.0
        } else {
            accepted as f64 / self.proposals as f64
        };
        BatchOutcome {
            acceptance_rate,
            accepted,
            proposals: self.proposals,
            accepted_adds: self.accepted_adds,
            accepted_deletes: self.accepted_deletes,
            add_change_stats: self.add,
            del_change_stats: self.del,
            dz_arc: self.accepted_deletes as f64 - self.accepted_adds as f64,
            ifd_aux_param,
        }
    }
}

/// Emits the per-batch debug summary.
pub(crate) fn log_batch(name: &str, iterations: usize, outcome: &BatchOutcome) {
    tracing::debug!(
        sampler = name,
        iterations,
        acceptance_rate = outcome.acceptance_rate,
        accepted_adds = outcome.accepted_adds,
        accepted_deletes = outcome.accepted_deletes,
        aux_param = ?outcome.ifd_aux_param,
        "sampler batch finished"
    );
}
