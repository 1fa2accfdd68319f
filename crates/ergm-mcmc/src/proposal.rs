//! Candidate selection and move legality for the constrained samplers.
//!
//! A strategy decides which dyads a sampler may touch and how large the
//! candidate space is; the samplers themselves only differ in how they mix
//! additions and deletions.

use ergm_core::errors::{graph_error, sampler_error};
use ergm_core::{Dyad, ErgmError, GraphKind, Mode, RngHandle};
use ergm_graph::Graph;

use crate::config::{Conditioning, SamplerConfig};

/// Candidate space and legality rules shared by every sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposalStrategy {
    conditioning: Conditioning,
    forbid_reciprocity: bool,
    max_retries: usize,
}

impl ProposalStrategy {
    /// Creates a strategy.
    pub fn new(conditioning: Conditioning, forbid_reciprocity: bool, max_retries: usize) -> Self {
        Self {
            conditioning,
            forbid_reciprocity,
            max_retries: max_retries.max(1),
        }
    }

    /// Strategy described by a sampler configuration.
    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::new(
            config.conditioning,
            config.forbid_reciprocity,
            config.max_proposal_retries,
        )
    }

    /// Conditioning mode.
    pub fn conditioning(&self) -> Conditioning {
        self.conditioning
    }

    /// Whether additions creating mutual pairs are rejected.
    pub fn forbids_reciprocity(&self) -> bool {
        self.forbid_reciprocity
    }

    /// Checks that `graph` carries what this strategy needs.
    pub fn validate(&self, graph: &Graph) -> Result<(), ErgmError> {
        match self.conditioning {
            Conditioning::Snowball if graph.zones().is_none() => {
                return Err(graph_error(
                    "missing-zones",
                    "snowball conditioning needs zones attached to the graph",
                ));
            }
            Conditioning::Citation if graph.terms().is_none() => {
                return Err(graph_error(
                    "missing-terms",
                    "citation conditioning needs terms attached to the graph",
                ));
            }
            _ => {}
        }
        if self.forbid_reciprocity && !graph.is_directed() {
            return Err(graph_error(
                "reciprocity-requires-directed",
                "forbidding reciprocity only applies to directed graphs",
            ));
        }
        Ok(())
    }

    /// Size of the candidate dyad space.
    pub fn num_dyads(&self, graph: &Graph) -> usize {
        match self.conditioning {
            Conditioning::Free => graph.max_dyads(),
            Conditioning::Snowball => graph.zones().map_or(0, |z| z.num_inner_dyads()),
            Conditioning::Citation => graph.terms().map_or(0, |t| t.num_max_term_dyads()),
        }
    }

    /// Number of ties inside the candidate space.
    pub fn num_ties(&self, graph: &Graph) -> usize {
        match self.conditioning {
            Conditioning::Free => graph.num_ties(),
            Conditioning::Snowball => graph.zones().map_or(0, |z| z.inner_ties().len()),
            Conditioning::Citation => graph.terms().map_or(0, |t| t.max_term_ties().len()),
        }
    }

    /// Uniformly picks a tie inside the candidate space.
    pub fn random_tie(&self, graph: &Graph, rng: &mut RngHandle) -> Option<Dyad> {
        match self.conditioning {
            Conditioning::Free => graph.random_existing_dyad(rng),
            Conditioning::Snowball => graph.zones().and_then(|z| z.inner_ties().random(rng)),
            Conditioning::Citation => graph.terms().and_then(|t| t.max_term_ties().random(rng)),
        }
    }

    /// Uniformly picks a dyad from the candidate space, present or not.
    ///
    /// Returns `Ok(None)` when the space is empty.
    pub fn random_dyad(&self, graph: &Graph, rng: &mut RngHandle) -> Result<Option<Dyad>, ErgmError> {
        if self.num_dyads(graph) == 0 {
            return Ok(None);
        }
        for _ in 0..self.max_retries {
            if let Some(dyad) = self.draw_pair(graph, rng) {
                return Ok(Some(dyad));
            }
        }
        Err(self.exhausted("candidate dyad"))
    }

    /// Uniformly picks an absent dyad from the candidate space.
    ///
    /// Returns `Ok(None)` when every candidate dyad is present.
    pub fn random_absent_dyad(
        &self,
        graph: &Graph,
        rng: &mut RngHandle,
    ) -> Result<Option<Dyad>, ErgmError> {
        if self.num_ties(graph) >= self.num_dyads(graph) {
            return Ok(None);
        }
        for _ in 0..self.max_retries {
            if let Some(dyad) = self.draw_pair(graph, rng) {
                if !graph.exists(dyad.i, dyad.j) {
                    return Ok(Some(dyad));
                }
            }
        }
        Err(self.exhausted("absent dyad"))
    }

    /// Whether adding the absent `dyad` is allowed.
    pub fn is_legal_add(&self, graph: &Graph, dyad: Dyad) -> bool {
        !(self.forbid_reciprocity && !dyad.is_loop() && graph.exists(dyad.j, dyad.i))
    }

    /// Whether deleting the present `dyad` is allowed.
    pub fn is_legal_delete(&self, graph: &Graph, dyad: Dyad) -> bool {
        match (self.conditioning, graph.zones()) {
            (Conditioning::Snowball, Some(zones)) => !zones.is_last_prev_wave_tie(dyad),
            _ => true,
        }
    }

    /// One draw of the rejection sampler: a candidate pair or `None` when the
    /// draw falls outside the candidate space.
    fn draw_pair(&self, graph: &Graph, rng: &mut RngHandle) -> Option<Dyad> {
        let n = graph.num_nodes();
        let loops = graph.allows_loops();
        match self.conditioning {
            Conditioning::Free => match graph.kind() {
                GraphKind::Directed => {
                    let (i, j) = (rng.uniform_int(n), rng.uniform_int(n));
                    (i != j || loops).then_some(Dyad::new(i, j))
                }
                GraphKind::Undirected => {
                    let (i, j) = (rng.uniform_int(n), rng.uniform_int(n));
                    (i < j || (i == j && loops)).then_some(Dyad::new(i, j))
                }
                GraphKind::Bipartite { num_a } => {
                    let i = rng.uniform_int(num_a);
                    let j = num_a + rng.uniform_int(n - num_a);
                    Some(Dyad::new(i, j))
                }
            },
            Conditioning::Snowball => {
                let zones = graph.zones()?;
                let inner = zones.inner_nodes();
                let i = inner[rng.uniform_int(inner.len())];
                let j = inner[rng.uniform_int(inner.len())];
                if (i == j && !loops) || !zones.span_ok(i, j) {
                    return None;
                }
                match graph.kind() {
                    GraphKind::Directed => Some(Dyad::new(i, j)),
                    GraphKind::Undirected => (i <= j).then_some(Dyad::new(i, j)),
                    GraphKind::Bipartite { .. } => (graph.mode_of(i) == Some(Mode::A)
                        && graph.mode_of(j) == Some(Mode::B))
                    .then_some(Dyad::new(i, j)),
                }
            }
            Conditioning::Citation => {
                let senders = graph.terms()?.max_term_nodes();
                let i = senders[rng.uniform_int(senders.len())];
                let j = rng.uniform_int(n);
                (i != j || loops).then_some(Dyad::new(i, j))
            }
        }
    }

    fn exhausted(&self, what: &str) -> ErgmError {
        sampler_error(
            "proposal-retries-exhausted",
            "no candidate found within the retry budget",
        )
        .with_context("searching_for", what)
        .with_context("max_proposal_retries", self.max_retries)
        .with_hint("raise max_proposal_retries or check that the candidate space is not nearly full")
    }
}

impl Default for ProposalStrategy {
    fn default() -> Self {
        Self::from_config(&SamplerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ergm_graph::GraphConfig;

    #[test]
    fn undirected_draws_are_canonical() {
        let graph = Graph::new(6, GraphConfig::undirected());
        let strategy = ProposalStrategy::default();
        let mut rng = RngHandle::from_seed(2);
        for _ in 0..200 {
            let dyad = strategy.random_dyad(&graph, &mut rng).unwrap().unwrap();
            assert!(dyad.i < dyad.j);
        }
    }

    #[test]
    fn full_candidate_space_has_no_absent_dyad() {
        let graph = Graph::with_ties(2, GraphConfig::directed(), [(0, 1), (1, 0)]).unwrap();
        let strategy = ProposalStrategy::default();
        let mut rng = RngHandle::from_seed(2);
        assert_eq!(strategy.random_absent_dyad(&graph, &mut rng).unwrap(), None);
    }

    #[test]
    fn reciprocity_rule_blocks_mutual_pairs() {
        let graph = Graph::with_ties(3, GraphConfig::directed(), [(0, 1)]).unwrap();
        let strategy = ProposalStrategy::new(Conditioning::Free, true, 10);
        assert!(!strategy.is_legal_add(&graph, Dyad::new(1, 0)));
        assert!(strategy.is_legal_add(&graph, Dyad::new(1, 2)));
    }

    #[test]
    fn exhausted_retries_are_recoverable() {
        // Only one of 25 draws over a 5-node loop-free candidate space with a
        // single absent dyad succeeds; a budget of one draw fails quickly.
        let ties: Vec<(usize, usize)> = (0..5)
            .flat_map(|i| (0..5).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j && (i, j) != (3, 4))
            .collect();
        let graph = Graph::with_ties(5, GraphConfig::directed(), ties).unwrap();
        let strategy = ProposalStrategy::new(Conditioning::Free, false, 1);
        let mut rng = RngHandle::from_seed(0);
        let mut failures = 0;
        for _ in 0..50 {
            match strategy.random_absent_dyad(&graph, &mut rng) {
                Ok(Some(dyad)) => assert_eq!(dyad, Dyad::new(3, 4)),
                Ok(None) => panic!("space is not full"),
                Err(err) => {
                    assert!(err.is_recoverable());
                    assert_eq!(err.code(), "proposal-retries-exhausted");
                    failures += 1;
                }
            }
        }
        assert!(failures > 0);
    }
}
