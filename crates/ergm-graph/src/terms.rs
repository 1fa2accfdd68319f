//! Citation time periods and the derived index of mutable (latest-term) arcs.

use ergm_core::{Dyad, NodeIndex};

use crate::tie_list::TieList;

/// Term (time period) assignment for a citation network.
///
/// Only arcs sent by nodes in the latest term may change; everything else is
/// conditioned on.
#[derive(Debug, Clone)]
pub struct TermInfo {
    terms: Vec<u32>,
    max_term: u32,
    max_term_nodes: Vec<NodeIndex>,
    max_term_ties: TieList,
    num_max_term_dyads: usize,
}

impl TermInfo {
    pub(crate) fn build(
        terms: Vec<u32>,
        allow_loops: bool,
        ties: impl Iterator<Item = Dyad>,
    ) -> Self {
        let max_term = terms.iter().copied().max().unwrap_or(0);
        let max_term_nodes: Vec<NodeIndex> =
            (0..terms.len()).filter(|&n| terms[n] == max_term).collect();
        let receivers = if allow_loops {
            terms.len()
        } else {
            terms.len().saturating_sub(1)
        };
        let mut info = Self {
            num_max_term_dyads: max_term_nodes.len() * receivers,
            max_term_ties: TieList::new(),
            max_term_nodes,
            max_term,
            terms,
        };
        for dyad in ties {
            info.on_insert(dyad);
        }
        info
    }

    /// Term of `node`.
    pub fn term(&self, node: NodeIndex) -> u32 {
        self.terms[node]
    }

    /// Latest term.
    pub fn max_term(&self) -> u32 {
        self.max_term
    }

    /// Whether `node` belongs to the latest term.
    pub fn is_max_term(&self, node: NodeIndex) -> bool {
        self.terms[node] == self.max_term
    }

    /// Nodes in the latest term.
    pub fn max_term_nodes(&self) -> &[NodeIndex] {
        &self.max_term_nodes
    }

    /// Arcs sent by latest-term nodes.
    pub fn max_term_ties(&self) -> &TieList {
        &self.max_term_ties
    }

    /// Number of arcs latest-term nodes could send.
    pub fn num_max_term_dyads(&self) -> usize {
        self.num_max_term_dyads
    }

    pub(crate) fn on_insert(&mut self, dyad: Dyad) {
        if self.is_max_term(dyad.i) {
            self.max_term_ties.insert(dyad);
        }
    }

    pub(crate) fn on_remove(&mut self, dyad: Dyad) {
        if self.is_max_term(dyad.i) {
            self.max_term_ties.remove(dyad);
        }
    }
}
