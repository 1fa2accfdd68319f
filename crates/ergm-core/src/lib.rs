#![deny(missing_docs)]
#![doc = "Core types shared by the ERGM crates: dyads, graph kinds, structured errors and the seeded generator."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErgmError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};

/// Node identifier. Nodes of a graph with `N` nodes are `0..N`.
pub type NodeIndex = usize;

/// A potential tie location between two nodes.
///
/// For directed graphs the pair is ordered (`i -> j`). For undirected and
/// bipartite graphs callers should go through [`GraphKind::dyad`] which
/// canonicalises the pair to `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dyad {
    /// Sender (directed) or smaller endpoint (undirected).
    pub i: NodeIndex,
    /// Receiver (directed) or larger endpoint (undirected).
    pub j: NodeIndex,
}

impl Dyad {
    /// Creates a dyad without canonicalisation.
    pub const fn new(i: NodeIndex, j: NodeIndex) -> Self {
        Self { i, j }
    }

    /// Returns the same pair with endpoints swapped.
    pub const fn reversed(self) -> Self {
        Self {
            i: self.j,
            j: self.i,
        }
    }

    /// Whether both endpoints are the same node.
    pub const fn is_loop(self) -> bool {
        self.i == self.j
    }
}

impl From<(NodeIndex, NodeIndex)> for Dyad {
    fn from((i, j): (NodeIndex, NodeIndex)) -> Self {
        Dyad::new(i, j)
    }
}

/// Bipartite mode of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// First mode, nodes `0..num_a`.
    A,
    /// Second mode, nodes `num_a..N`.
    B,
}

/// Kind of network a graph store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GraphKind {
    /// Ordered ties `i -> j`.
    Directed,
    /// Unordered ties `{i, j}`.
    Undirected,
    /// Unordered ties between mode A (`0..num_a`) and mode B nodes only.
    Bipartite {
        /// Number of mode A nodes.
        num_a: usize,
    },
}

impl GraphKind {
    /// Whether ties are ordered.
    pub fn is_directed(&self) -> bool {
        matches!(self, GraphKind::Directed)
    }

    /// Whether the graph is two-mode.
    pub fn is_bipartite(&self) -> bool {
        matches!(self, GraphKind::Bipartite { .. })
    }

    /// Builds the canonical dyad for this kind.
    pub fn dyad(&self, i: NodeIndex, j: NodeIndex) -> Dyad {
        match self {
            GraphKind::Directed => Dyad::new(i, j),
            GraphKind::Undirected | GraphKind::Bipartite { .. } => {
                if i <= j {
                    Dyad::new(i, j)
                } else {
                    Dyad::new(j, i)
                }
            }
        }
    }

    /// Returns the bipartite mode of a node, or `None` for one-mode graphs.
    pub fn mode_of(&self, node: NodeIndex) -> Option<Mode> {
        match self {
            GraphKind::Bipartite { num_a } => Some(if node < *num_a { Mode::A } else { Mode::B }),
            _ => None,
        }
    }

    /// Maximum number of dyads for `num_nodes` nodes under the loop policy.
    pub fn max_dyads(&self, num_nodes: usize, allow_loops: bool) -> usize {
        let n = num_nodes;
        match self {
            GraphKind::Directed => {
                if allow_loops {
                    n * n
                } else {
                    n * n.saturating_sub(1)
                }
            }
            GraphKind::Undirected => {
                let pairs = n * n.saturating_sub(1) / 2;
                if allow_loops {
                    pairs + n
                } else {
                    pairs
                }
            }
            GraphKind::Bipartite { num_a } => {
                let a = (*num_a).min(n);
                a * (n - a)
            }
        }
    }
}
