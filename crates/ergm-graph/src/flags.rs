use ergm_core::GraphKind;
use serde::{Deserialize, Serialize};

/// Node count at or below which [`TwoPathStorage::Auto`] picks dense matrices.
pub const DENSE_NODE_THRESHOLD: usize = 4096;

/// Backing representation for shared-neighbour counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TwoPathStorage {
    /// `N x N` counters per two-path kind.
    Dense,
    /// Hash maps holding only non-zero counters.
    Sparse,
    /// Dense up to [`DENSE_NODE_THRESHOLD`] nodes, sparse above.
    #[default]
    Auto,
}

impl TwoPathStorage {
    /// Resolves `Auto` against the graph size.
    pub fn resolve(self, num_nodes: usize) -> TwoPathStorage {
        match self {
            TwoPathStorage::Auto if num_nodes <= DENSE_NODE_THRESHOLD => TwoPathStorage::Dense,
            TwoPathStorage::Auto => TwoPathStorage::Sparse,
            other => other,
        }
    }
}

/// Configuration options that control the behaviour of [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Directed, undirected or bipartite ties.
    pub kind: GraphKind,
    /// Whether self-loops are valid dyads.
    #[serde(default)]
    pub allow_loops: bool,
    /// Shared-neighbour count representation.
    #[serde(default)]
    pub two_path_storage: TwoPathStorage,
}

impl GraphConfig {
    /// Directed graph without loops.
    pub fn directed() -> Self {
        Self {
            kind: GraphKind::Directed,
            allow_loops: false,
            two_path_storage: TwoPathStorage::Auto,
        }
    }

    /// Undirected graph without loops.
    pub fn undirected() -> Self {
        Self {
            kind: GraphKind::Undirected,
            ..Self::directed()
        }
    }

    /// Bipartite graph with `num_a` mode A nodes.
    pub fn bipartite(num_a: usize) -> Self {
        Self {
            kind: GraphKind::Bipartite { num_a },
            ..Self::directed()
        }
    }

    /// Returns the same configuration with an explicit storage choice.
    pub fn with_storage(mut self, storage: TwoPathStorage) -> Self {
        self.two_path_storage = storage;
        self
    }

    /// Returns the same configuration with loops enabled or disabled.
    pub fn with_loops(mut self, allow_loops: bool) -> Self {
        self.allow_loops = allow_loops;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::directed()
    }
}
