//! Shared-neighbour ("two-path") counters maintained under toggles.

use std::collections::HashMap;

use ergm_core::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::flags::TwoPathStorage;

/// The kind of two-path counted for a pair `(u, v)`.
///
/// Only third nodes `w` distinct from both `u` and `v` are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TwoPathKind {
    /// Directed `u -> w -> v`. Not symmetric.
    Mixed,
    /// Directed `w -> u` and `w -> v` (common sender).
    SharedSender,
    /// Directed `u -> w` and `v -> w` (common receiver).
    SharedReceiver,
    /// Undirected or bipartite `u - w - v`.
    Undirected,
}

impl TwoPathKind {
    /// Kinds maintained for directed graphs.
    pub const DIRECTED: [TwoPathKind; 3] = [
        TwoPathKind::Mixed,
        TwoPathKind::SharedSender,
        TwoPathKind::SharedReceiver,
    ];

    /// Whether `(u, v)` and `(v, u)` always hold the same count.
    pub fn is_symmetric(self) -> bool {
        !matches!(self, TwoPathKind::Mixed)
    }

    fn slot(self) -> usize {
        match self {
            TwoPathKind::Mixed => 0,
            TwoPathKind::SharedSender => 1,
            TwoPathKind::SharedReceiver => 2,
            TwoPathKind::Undirected => 0,
        }
    }

    fn key(self, u: NodeIndex, v: NodeIndex) -> (NodeIndex, NodeIndex) {
        if self.is_symmetric() && u > v {
            (v, u)
        } else {
            (u, v)
        }
    }
}

/// Storage contract for shared-neighbour counts.
pub trait TwoPathStore {
    /// Current count for the pair.
    fn get(&self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex) -> u32;

    /// Applies `delta` (+1 or -1) to the pair. Symmetric kinds update both orders.
    fn adjust(&mut self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex, delta: i32);

    /// Number of non-zero counters physically stored, across all kinds.
    fn nonzero_entries(&self) -> usize;
}

/// Array backed counters, one `N x N` matrix per kind.
#[derive(Debug, Clone)]
pub struct DenseTwoPaths {
    num_nodes: usize,
    matrices: Vec<Vec<u32>>,
}

impl DenseTwoPaths {
    /// Allocates zeroed matrices for `kinds` matrices of `num_nodes` squared entries.
    pub fn new(num_nodes: usize, kinds: usize) -> Self {
        Self {
            num_nodes,
            matrices: vec![vec![0; num_nodes * num_nodes]; kinds],
        }
    }

    #[inline]
    fn index(&self, u: NodeIndex, v: NodeIndex) -> usize {
        u * self.num_nodes + v
    }
}

impl TwoPathStore for DenseTwoPaths {
    #[inline]
    fn get(&self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex) -> u32 {
        self.matrices[kind.slot()][self.index(u, v)]
    }

    fn adjust(&mut self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex, delta: i32) {
        let forward = self.index(u, v);
        let backward = self.index(v, u);
        let matrix = &mut self.matrices[kind.slot()];
        matrix[forward] = apply_delta(matrix[forward], delta);
        if kind.is_symmetric() && forward != backward {
            matrix[backward] = apply_delta(matrix[backward], delta);
        }
    }

    fn nonzero_entries(&self) -> usize {
        self.matrices
            .iter()
            .map(|matrix| matrix.iter().filter(|&&count| count > 0).count())
            .sum()
    }
}

/// Map backed counters that evict pairs whose count drops to zero.
///
/// Symmetric kinds store a single `(min, max)` key per pair.
#[derive(Debug, Clone)]
pub struct SparseTwoPaths {
    maps: Vec<HashMap<(NodeIndex, NodeIndex), u32>>,
}

impl SparseTwoPaths {
    /// Creates empty maps for `kinds` two-path kinds.
    pub fn new(kinds: usize) -> Self {
        Self {
            maps: vec![HashMap::new(); kinds],
        }
    }
}

impl TwoPathStore for SparseTwoPaths {
    #[inline]
    fn get(&self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex) -> u32 {
        self.maps[kind.slot()]
            .get(&kind.key(u, v))
            .copied()
            .unwrap_or(0)
    }

    fn adjust(&mut self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex, delta: i32) {
        let map = &mut self.maps[kind.slot()];
        let key = kind.key(u, v);
        if delta > 0 {
            *map.entry(key).or_insert(0) += delta as u32;
            return;
        }
        if let Some(count) = map.get_mut(&key) {
            *count = apply_delta(*count, delta);
            if *count == 0 {
                map.remove(&key);
            }
        } else {
            debug_assert!(false, "decrement of an absent two-path entry {key:?}");
        }
    }

    fn nonzero_entries(&self) -> usize {
        self.maps.iter().map(HashMap::len).sum()
    }
}

/// The store selected for a graph at construction time.
#[derive(Debug, Clone)]
pub enum TwoPathIndex {
    /// Dense matrices.
    Dense(DenseTwoPaths),
    /// Zero-evicting hash maps.
    Sparse(SparseTwoPaths),
}

impl TwoPathIndex {
    /// Builds the store for `num_nodes` nodes and `kinds` two-path kinds.
    pub fn new(storage: TwoPathStorage, num_nodes: usize, kinds: usize) -> Self {
        match storage.resolve(num_nodes) {
            TwoPathStorage::Sparse => TwoPathIndex::Sparse(SparseTwoPaths::new(kinds)),
            _ => TwoPathIndex::Dense(DenseTwoPaths::new(num_nodes, kinds)),
        }
    }

    /// Which representation is in use.
    pub fn storage(&self) -> TwoPathStorage {
        match self {
            TwoPathIndex::Dense(_) => TwoPathStorage::Dense,
            TwoPathIndex::Sparse(_) => TwoPathStorage::Sparse,
        }
    }
}

impl TwoPathStore for TwoPathIndex {
    #[inline]
    fn get(&self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex) -> u32 {
        match self {
            TwoPathIndex::Dense(store) => store.get(kind, u, v),
            TwoPathIndex::Sparse(store) => store.get(kind, u, v),
        }
    }

    #[inline]
    fn adjust(&mut self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex, delta: i32) {
        match self {
            TwoPathIndex::Dense(store) => store.adjust(kind, u, v, delta),
            TwoPathIndex::Sparse(store) => store.adjust(kind, u, v, delta),
        }
    }

    fn nonzero_entries(&self) -> usize {
        match self {
            TwoPathIndex::Dense(store) => store.nonzero_entries(),
            TwoPathIndex::Sparse(store) => store.nonzero_entries(),
        }
    }
}

#[inline]
fn apply_delta(count: u32, delta: i32) -> u32 {
    debug_assert!(
        delta >= 0 || count >= delta.unsigned_abs(),
        "two-path count would underflow"
    );
    count.wrapping_add_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_store_evicts_zeroed_pairs() {
        let mut store = SparseTwoPaths::new(3);
        store.adjust(TwoPathKind::SharedSender, 4, 1, 1);
        store.adjust(TwoPathKind::SharedSender, 1, 4, 1);
        assert_eq!(store.get(TwoPathKind::SharedSender, 4, 1), 2);
        assert_eq!(store.nonzero_entries(), 1);
        store.adjust(TwoPathKind::SharedSender, 4, 1, -1);
        store.adjust(TwoPathKind::SharedSender, 4, 1, -1);
        assert_eq!(store.get(TwoPathKind::SharedSender, 1, 4), 0);
        assert_eq!(store.nonzero_entries(), 0);
    }

    #[test]
    fn mixed_counts_are_ordered() {
        let mut dense = DenseTwoPaths::new(3, 3);
        let mut sparse = SparseTwoPaths::new(3);
        dense.adjust(TwoPathKind::Mixed, 0, 2, 1);
        sparse.adjust(TwoPathKind::Mixed, 0, 2, 1);
        assert_eq!(dense.get(TwoPathKind::Mixed, 0, 2), 1);
        assert_eq!(dense.get(TwoPathKind::Mixed, 2, 0), 0);
        assert_eq!(sparse.get(TwoPathKind::Mixed, 0, 2), 1);
        assert_eq!(sparse.get(TwoPathKind::Mixed, 2, 0), 0);
    }

    #[test]
    fn auto_storage_switches_on_scale() {
        assert_eq!(TwoPathIndex::new(TwoPathStorage::Auto, 10, 1).storage(), TwoPathStorage::Dense);
        assert_eq!(
            TwoPathIndex::new(TwoPathStorage::Auto, crate::flags::DENSE_NODE_THRESHOLD + 1, 1)
                .storage(),
            TwoPathStorage::Sparse
        );
    }
}
