//! Snowball sampling zones (waves) and the derived inner-tie index.

use ergm_core::errors::metadata_error;
use ergm_core::{Dyad, ErgmError, GraphKind, Mode, NodeIndex};

use crate::tie_list::TieList;

/// Wave assignment for a snowball sampled network.
///
/// Nodes in waves `0..max_zone` are *inner*; ties among inner nodes are the
/// only ones conditional estimation may toggle.
#[derive(Debug, Clone)]
pub struct ZoneInfo {
    zones: Vec<u32>,
    max_zone: u32,
    prev_wave_degree: Vec<usize>,
    inner_nodes: Vec<NodeIndex>,
    inner_ties: TieList,
    num_inner_dyads: usize,
}

impl ZoneInfo {
    /// Validates `zones` against the existing ties and builds derived state.
    pub(crate) fn build(
        zones: Vec<u32>,
        kind: GraphKind,
        allow_loops: bool,
        ties: impl Iterator<Item = Dyad>,
    ) -> Result<Self, ErgmError> {
        let max_zone = zones.iter().copied().max().unwrap_or(0);
        let mut info = Self {
            inner_nodes: (0..zones.len()).filter(|&n| zones[n] < max_zone).collect(),
            prev_wave_degree: vec![0; zones.len()],
            num_inner_dyads: 0,
            inner_ties: TieList::new(),
            max_zone,
            zones,
        };
        for dyad in ties {
            let (zi, zj) = (info.zones[dyad.i], info.zones[dyad.j]);
            if zi.abs_diff(zj) > 1 {
                return Err(metadata_error("zone-span", "tie joins nodes more than one wave apart")
                    .with_context("i", dyad.i)
                    .with_context("j", dyad.j)
                    .with_context("zone_i", zi)
                    .with_context("zone_j", zj));
            }
            info.on_insert(dyad);
        }
        for (node, &zone) in info.zones.iter().enumerate() {
            if zone > 0 && info.prev_wave_degree[node] == 0 {
                return Err(metadata_error(
                    "orphan-wave-node",
                    "node outside the seed wave has no tie to the preceding wave",
                )
                .with_context("node", node)
                .with_context("zone", zone));
            }
        }
        info.num_inner_dyads = info.count_inner_dyads(kind, allow_loops);
        Ok(info)
    }

    /// Wave of `node`.
    pub fn zone(&self, node: NodeIndex) -> u32 {
        self.zones[node]
    }

    /// Outermost wave.
    pub fn max_zone(&self) -> u32 {
        self.max_zone
    }

    /// Ties between `node` and nodes in the immediately preceding wave.
    pub fn prev_wave_degree(&self, node: NodeIndex) -> usize {
        self.prev_wave_degree[node]
    }

    /// Whether `node` lies inside the outermost wave.
    pub fn is_inner(&self, node: NodeIndex) -> bool {
        self.zones[node] < self.max_zone
    }

    /// Nodes with `zone < max_zone`.
    pub fn inner_nodes(&self) -> &[NodeIndex] {
        &self.inner_nodes
    }

    /// Ties whose endpoints are both inner nodes.
    pub fn inner_ties(&self) -> &TieList {
        &self.inner_ties
    }

    /// Number of inner node pairs at most one wave apart.
    pub fn num_inner_dyads(&self) -> usize {
        self.num_inner_dyads
    }

    /// Whether a tie between `i` and `j` keeps the one-wave span invariant.
    pub fn span_ok(&self, i: NodeIndex, j: NodeIndex) -> bool {
        self.zones[i].abs_diff(self.zones[j]) <= 1
    }

    /// Whether removing the tie would leave an endpoint without a tie to its
    /// preceding wave.
    pub fn is_last_prev_wave_tie(&self, dyad: Dyad) -> bool {
        let (zi, zj) = (self.zones[dyad.i], self.zones[dyad.j]);
        (zi == zj + 1 && self.prev_wave_degree[dyad.i] <= 1)
            || (zj == zi + 1 && self.prev_wave_degree[dyad.j] <= 1)
    }

    pub(crate) fn on_insert(&mut self, dyad: Dyad) {
        self.adjust_prev_wave(dyad, true);
        if self.is_inner(dyad.i) && self.is_inner(dyad.j) {
            self.inner_ties.insert(dyad);
        }
    }

    pub(crate) fn on_remove(&mut self, dyad: Dyad) {
        self.adjust_prev_wave(dyad, false);
        self.inner_ties.remove(dyad);
    }

    fn adjust_prev_wave(&mut self, dyad: Dyad, insert: bool) {
        let (zi, zj) = (self.zones[dyad.i], self.zones[dyad.j]);
        let target = if zi == zj + 1 {
            dyad.i
        } else if zj == zi + 1 {
            dyad.j
        } else {
            return;
        };
        if insert {
            self.prev_wave_degree[target] += 1;
        } else {
            self.prev_wave_degree[target] -= 1;
        }
    }

    fn count_inner_dyads(&self, kind: GraphKind, allow_loops: bool) -> usize {
        let waves = self.max_zone as usize;
        let mut mode_a = vec![0usize; waves];
        let mut mode_b = vec![0usize; waves];
        for &node in &self.inner_nodes {
            let zone = self.zones[node] as usize;
            match kind.mode_of(node) {
                Some(Mode::B) => mode_b[zone] += 1,
                _ => mode_a[zone] += 1,
            }
        }
        let mut total = 0usize;
        for zone in 0..waves {
            let here = mode_a[zone];
            let next = if zone + 1 < waves { mode_a[zone + 1] } else { 0 };
            match kind {
                GraphKind::Directed => {
                    total += here * here.saturating_sub(1) + 2 * here * next;
                    if allow_loops {
                        total += here;
                    }
                }
                GraphKind::Undirected => {
                    total += here * here.saturating_sub(1) / 2 + here * next;
                    if allow_loops {
                        total += here;
                    }
                }
                GraphKind::Bipartite { .. } => {
                    let next_b = if zone + 1 < waves { mode_b[zone + 1] } else { 0 };
                    total += here * mode_b[zone] + here * next_b + mode_b[zone] * next;
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_zones() -> ZoneInfo {
        // 0 (seed) - 1 (wave 1) - 2 (wave 2), plus 3 in wave 1 tied to 0.
        let ties = [Dyad::new(0, 1), Dyad::new(1, 2), Dyad::new(0, 3)];
        ZoneInfo::build(vec![0, 1, 2, 1], GraphKind::Undirected, false, ties.into_iter()).unwrap()
    }

    #[test]
    fn inner_ties_exclude_outer_wave() {
        let zones = path_zones();
        assert_eq!(zones.max_zone(), 2);
        assert_eq!(zones.inner_nodes(), &[0, 1, 3]);
        assert_eq!(zones.inner_ties().len(), 2);
        assert!(!zones.inner_ties().contains(Dyad::new(1, 2)));
    }

    #[test]
    fn inner_dyads_count_pairs_within_one_wave() {
        // Inner nodes: 0 (wave 0), 1 and 3 (wave 1): pairs {0,1}, {0,3}, {1,3}.
        assert_eq!(path_zones().num_inner_dyads(), 3);
    }

    #[test]
    fn last_tie_to_previous_wave_is_detected() {
        let zones = path_zones();
        assert_eq!(zones.prev_wave_degree(1), 1);
        assert!(zones.is_last_prev_wave_tie(Dyad::new(0, 1)));
    }

    #[test]
    fn span_violation_is_a_metadata_error() {
        let err = ZoneInfo::build(
            vec![0, 2, 1],
            GraphKind::Undirected,
            false,
            [Dyad::new(0, 1), Dyad::new(0, 2)].into_iter(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "zone-span");
    }

    #[test]
    fn orphan_wave_node_is_a_metadata_error() {
        let err = ZoneInfo::build(vec![0, 1], GraphKind::Undirected, false, std::iter::empty())
            .unwrap_err();
        assert_eq!(err.code(), "orphan-wave-node");
    }
}
