use ergm_core::errors::{graph_error, metadata_error};
use ergm_core::{Dyad, ErgmError, GraphKind, Mode, NodeIndex, RngHandle};

use crate::attributes::NodeAttributes;
use crate::flags::{GraphConfig, TwoPathStorage};
use crate::terms::TermInfo;
use crate::tie_list::TieList;
use crate::two_path::{TwoPathIndex, TwoPathKind, TwoPathStore};
use crate::zones::ZoneInfo;

/// Graph store: adjacency, the flat tie list, shared-neighbour counts and the
/// optional zone/term indexes, all kept consistent by [`Graph::toggle`].
#[derive(Debug, Clone)]
pub struct Graph {
    config: GraphConfig,
    num_nodes: usize,
    /// Out-neighbours (directed) or neighbours (undirected, bipartite).
    out_adj: Vec<Vec<NodeIndex>>,
    /// In-neighbours; empty for undirected and bipartite graphs.
    in_adj: Vec<Vec<NodeIndex>>,
    ties: TieList,
    two_paths: TwoPathIndex,
    zones: Option<ZoneInfo>,
    terms: Option<TermInfo>,
    attributes: NodeAttributes,
}

impl Graph {
    /// Creates an empty graph over `num_nodes` nodes.
    pub fn new(num_nodes: usize, config: GraphConfig) -> Self {
        let directed = config.kind.is_directed();
        let kinds = if directed { TwoPathKind::DIRECTED.len() } else { 1 };
        Self {
            num_nodes,
            out_adj: vec![Vec::new(); num_nodes],
            in_adj: if directed {
                vec![Vec::new(); num_nodes]
            } else {
                Vec::new()
            },
            ties: TieList::new(),
            two_paths: TwoPathIndex::new(config.two_path_storage, num_nodes, kinds),
            zones: None,
            terms: None,
            attributes: NodeAttributes::default(),
            config,
        }
    }

    /// Builds a graph from an initializing sequence of dyads.
    ///
    /// Duplicate dyads are rejected rather than toggled back out.
    pub fn with_ties<I>(num_nodes: usize, config: GraphConfig, dyads: I) -> Result<Self, ErgmError>
    where
        I: IntoIterator,
        I::Item: Into<Dyad>,
    {
        let mut graph = Self::new(num_nodes, config);
        for dyad in dyads {
            let dyad = dyad.into();
            graph.insert(dyad.i, dyad.j)?;
        }
        Ok(graph)
    }

    /// Returns the configuration used by this graph.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Directed, undirected or bipartite.
    pub fn kind(&self) -> GraphKind {
        self.config.kind
    }

    /// Whether the graph holds ordered ties.
    pub fn is_directed(&self) -> bool {
        self.config.kind.is_directed()
    }

    /// Whether self-loops are valid dyads.
    pub fn allows_loops(&self) -> bool {
        self.config.allow_loops
    }

    /// Number of nodes, fixed at construction.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of existing ties.
    pub fn num_ties(&self) -> usize {
        self.ties.len()
    }

    /// Flat list of every existing tie.
    pub fn ties(&self) -> &TieList {
        &self.ties
    }

    /// Maximum number of ties under this graph's kind and loop policy.
    pub fn max_dyads(&self) -> usize {
        self.config
            .kind
            .max_dyads(self.num_nodes, self.config.allow_loops)
    }

    /// Ties divided by the maximum number of dyads for the given loop policy.
    pub fn density(&self, allow_loops: bool) -> f64 {
        let max = self.config.kind.max_dyads(self.num_nodes, allow_loops);
        if max == 0 {
            return 0.0;
        }
        self.ties.len() as f64 / max as f64
    }

    /// Bipartite mode of a node, `None` for one-mode graphs.
    pub fn mode_of(&self, node: NodeIndex) -> Option<Mode> {
        self.config.kind.mode_of(node)
    }

    /// Canonical dyad for the pair under this graph's kind (no validation).
    pub fn dyad(&self, i: NodeIndex, j: NodeIndex) -> Dyad {
        self.config.kind.dyad(i, j)
    }

    /// Checks that `(i, j)` is a valid dyad and returns its canonical form.
    pub fn validate_dyad(&self, i: NodeIndex, j: NodeIndex) -> Result<Dyad, ErgmError> {
        for node in [i, j] {
            if node >= self.num_nodes {
                return Err(graph_error("unknown-node", "node index is out of range")
                    .with_context("node", node)
                    .with_context("num_nodes", self.num_nodes));
            }
        }
        if i == j && !self.config.allow_loops {
            return Err(graph_error("self-loop", "self-loops are not permitted")
                .with_context("node", i));
        }
        if let GraphKind::Bipartite { .. } = self.config.kind {
            if self.mode_of(i) == self.mode_of(j) {
                return Err(
                    graph_error("same-mode", "bipartite ties must join opposite modes")
                        .with_context("i", i)
                        .with_context("j", j),
                );
            }
        }
        Ok(self.dyad(i, j))
    }

    /// Whether the tie exists. Scans the shorter of the two adjacency lists.
    pub fn exists(&self, i: NodeIndex, j: NodeIndex) -> bool {
        if self.is_directed() {
            let (outs, ins) = (&self.out_adj[i], &self.in_adj[j]);
            if outs.len() <= ins.len() {
                outs.contains(&j)
            } else {
                ins.contains(&i)
            }
        } else {
            let (left, right) = (&self.out_adj[i], &self.out_adj[j]);
            if left.len() <= right.len() {
                left.contains(&j)
            } else {
                right.contains(&i)
            }
        }
    }

    /// Flips the existence of `(i, j)` and returns whether the tie now exists.
    ///
    /// Adjacency, the flat tie lists, zone and term counters and the
    /// shared-neighbour counts are all updated before returning.
    pub fn toggle(&mut self, i: NodeIndex, j: NodeIndex) -> Result<bool, ErgmError> {
        let dyad = self.validate_dyad(i, j)?;
        if self.exists(dyad.i, dyad.j) {
            self.remove_unchecked(dyad);
            Ok(false)
        } else {
            self.ensure_zone_span(dyad)?;
            self.insert_unchecked(dyad);
            Ok(true)
        }
    }

    /// Adds a tie that must not exist yet.
    pub fn insert(&mut self, i: NodeIndex, j: NodeIndex) -> Result<(), ErgmError> {
        let dyad = self.validate_dyad(i, j)?;
        if self.exists(dyad.i, dyad.j) {
            return Err(graph_error("duplicate-tie", "tie already exists")
                .with_context("i", dyad.i)
                .with_context("j", dyad.j));
        }
        self.ensure_zone_span(dyad)?;
        self.insert_unchecked(dyad);
        Ok(())
    }

    /// Removes a tie that must exist.
    pub fn remove(&mut self, i: NodeIndex, j: NodeIndex) -> Result<(), ErgmError> {
        let dyad = self.validate_dyad(i, j)?;
        if !self.exists(dyad.i, dyad.j) {
            return Err(graph_error("missing-tie", "tie does not exist")
                .with_context("i", dyad.i)
                .with_context("j", dyad.j));
        }
        self.remove_unchecked(dyad);
        Ok(())
    }

    /// Uniformly picks an existing tie in O(1).
    pub fn random_existing_dyad(&self, rng: &mut RngHandle) -> Option<Dyad> {
        self.ties.random(rng)
    }

    /// Out-neighbours (directed) or neighbours (undirected).
    pub fn out_neighbours(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.out_adj[node]
    }

    /// In-neighbours (directed) or neighbours (undirected).
    pub fn in_neighbours(&self, node: NodeIndex) -> &[NodeIndex] {
        if self.is_directed() {
            &self.in_adj[node]
        } else {
            &self.out_adj[node]
        }
    }

    /// Neighbours ignoring direction is only meaningful for undirected graphs;
    /// for directed graphs this returns out-neighbours.
    pub fn neighbours(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.out_adj[node]
    }

    /// Out-degree (directed) or degree.
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.out_adj[node].len()
    }

    /// In-degree (directed) or degree.
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.in_neighbours(node).len()
    }

    /// Degree of an undirected node, or in plus out degree of a directed node.
    pub fn degree(&self, node: NodeIndex) -> usize {
        if self.is_directed() {
            self.out_adj[node].len() + self.in_adj[node].len()
        } else {
            self.out_adj[node].len()
        }
    }

    /// Maintained shared-neighbour count for the pair.
    #[inline]
    pub fn two_paths(&self, kind: TwoPathKind, u: NodeIndex, v: NodeIndex) -> u32 {
        self.two_paths.get(kind, u, v)
    }

    /// Directed two-paths `u -> w -> v`.
    #[inline]
    pub fn mixed_two_paths(&self, u: NodeIndex, v: NodeIndex) -> u32 {
        self.two_paths.get(TwoPathKind::Mixed, u, v)
    }

    /// Nodes sending arcs to both `u` and `v`.
    #[inline]
    pub fn shared_senders(&self, u: NodeIndex, v: NodeIndex) -> u32 {
        self.two_paths.get(TwoPathKind::SharedSender, u, v)
    }

    /// Nodes receiving arcs from both `u` and `v`.
    #[inline]
    pub fn shared_receivers(&self, u: NodeIndex, v: NodeIndex) -> u32 {
        self.two_paths.get(TwoPathKind::SharedReceiver, u, v)
    }

    /// Common neighbours of `u` and `v` in an undirected or bipartite graph.
    #[inline]
    pub fn common_neighbours(&self, u: NodeIndex, v: NodeIndex) -> u32 {
        self.two_paths.get(TwoPathKind::Undirected, u, v)
    }

    /// Representation chosen for the shared-neighbour counts.
    pub fn two_path_storage(&self) -> TwoPathStorage {
        self.two_paths.storage()
    }

    /// Number of non-zero shared-neighbour counters currently stored.
    pub fn two_path_entries(&self) -> usize {
        self.two_paths.nonzero_entries()
    }

    /// Attaches snowball zones. Validated against the current ties.
    pub fn attach_zones(&mut self, zones: Vec<u32>) -> Result<(), ErgmError> {
        self.ensure_unattached(self.zones.is_some(), "zones")?;
        self.ensure_len(zones.len(), "zones")?;
        let info = ZoneInfo::build(
            zones,
            self.config.kind,
            self.config.allow_loops,
            self.ties.iter(),
        )?;
        tracing::debug!(
            max_zone = info.max_zone(),
            inner_nodes = info.inner_nodes().len(),
            inner_ties = info.inner_ties().len(),
            "attached snowball zones"
        );
        self.zones = Some(info);
        Ok(())
    }

    /// Snowball zones, if attached.
    pub fn zones(&self) -> Option<&ZoneInfo> {
        self.zones.as_ref()
    }

    /// Attaches citation terms. Directed graphs only.
    pub fn attach_terms(&mut self, terms: Vec<u32>) -> Result<(), ErgmError> {
        if !self.is_directed() {
            return Err(graph_error(
                "terms-require-directed",
                "citation terms are only defined for directed graphs",
            ));
        }
        self.ensure_unattached(self.terms.is_some(), "terms")?;
        self.ensure_len(terms.len(), "terms")?;
        let info = TermInfo::build(terms, self.config.allow_loops, self.ties.iter());
        tracing::debug!(
            max_term = info.max_term(),
            max_term_nodes = info.max_term_nodes().len(),
            max_term_ties = info.max_term_ties().len(),
            "attached citation terms"
        );
        self.terms = Some(info);
        Ok(())
    }

    /// Citation terms, if attached.
    pub fn terms(&self) -> Option<&TermInfo> {
        self.terms.as_ref()
    }

    /// Replaces the node attributes after validating them.
    pub fn set_attributes(&mut self, attributes: NodeAttributes) -> Result<(), ErgmError> {
        attributes.validate(self.num_nodes)?;
        self.attributes = attributes;
        Ok(())
    }

    /// Node attribute columns.
    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }

    fn ensure_unattached(&self, attached: bool, what: &str) -> Result<(), ErgmError> {
        if attached {
            return Err(metadata_error("already-attached", "metadata is immutable once attached")
                .with_context("metadata", what));
        }
        Ok(())
    }

    fn ensure_len(&self, len: usize, what: &str) -> Result<(), ErgmError> {
        if len != self.num_nodes {
            return Err(metadata_error("metadata-length", "one entry per node is required")
                .with_context("metadata", what)
                .with_context("expected", self.num_nodes)
                .with_context("actual", len));
        }
        Ok(())
    }

    fn ensure_zone_span(&self, dyad: Dyad) -> Result<(), ErgmError> {
        match &self.zones {
            Some(zones) if !zones.span_ok(dyad.i, dyad.j) => Err(graph_error(
                "zone-span",
                "tie would join nodes more than one wave apart",
            )
            .with_context("i", dyad.i)
            .with_context("j", dyad.j)),
            _ => Ok(()),
        }
    }

    fn insert_unchecked(&mut self, dyad: Dyad) {
        self.update_two_paths(dyad, 1);
        let Dyad { i, j } = dyad;
        if self.is_directed() {
            self.out_adj[i].push(j);
            self.in_adj[j].push(i);
        } else {
            self.out_adj[i].push(j);
            if i != j {
                self.out_adj[j].push(i);
            }
        }
        self.ties.insert(dyad);
        if let Some(zones) = self.zones.as_mut() {
            zones.on_insert(dyad);
        }
        if let Some(terms) = self.terms.as_mut() {
            terms.on_insert(dyad);
        }
    }

    fn remove_unchecked(&mut self, dyad: Dyad) {
        self.update_two_paths(dyad, -1);
        let Dyad { i, j } = dyad;
        if self.is_directed() {
            remove_node(&mut self.out_adj[i], j);
            remove_node(&mut self.in_adj[j], i);
        } else {
            remove_node(&mut self.out_adj[i], j);
            if i != j {
                remove_node(&mut self.out_adj[j], i);
            }
        }
        self.ties.remove(dyad);
        if let Some(zones) = self.zones.as_mut() {
            zones.on_remove(dyad);
        }
        if let Some(terms) = self.terms.as_mut() {
            terms.on_remove(dyad);
        }
    }

    /// Applies `delta` to every two-path the tie `dyad` takes part in.
    /// Must run before the adjacency change.
    fn update_two_paths(&mut self, dyad: Dyad, delta: i32) {
        let Dyad { i, j } = dyad;
        if i == j {
            return;
        }
        let store = &mut self.two_paths;
        let third = |v: &&NodeIndex| **v != i && **v != j;
        if self.config.kind.is_directed() {
            for &v in self.out_adj[i].iter().filter(third) {
                store.adjust(TwoPathKind::SharedSender, v, j, delta);
            }
            for &v in self.in_adj[j].iter().filter(third) {
                store.adjust(TwoPathKind::SharedReceiver, v, i, delta);
            }
            for &v in self.in_adj[i].iter().filter(third) {
                store.adjust(TwoPathKind::Mixed, v, j, delta);
            }
            for &v in self.out_adj[j].iter().filter(third) {
                store.adjust(TwoPathKind::Mixed, i, v, delta);
            }
        } else {
            for &v in self.out_adj[i].iter().filter(third) {
                store.adjust(TwoPathKind::Undirected, v, j, delta);
            }
            for &v in self.out_adj[j].iter().filter(third) {
                store.adjust(TwoPathKind::Undirected, v, i, delta);
            }
        }
    }
}

fn remove_node(list: &mut Vec<NodeIndex>, node: NodeIndex) {
    if let Some(pos) = list.iter().position(|&v| v == node) {
        list.swap_remove(pos);
    }
}

/// Recomputes a shared-neighbour count from adjacency alone, in O(N).
///
/// Used to verify the incrementally maintained counts. Diagonal pairs are
/// never maintained and count as zero.
pub fn brute_force_two_paths(graph: &Graph, kind: TwoPathKind, u: NodeIndex, v: NodeIndex) -> u32 {
    if u == v {
        return 0;
    }
    (0..graph.num_nodes())
        .filter(|&w| w != u && w != v)
        .filter(|&w| match kind {
            TwoPathKind::Mixed => graph.exists(u, w) && graph.exists(w, v),
            TwoPathKind::SharedSender => graph.exists(w, u) && graph.exists(w, v),
            TwoPathKind::SharedReceiver => graph.exists(u, w) && graph.exists(v, w),
            TwoPathKind::Undirected => graph.exists(u, w) && graph.exists(w, v),
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_node_directed() -> Graph {
        Graph::with_ties(5, GraphConfig::directed(), [(0, 1), (1, 2)]).unwrap()
    }

    #[test]
    fn toggle_updates_adjacency_and_tie_list_together() {
        let mut graph = five_node_directed();
        assert!(graph.toggle(2, 0).unwrap());
        assert!(graph.exists(2, 0));
        assert!(!graph.exists(0, 2));
        assert_eq!(graph.num_ties(), 3);
        assert!(graph.ties().contains(Dyad::new(2, 0)));
        assert_eq!(graph.mixed_two_paths(1, 0), 1);
        assert_eq!(graph.mixed_two_paths(2, 1), 1);
        assert!(!graph.toggle(2, 0).unwrap());
        assert_eq!(graph.num_ties(), 2);
        assert_eq!(graph.mixed_two_paths(1, 0), 0);
    }

    #[test]
    fn undirected_dyads_are_stored_once() {
        let mut graph = Graph::new(4, GraphConfig::undirected());
        graph.toggle(3, 1).unwrap();
        assert!(graph.exists(1, 3));
        assert!(graph.exists(3, 1));
        assert_eq!(graph.ties().get(0), Some(Dyad::new(1, 3)));
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(3), 1);
    }

    #[test]
    fn malformed_dyads_are_precondition_errors() {
        let mut graph = Graph::new(3, GraphConfig::directed());
        assert_eq!(graph.toggle(1, 1).unwrap_err().code(), "self-loop");
        assert_eq!(graph.toggle(0, 7).unwrap_err().code(), "unknown-node");
        let mut bipartite = Graph::new(4, GraphConfig::bipartite(2));
        assert_eq!(bipartite.toggle(0, 1).unwrap_err().code(), "same-mode");
        assert!(bipartite.toggle(0, 3).unwrap());
    }

    #[test]
    fn loops_do_not_contribute_two_paths() {
        let mut graph = Graph::new(3, GraphConfig::directed().with_loops(true));
        graph.toggle(0, 0).unwrap();
        graph.toggle(0, 1).unwrap();
        graph.toggle(1, 1).unwrap();
        for u in 0..3 {
            for v in 0..3 {
                for kind in TwoPathKind::DIRECTED {
                    assert_eq!(graph.two_paths(kind, u, v), brute_force_two_paths(&graph, kind, u, v));
                }
            }
        }
        assert_eq!(graph.density(true), 3.0 / 9.0);
    }

    #[test]
    fn density_uses_requested_loop_policy() {
        let graph = five_node_directed();
        assert_eq!(graph.density(false), 2.0 / 20.0);
        assert_eq!(graph.density(true), 2.0 / 25.0);
    }

    #[test]
    fn terms_require_directed_graphs() {
        let mut graph = Graph::new(3, GraphConfig::undirected());
        assert_eq!(
            graph.attach_terms(vec![0, 0, 1]).unwrap_err().code(),
            "terms-require-directed"
        );
    }
}
