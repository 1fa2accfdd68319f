use ergm_core::errors::metadata_error;
use ergm_core::{Dyad, ErgmError};
use serde::{Deserialize, Serialize};

use crate::attributes::NodeAttributes;
use crate::flags::GraphConfig;
use crate::graph::Graph;

/// Serializable image of a graph: configuration, ties and attached metadata.
///
/// Derived state (adjacency, two-path counts, inner and latest-term tie
/// lists) is rebuilt when the snapshot is restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Graph configuration.
    pub config: GraphConfig,
    /// Number of nodes.
    pub num_nodes: usize,
    /// Ties in canonical form, sorted.
    pub ties: Vec<Dyad>,
    /// Snowball zones, if attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<u32>>,
    /// Citation terms, if attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<u32>>,
    /// Node attributes.
    #[serde(default)]
    pub attributes: NodeAttributes,
}

impl GraphSnapshot {
    /// Captures the current state of `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut ties: Vec<Dyad> = graph.ties().iter().collect();
        ties.sort();
        let nodes = 0..graph.num_nodes();
        Self {
            config: *graph.config(),
            num_nodes: graph.num_nodes(),
            ties,
            zones: graph
                .zones()
                .map(|zones| nodes.clone().map(|n| zones.zone(n)).collect()),
            terms: graph
                .terms()
                .map(|terms| nodes.clone().map(|n| terms.term(n)).collect()),
            attributes: graph.attributes().clone(),
        }
    }

    /// Rebuilds a graph, re-validating ties and metadata.
    pub fn into_graph(self) -> Result<Graph, ErgmError> {
        let mut graph = Graph::with_ties(self.num_nodes, self.config, self.ties)?;
        if let Some(zones) = self.zones {
            graph.attach_zones(zones)?;
        }
        if let Some(terms) = self.terms {
            graph.attach_terms(terms)?;
        }
        graph.set_attributes(self.attributes)?;
        Ok(graph)
    }
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &Graph) -> Result<String, ErgmError> {
    serde_json::to_string_pretty(&GraphSnapshot::from_graph(graph))
        .map_err(|err| metadata_error("serialize-json", err.to_string()))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<Graph, ErgmError> {
    let snapshot: GraphSnapshot = serde_json::from_str(json)
        .map_err(|err| metadata_error("deserialize-json", err.to_string()))?;
    snapshot.into_graph()
}
