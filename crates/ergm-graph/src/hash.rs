use ergm_core::GraphKind;
use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// Computes a structural hash of the graph that ignores tie storage order.
///
/// Two graphs with the same kind, loop policy, node count, ties and attached
/// zone/term metadata hash identically.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    encode_kind(graph.kind(), &mut hasher);
    hasher.update(if graph.allows_loops() {
        b"loops:on".as_slice()
    } else {
        b"loops:off".as_slice()
    });
    hasher.update((graph.num_nodes() as u64).to_le_bytes());

    let mut ties: Vec<_> = graph.ties().iter().collect();
    ties.sort();
    hasher.update((ties.len() as u64).to_le_bytes());
    for dyad in ties {
        hasher.update((dyad.i as u64).to_le_bytes());
        hasher.update((dyad.j as u64).to_le_bytes());
    }

    match graph.zones() {
        Some(zones) => {
            hasher.update(b"zones:some");
            for node in 0..graph.num_nodes() {
                hasher.update(zones.zone(node).to_le_bytes());
            }
        }
        None => hasher.update(b"zones:none"),
    }
    match graph.terms() {
        Some(terms) => {
            hasher.update(b"terms:some");
            for node in 0..graph.num_nodes() {
                hasher.update(terms.term(node).to_le_bytes());
            }
        }
        None => hasher.update(b"terms:none"),
    }

    format!("{:x}", hasher.finalize())
}

fn encode_kind(kind: GraphKind, hasher: &mut Sha256) {
    match kind {
        GraphKind::Directed => hasher.update(b"kind:directed"),
        GraphKind::Undirected => hasher.update(b"kind:undirected"),
        GraphKind::Bipartite { num_a } => {
            hasher.update(b"kind:bipartite");
            hasher.update((num_a as u64).to_le_bytes());
        }
    }
}
