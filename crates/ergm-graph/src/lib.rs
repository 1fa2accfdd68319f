#![deny(missing_docs)]
#![doc = "Incremental graph store for dyad-toggle samplers: adjacency, flat tie lists, shared-neighbour counts and snowball/citation metadata kept consistent under every toggle."]

pub mod attributes;
mod flags;
mod generators;
mod graph;
mod hash;
mod serialization;
mod terms;
mod tie_list;
pub mod two_path;
mod zones;

pub use attributes::{Column, NodeAttributes};
pub use flags::{GraphConfig, TwoPathStorage, DENSE_NODE_THRESHOLD};
pub use generators::{gen_citation_graph, gen_random_graph, gen_zoned_graph};
pub use graph::{brute_force_two_paths, Graph};
pub use hash::canonical_hash;
pub use serialization::{graph_from_json, graph_to_json, GraphSnapshot};
pub use terms::TermInfo;
pub use tie_list::TieList;
pub use two_path::{TwoPathKind, TwoPathStore};
pub use zones::ZoneInfo;
