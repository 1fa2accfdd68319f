//! Name-addressed catalogue of the available change statistics.

use ergm_core::GraphKind;

use crate::term::{DyadicFn, InteractionFn, NodalFn, StructuralFn};
use crate::{attribute, bipartite, directed, dyadic, undirected};

/// Graph kinds a statistic is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSupport {
    /// Directed graphs only.
    Directed,
    /// One-mode undirected graphs only.
    Undirected,
    /// Two-mode graphs only.
    Bipartite,
    /// Undirected or two-mode graphs.
    Unordered,
    /// Every graph kind.
    Any,
}

impl KindSupport {
    /// Whether a graph of `kind` may use the statistic.
    pub fn accepts(self, kind: GraphKind) -> bool {
        match self {
            KindSupport::Directed => kind.is_directed(),
            KindSupport::Undirected => matches!(kind, GraphKind::Undirected),
            KindSupport::Bipartite => kind.is_bipartite(),
            KindSupport::Unordered => !kind.is_directed(),
            KindSupport::Any => true,
        }
    }
}

/// Attribute column family a statistic reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFamily {
    /// `Option<bool>` columns.
    Binary,
    /// `Option<u32>` columns.
    Categorical,
    /// `f64` columns.
    Continuous,
}

/// Node attribute layout a dyadic covariate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DyadicInput {
    /// Latitude/longitude columns.
    Geo,
    /// Euclidean coordinate columns.
    Coordinates,
}

/// Argument shape of a catalogue entry.
#[derive(Clone, Copy)]
pub enum Shape {
    /// Structural statistic.
    Structural(StructuralFn),
    /// Reads one column of the given family.
    Nodal(AttributeFamily, NodalFn),
    /// Reads a dyadic covariate.
    Dyadic(DyadicInput, DyadicFn),
    /// Reads two columns of the given family.
    Interaction(AttributeFamily, InteractionFn),
}

/// A named statistic.
#[derive(Clone, Copy)]
pub struct CatalogEntry {
    /// Statistic name.
    pub name: &'static str,
    /// Graph kinds the statistic is defined for.
    pub support: KindSupport,
    /// Argument shape and change function.
    pub shape: Shape,
}

const fn structural(name: &'static str, support: KindSupport, f: StructuralFn) -> CatalogEntry {
    CatalogEntry {
        name,
        support,
        shape: Shape::Structural(f),
    }
}

const fn nodal(
    name: &'static str,
    support: KindSupport,
    family: AttributeFamily,
    f: NodalFn,
) -> CatalogEntry {
    CatalogEntry {
        name,
        support,
        shape: Shape::Nodal(family, f),
    }
}

const fn covariate(name: &'static str, input: DyadicInput, f: DyadicFn) -> CatalogEntry {
    CatalogEntry {
        name,
        support: KindSupport::Any,
        shape: Shape::Dyadic(input, f),
    }
}

use AttributeFamily::{Binary, Categorical, Continuous};
use KindSupport::{Any, Bipartite, Directed, Undirected, Unordered};

static CATALOG: &[CatalogEntry] = &[
    structural("Arc", Directed, directed::arc),
    structural("Reciprocity", Directed, directed::reciprocity),
    structural("Sink", Directed, directed::sink),
    structural("Source", Directed, directed::source),
    structural("Isolates", Directed, directed::isolates),
    structural("InTwoStars", Directed, directed::in_two_stars),
    structural("OutTwoStars", Directed, directed::out_two_stars),
    structural("TwoPath", Directed, directed::two_path),
    structural("TransitiveTriad", Directed, directed::transitive_triad),
    structural("CyclicTriad", Directed, directed::cyclic_triad),
    structural("AltInStars", Directed, directed::alt_in_stars),
    structural("AltOutStars", Directed, directed::alt_out_stars),
    structural("AltKTrianglesT", Directed, directed::alt_k_triangles_t),
    structural("AltTwoPathsT", Directed, directed::alt_two_paths_t),
    structural("Edge", Unordered, undirected::edge),
    structural("TwoStars", Unordered, undirected::two_stars),
    structural("Triangles", Undirected, undirected::triangles),
    structural("AltStars", Unordered, undirected::alt_stars),
    structural("AltKTriangles", Undirected, undirected::alt_k_triangles),
    structural("AltTwoPaths", Unordered, undirected::alt_two_paths),
    structural("BipartiteAltStarsA", Bipartite, bipartite::alt_stars_a),
    structural("BipartiteAltStarsB", Bipartite, bipartite::alt_stars_b),
    structural("BipartiteFourCycles", Bipartite, bipartite::four_cycles),
    nodal("Sender", Directed, Binary, attribute::sender),
    nodal("Receiver", Directed, Binary, attribute::receiver),
    nodal("Activity", Any, Binary, attribute::activity),
    nodal("Interaction", Any, Binary, attribute::interaction),
    nodal("Matching", Any, Categorical, attribute::matching),
    nodal("MatchingReciprocity", Directed, Categorical, attribute::matching_reciprocity),
    nodal("Mismatching", Any, Categorical, attribute::mismatching),
    nodal("ContinuousSender", Directed, Continuous, attribute::continuous_sender),
    nodal("ContinuousReceiver", Directed, Continuous, attribute::continuous_receiver),
    nodal("Diff", Any, Continuous, attribute::diff),
    covariate("GeoDistance", DyadicInput::Geo, dyadic::geo_distance),
    covariate("LogGeoDistance", DyadicInput::Geo, dyadic::log_geo_distance),
    covariate("EuclideanDistance", DyadicInput::Coordinates, dyadic::euclidean_distance),
    CatalogEntry {
        name: "MatchingInteraction",
        support: Any,
        shape: Shape::Interaction(Categorical, attribute::matching_interaction),
    },
];

/// Finds a statistic by its exact name.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.name == name)
}

/// Names of every catalogued statistic, in catalogue order.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.name)
}
