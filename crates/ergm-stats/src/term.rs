//! Change statistic terms, one variant per argument shape.

use std::fmt;

use ergm_core::Dyad;
use ergm_graph::Graph;

/// Default decay parameter for the alternating (geometrically weighted) terms.
pub const DEFAULT_LAMBDA: f64 = 2.0;

/// Structural statistic parameterised by a decay `lambda`.
pub type StructuralFn = fn(&Graph, Dyad, f64) -> f64;
/// Statistic reading one node attribute column.
pub type NodalFn = fn(&Graph, Dyad, usize) -> f64;
/// Statistic reading a fixed dyadic covariate.
pub type DyadicFn = fn(&Graph, Dyad) -> f64;
/// Statistic reading a pair of node attribute columns.
pub type InteractionFn = fn(&Graph, Dyad, usize, usize) -> f64;

/// A change statistic: the amount its graph statistic would change if the
/// (currently absent) dyad were added.
#[derive(Clone, Copy)]
pub enum StatTerm {
    /// Purely structural.
    Structural {
        /// Change statistic.
        f: StructuralFn,
        /// Decay parameter; ignored by non-alternating terms.
        lambda: f64,
    },
    /// Depends on one attribute column.
    NodalAttribute {
        /// Change statistic.
        f: NodalFn,
        /// Column index within the attribute family the statistic reads.
        attr: usize,
    },
    /// Depends on a dyadic covariate derived from node attributes.
    DyadicCovariate {
        /// Change statistic.
        f: DyadicFn,
    },
    /// Depends on two attribute columns.
    Interaction {
        /// Change statistic.
        f: InteractionFn,
        /// First column index.
        first: usize,
        /// Second column index.
        second: usize,
    },
}

impl StatTerm {
    /// Change statistic for adding `dyad`, which must currently be absent.
    #[inline]
    pub fn change(&self, graph: &Graph, dyad: Dyad) -> f64 {
        match *self {
            StatTerm::Structural { f, lambda } => f(graph, dyad, lambda),
            StatTerm::NodalAttribute { f, attr } => f(graph, dyad, attr),
            StatTerm::DyadicCovariate { f } => f(graph, dyad),
            StatTerm::Interaction { f, first, second } => f(graph, dyad, first, second),
        }
    }
}

impl fmt::Debug for StatTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatTerm::Structural { lambda, .. } => {
                f.debug_struct("Structural").field("lambda", lambda).finish()
            }
            StatTerm::NodalAttribute { attr, .. } => {
                f.debug_struct("NodalAttribute").field("attr", attr).finish()
            }
            StatTerm::DyadicCovariate { .. } => f.debug_struct("DyadicCovariate").finish(),
            StatTerm::Interaction { first, second, .. } => f
                .debug_struct("Interaction")
                .field("first", first)
                .field("second", second)
                .finish(),
        }
    }
}
