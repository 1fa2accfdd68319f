#![deny(missing_docs)]
#![doc = "Change statistic registry and statistic catalogue for dyad-toggle ERGM samplers."]

pub mod attribute;
pub mod bipartite;
pub mod catalog;
pub mod directed;
pub mod dyadic;
mod model;
mod registry;
mod term;
pub mod undirected;

pub use model::{ModelSpec, TermSpec};
pub use registry::{RegisteredTerm, StatRegistry};
pub use term::{
    DyadicFn, InteractionFn, NodalFn, StatTerm, StructuralFn, DEFAULT_LAMBDA,
};
