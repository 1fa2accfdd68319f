#![deny(missing_docs)]
#![doc = "Metropolis-Hastings dyad-toggle samplers (basic, TNT, IFD) with snowball, citation and reciprocity constraints."]

/// Uniform dyad toggle sampler.
pub mod basic;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Improved fixed density sampler.
pub mod ifd;
/// Sampler contract, batch outcome and the shared acceptance step.
pub mod kernel;
pub mod proposal;
/// Simulation driver recording statistic trajectories.
pub mod simulate;
/// Tie / no-tie sampler.
pub mod tnt;

pub use basic::BasicSampler;
pub use config::{Conditioning, SamplerConfig, SamplerKind, SimulationConfig};
pub use ifd::IfdSampler;
pub use kernel::{BatchOutcome, Sampler};
pub use proposal::ProposalStrategy;
pub use simulate::{
    build_sampler, simulate, simulate_chains, simulate_from_config, SampleRow,
    SimulationTrace,
};
pub use tnt::TntSampler;
