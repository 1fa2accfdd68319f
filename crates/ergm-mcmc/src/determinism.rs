use ergm_core::{derive_substream_seed, RngHandle};

const CHAIN_DOMAIN: u64 = 0xC4A1_7E55_0000_0000;

/// Seed of independent chain `chain` under `master_seed`.
///
/// No chain, chain 0 included, runs on the master seed directly.
pub fn chain_seed(master_seed: u64, chain: usize) -> u64 {
    derive_substream_seed(master_seed, CHAIN_DOMAIN | chain as u64)
}

/// Generator for chain `chain`.
pub fn chain_rng(master_seed: u64, chain: usize) -> RngHandle {
    RngHandle::for_substream(master_seed, CHAIN_DOMAIN | chain as u64)
}
