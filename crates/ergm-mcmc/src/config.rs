use ergm_core::errors::config_error;
use ergm_core::ErgmError;
use serde::{Deserialize, Serialize};

/// Which Metropolis-Hastings proposal scheme to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SamplerKind {
    /// Uniform dyad toggles.
    Basic,
    /// Tie / no-tie mixture.
    #[default]
    Tnt,
    /// Improved fixed density with an adaptive auxiliary parameter.
    Ifd,
}

/// Which part of the graph proposals may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Conditioning {
    /// Every dyad.
    #[default]
    Free,
    /// Inner-wave dyads of a snowball sample.
    Snowball,
    /// Arcs sent by latest-term nodes of a citation network.
    Citation,
}

/// YAML-configurable sampler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Proposal scheme.
    #[serde(default)]
    pub kind: SamplerKind,
    /// Conditional estimation mode.
    #[serde(default)]
    pub conditioning: Conditioning,
    /// Reject additions that would create a mutual pair (directed only).
    #[serde(default)]
    pub forbid_reciprocity: bool,
    /// Gain of the IFD auxiliary parameter update.
    #[serde(default = "default_ifd_k")]
    pub ifd_k: f64,
    /// Cap on rejection-sampling draws when looking for a candidate dyad.
    #[serde(default = "default_max_proposal_retries")]
    pub max_proposal_retries: usize,
}

fn default_ifd_k() -> f64 {
    0.1
}

fn default_max_proposal_retries() -> usize {
    10_000
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            kind: SamplerKind::default(),
            conditioning: Conditioning::default(),
            forbid_reciprocity: false,
            ifd_k: default_ifd_k(),
            max_proposal_retries: default_max_proposal_retries(),
        }
    }
}

/// Settings for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Sampler settings.
    #[serde(default)]
    pub sampler: SamplerConfig,
    /// Iterations discarded before the first sample.
    #[serde(default)]
    pub burn_in: usize,
    /// Iterations between recorded samples.
    #[serde(default = "default_interval")]
    pub interval: usize,
    /// Number of samples to record.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Master seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_interval() -> usize {
    1_000
}

fn default_samples() -> usize {
    100
}

fn default_seed() -> u64 {
    0x5EED_E26E_0000_0001
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            burn_in: 0,
            interval: default_interval(),
            samples: default_samples(),
            seed: default_seed(),
        }
    }
}

impl SimulationConfig {
    /// Parses a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ErgmError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|err| config_error("yaml-deserialize", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, ErgmError> {
        serde_yaml::to_string(self).map_err(|err| config_error("yaml-serialize", err.to_string()))
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ErgmError> {
        if self.interval == 0 {
            return Err(config_error("zero-interval", "sample interval must be positive"));
        }
        if self.sampler.max_proposal_retries == 0 {
            return Err(config_error(
                "zero-retries",
                "max_proposal_retries must be positive",
            ));
        }
        if !(self.sampler.ifd_k.is_finite() && self.sampler.ifd_k > 0.0) {
            return Err(config_error("ifd-gain", "ifd_k must be a positive number")
                .with_context("ifd_k", self.sampler.ifd_k));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = SimulationConfig::from_yaml_str("sampler:\n  kind: ifd\nsamples: 5\n").unwrap();
        assert_eq!(config.sampler.kind, SamplerKind::Ifd);
        assert_eq!(config.sampler.ifd_k, 0.1);
        assert_eq!(config.sampler.max_proposal_retries, 10_000);
        assert_eq!(config.samples, 5);
        assert_eq!(config.interval, 1_000);
    }

    #[test]
    fn invalid_ranges_are_config_errors() {
        let err = SimulationConfig::from_yaml_str("interval: 0\n").unwrap_err();
        assert_eq!(err.code(), "zero-interval");
        let err = SimulationConfig::from_yaml_str("sampler:\n  kind: gibbs\n").unwrap_err();
        assert_eq!(err.code(), "yaml-deserialize");
    }
}
