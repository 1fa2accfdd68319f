use ergm_core::errors::{config_error, model_error};
use ergm_core::ErgmError;
use ergm_graph::Graph;
use serde::{Deserialize, Serialize};

use crate::registry::StatRegistry;

/// One statistic in a model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    /// Catalogue name, e.g. `AltInStars`.
    pub name: String,
    /// Decay for alternating statistics; defaults to 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    /// Attribute column for nodal and interaction statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Second attribute column for interaction statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_attribute: Option<String>,
}

impl TermSpec {
    /// A statistic with no arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lambda: None,
            attribute: None,
            second_attribute: None,
        }
    }

    /// Sets the decay parameter.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = Some(lambda);
        self
    }

    /// Sets the attribute column.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Sets the second attribute column.
    pub fn with_second_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.second_attribute = Some(attribute.into());
        self
    }
}

/// A model: statistics and their parameters, in matching order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Statistics.
    pub terms: Vec<TermSpec>,
    /// Parameter for each statistic.
    pub theta: Vec<f64>,
}

impl ModelSpec {
    /// Parses a YAML model file.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ErgmError> {
        serde_yaml::from_str(yaml).map_err(|err| config_error("yaml-deserialize", err.to_string()))
    }

    /// Renders the model as YAML.
    pub fn to_yaml_string(&self) -> Result<String, ErgmError> {
        serde_yaml::to_string(self).map_err(|err| config_error("yaml-serialize", err.to_string()))
    }

    /// Builds the registry for `graph` and returns it with the parameters.
    pub fn build(&self, graph: &Graph) -> Result<(StatRegistry, Vec<f64>), ErgmError> {
        if self.theta.len() != self.terms.len() {
            return Err(
                model_error("length-mismatch", "one parameter per statistic is required")
                    .with_context("terms", self.terms.len())
                    .with_context("theta", self.theta.len()),
            );
        }
        let registry = StatRegistry::from_specs(graph, &self.terms)?;
        Ok((registry, self.theta.clone()))
    }
}
