//! Node attribute columns read by nodal, dyadic and interaction statistics.

use ergm_core::errors::metadata_error;
use ergm_core::{ErgmError, NodeIndex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named column with one value per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column<T> {
    /// Attribute name as given by the data source.
    pub name: String,
    /// One value per node.
    pub values: Vec<T>,
}

impl<T> Column<T> {
    /// Creates a column.
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Attribute columns for every node of a graph. Missing values are `None`
/// (binary, categorical) or `NaN` (continuous).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Binary attributes.
    #[serde(default)]
    pub binary: Vec<Column<Option<bool>>>,
    /// Categorical attributes.
    #[serde(default)]
    pub categorical: Vec<Column<Option<u32>>>,
    /// Continuous attributes.
    #[serde(default, with = "missing_as_null")]
    pub continuous: Vec<Column<f64>>,
    /// Continuous column indices holding latitude and longitude in degrees.
    #[serde(default)]
    pub geo: Option<(usize, usize)>,
    /// Continuous column indices forming Euclidean coordinates.
    #[serde(default)]
    pub coordinates: Vec<usize>,
}

impl NodeAttributes {
    /// Validates column lengths and coordinate indices against `num_nodes`.
    pub fn validate(&self, num_nodes: usize) -> Result<(), ErgmError> {
        let lengths = self
            .binary
            .iter()
            .map(|c| (&c.name, c.values.len()))
            .chain(self.categorical.iter().map(|c| (&c.name, c.values.len())))
            .chain(self.continuous.iter().map(|c| (&c.name, c.values.len())));
        for (name, len) in lengths {
            if len != num_nodes {
                return Err(metadata_error(
                    "attribute-length",
                    "attribute column length differs from node count",
                )
                .with_context("attribute", name)
                .with_context("expected", num_nodes)
                .with_context("actual", len));
            }
        }
        let mut referenced: Vec<usize> = self.coordinates.clone();
        if let Some((lat, lon)) = self.geo {
            referenced.extend([lat, lon]);
        }
        if let Some(bad) = referenced.into_iter().find(|&idx| idx >= self.continuous.len()) {
            return Err(metadata_error(
                "coordinate-index",
                "coordinate column index is out of range",
            )
            .with_context("index", bad)
            .with_context("continuous_columns", self.continuous.len()));
        }
        Ok(())
    }

    /// Binary value, `None` if missing.
    #[inline]
    pub fn binary(&self, attr: usize, node: NodeIndex) -> Option<bool> {
        self.binary[attr].values[node]
    }

    /// Categorical value, `None` if missing.
    #[inline]
    pub fn categorical(&self, attr: usize, node: NodeIndex) -> Option<u32> {
        self.categorical[attr].values[node]
    }

    /// Continuous value, `NaN` if missing.
    #[inline]
    pub fn continuous(&self, attr: usize, node: NodeIndex) -> f64 {
        self.continuous[attr].values[node]
    }

    /// Index of the binary column called `name`.
    pub fn binary_index(&self, name: &str) -> Option<usize> {
        self.binary.iter().position(|c| c.name == name)
    }

    /// Index of the categorical column called `name`.
    pub fn categorical_index(&self, name: &str) -> Option<usize> {
        self.categorical.iter().position(|c| c.name == name)
    }

    /// Index of the continuous column called `name`.
    pub fn continuous_index(&self, name: &str) -> Option<usize> {
        self.continuous.iter().position(|c| c.name == name)
    }
}

/// JSON has no NaN; missing continuous values travel as `null`.
mod missing_as_null {
    use super::*;

    pub fn serialize<S: Serializer>(columns: &[Column<f64>], serializer: S) -> Result<S::Ok, S::Error> {
        let nullable: Vec<Column<Option<f64>>> = columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                values: column
                    .values
                    .iter()
                    .map(|value| (!value.is_nan()).then_some(*value))
                    .collect(),
            })
            .collect();
        nullable.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Column<f64>>, D::Error> {
        let nullable = Vec::<Column<Option<f64>>>::deserialize(deserializer)?;
        Ok(nullable
            .into_iter()
            .map(|column| Column {
                name: column.name,
                values: column
                    .values
                    .into_iter()
                    .map(|value| value.unwrap_or(f64::NAN))
                    .collect(),
            })
            .collect())
    }
}
