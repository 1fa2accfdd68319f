use ergm_core::errors::model_error;
use ergm_core::{Dyad, ErgmError};
use ergm_graph::Graph;

use crate::catalog::{self, AttributeFamily, DyadicInput, Shape};
use crate::model::TermSpec;
use crate::term::{StatTerm, DEFAULT_LAMBDA};

/// A statistic together with the label reported in traces.
#[derive(Debug, Clone)]
pub struct RegisteredTerm {
    /// Display label, e.g. `AltInStars(2)` or `Sender(smoker)`.
    pub label: String,
    /// Change statistic.
    pub term: StatTerm,
}

/// Ordered list of change statistics. The order fixes the layout of the
/// parameter and change vectors.
#[derive(Debug, Clone, Default)]
pub struct StatRegistry {
    terms: Vec<RegisteredTerm>,
}

impl StatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statistic.
    pub fn push(&mut self, label: impl Into<String>, term: StatTerm) {
        self.terms.push(RegisteredTerm {
            label: label.into(),
            term,
        });
    }

    /// Resolves term specifications through the catalogue against `graph`'s
    /// kind and attribute columns.
    pub fn from_specs(graph: &Graph, specs: &[TermSpec]) -> Result<Self, ErgmError> {
        let mut registry = Self::new();
        for spec in specs {
            let (label, term) = resolve(graph, spec)?;
            registry.push(label, term);
        }
        tracing::debug!(
            terms = registry.len(),
            labels = ?registry.labels().collect::<Vec<_>>(),
            "built statistic registry"
        );
        Ok(registry)
    }

    /// Number of statistics.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the registry holds no statistics.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Registered statistics in order.
    pub fn terms(&self) -> &[RegisteredTerm] {
        &self.terms
    }

    /// Labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|entry| entry.label.as_str())
    }

    /// Computes every statistic for `dyad` as if it were being added, writes
    /// the values to `out` (negated when `is_delete`) and returns `theta · out`.
    ///
    /// For deletions the dyad must already be provisionally removed.
    pub fn evaluate(
        &self,
        graph: &Graph,
        dyad: Dyad,
        is_delete: bool,
        theta: &[f64],
        out: &mut [f64],
    ) -> Result<f64, ErgmError> {
        self.check_len("theta", theta.len())?;
        self.check_len("out", out.len())?;
        let sign = if is_delete { -1.0 } else { 1.0 };
        let mut total = 0.0;
        for ((slot, entry), weight) in out.iter_mut().zip(&self.terms).zip(theta) {
            let value = sign * entry.term.change(graph, dyad);
            *slot = value;
            total += weight * value;
        }
        Ok(total)
    }

    /// Statistic vector of `graph`, accumulated from the change statistics of
    /// its ties added one by one to an empty graph.
    pub fn observed(&self, graph: &Graph) -> Result<Vec<f64>, ErgmError> {
        let mut scratch = Graph::new(graph.num_nodes(), *graph.config());
        scratch.set_attributes(graph.attributes().clone())?;
        let mut ties: Vec<Dyad> = graph.ties().iter().collect();
        ties.sort();
        let mut z = vec![0.0; self.len()];
        for dyad in ties {
            for (acc, entry) in z.iter_mut().zip(&self.terms) {
                *acc += entry.term.change(&scratch, dyad);
            }
            scratch.insert(dyad.i, dyad.j)?;
        }
        Ok(z)
    }

    fn check_len(&self, what: &str, len: usize) -> Result<(), ErgmError> {
        if len != self.len() {
            return Err(
                model_error("length-mismatch", "vector length differs from the registry")
                    .with_context("vector", what)
                    .with_context("expected", self.len())
                    .with_context("actual", len),
            );
        }
        Ok(())
    }
}

fn resolve(graph: &Graph, spec: &TermSpec) -> Result<(String, StatTerm), ErgmError> {
    let entry = catalog::lookup(&spec.name).ok_or_else(|| {
        model_error("unknown-statistic", "no statistic with this name")
            .with_context("name", &spec.name)
    })?;
    if !entry.support.accepts(graph.kind()) {
        return Err(
            model_error("kind-mismatch", "statistic is not defined for this graph kind")
                .with_context("name", &spec.name)
                .with_context("kind", format!("{:?}", graph.kind())),
        );
    }
    match entry.shape {
        Shape::Structural(f) => {
            let lambda = spec.lambda.unwrap_or(DEFAULT_LAMBDA);
            if lambda <= 1.0 || !lambda.is_finite() {
                return Err(model_error("lambda-range", "decay must be greater than one")
                    .with_context("name", &spec.name)
                    .with_context("lambda", lambda));
            }
            let label = match spec.lambda {
                Some(lambda) => format!("{}({lambda})", spec.name),
                None => spec.name.clone(),
            };
            Ok((label, StatTerm::Structural { f, lambda }))
        }
        Shape::Nodal(family, f) => {
            let (name, attr) = column(graph, spec, family, spec.attribute.as_deref())?;
            Ok((
                format!("{}({name})", spec.name),
                StatTerm::NodalAttribute { f, attr },
            ))
        }
        Shape::Dyadic(input, f) => {
            let attributes = graph.attributes();
            let available = match input {
                DyadicInput::Geo => attributes.geo.is_some(),
                DyadicInput::Coordinates => !attributes.coordinates.is_empty(),
            };
            if !available {
                return Err(model_error(
                    "missing-covariate",
                    "graph attributes lack the columns this covariate reads",
                )
                .with_context("name", &spec.name)
                .with_hint("set geo or coordinates on the node attributes"));
            }
            Ok((spec.name.clone(), StatTerm::DyadicCovariate { f }))
        }
        Shape::Interaction(family, f) => {
            let (a, first) = column(graph, spec, family, spec.attribute.as_deref())?;
            let (b, second) = column(graph, spec, family, spec.second_attribute.as_deref())?;
            Ok((
                format!("{}({a},{b})", spec.name),
                StatTerm::Interaction { f, first, second },
            ))
        }
    }
}

fn column<'a>(
    graph: &Graph,
    spec: &TermSpec,
    family: AttributeFamily,
    name: Option<&'a str>,
) -> Result<(&'a str, usize), ErgmError> {
    let name = name.ok_or_else(|| {
        model_error("missing-attribute", "statistic needs an attribute name")
            .with_context("name", &spec.name)
    })?;
    let attributes = graph.attributes();
    let index = match family {
        AttributeFamily::Binary => attributes.binary_index(name),
        AttributeFamily::Categorical => attributes.categorical_index(name),
        AttributeFamily::Continuous => attributes.continuous_index(name),
    };
    index.map(|idx| (name, idx)).ok_or_else(|| {
        model_error("unknown-attribute", "no attribute column with this name")
            .with_context("name", &spec.name)
            .with_context("attribute", name)
            .with_context("family", format!("{family:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ergm_graph::GraphConfig;

    #[test]
    fn deletion_negates_every_term() {
        let graph = Graph::with_ties(3, GraphConfig::directed(), [(1, 0), (0, 2)]).unwrap();
        let specs = [TermSpec::named("Arc"), TermSpec::named("Reciprocity")];
        let registry = StatRegistry::from_specs(&graph, &specs).unwrap();
        let theta = [-1.0, 2.0];
        let mut out = [0.0; 2];
        let add = registry
            .evaluate(&graph, Dyad::new(0, 1), false, &theta, &mut out)
            .unwrap();
        assert_eq!(out, [1.0, 1.0]);
        assert_eq!(add, 1.0);
        let del = registry
            .evaluate(&graph, Dyad::new(0, 1), true, &theta, &mut out)
            .unwrap();
        assert_eq!(out, [-1.0, -1.0]);
        assert_eq!(del, -1.0);
    }

    #[test]
    fn mismatched_vectors_are_model_errors() {
        let graph = Graph::new(3, GraphConfig::directed());
        let registry = StatRegistry::from_specs(&graph, &[TermSpec::named("Arc")]).unwrap();
        let mut out = [0.0; 1];
        let err = registry
            .evaluate(&graph, Dyad::new(0, 1), false, &[1.0, 2.0], &mut out)
            .unwrap_err();
        assert_eq!(err.code(), "length-mismatch");
    }

    #[test]
    fn unknown_names_and_wrong_kinds_are_rejected() {
        let graph = Graph::new(3, GraphConfig::undirected());
        let unknown = StatRegistry::from_specs(&graph, &[TermSpec::named("Nope")]).unwrap_err();
        assert_eq!(unknown.code(), "unknown-statistic");
        let wrong = StatRegistry::from_specs(&graph, &[TermSpec::named("Arc")]).unwrap_err();
        assert_eq!(wrong.code(), "kind-mismatch");
    }
}
