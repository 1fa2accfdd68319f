//! Dyadic covariates derived from coordinate attribute columns.

use ergm_core::{Dyad, NodeIndex};
use ergm_graph::Graph;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between the endpoints, from the
/// latitude/longitude columns. Zero when either location is missing.
pub fn geo_distance(graph: &Graph, dyad: Dyad) -> f64 {
    haversine_km(graph, dyad.i, dyad.j).unwrap_or(0.0)
}

/// Natural log of the great-circle distance. Zero when the distance is zero
/// or a location is missing.
pub fn log_geo_distance(graph: &Graph, dyad: Dyad) -> f64 {
    match haversine_km(graph, dyad.i, dyad.j) {
        Some(km) if km > 0.0 => km.ln(),
        _ => 0.0,
    }
}

/// Euclidean distance over the coordinate columns. Zero when any coordinate
/// is missing.
pub fn euclidean_distance(graph: &Graph, dyad: Dyad) -> f64 {
    let attributes = graph.attributes();
    let squared: f64 = attributes
        .coordinates
        .iter()
        .map(|&col| attributes.continuous(col, dyad.i) - attributes.continuous(col, dyad.j))
        .map(|delta| delta * delta)
        .sum();
    if squared.is_nan() {
        0.0
    } else {
        squared.sqrt()
    }
}

fn haversine_km(graph: &Graph, a: NodeIndex, b: NodeIndex) -> Option<f64> {
    let attributes = graph.attributes();
    let (lat_col, lon_col) = attributes.geo?;
    let lat_a = attributes.continuous(lat_col, a).to_radians();
    let lon_a = attributes.continuous(lon_col, a).to_radians();
    let lat_b = attributes.continuous(lat_col, b).to_radians();
    let lon_b = attributes.continuous(lon_col, b).to_radians();
    let h = ((lat_b - lat_a) / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * ((lon_b - lon_a) / 2.0).sin().powi(2);
    let km = 2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin();
    (!km.is_nan()).then_some(km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ergm_graph::{Column, GraphConfig, NodeAttributes};

    fn located(coords: Vec<(f64, f64)>) -> Graph {
        let mut graph = Graph::new(coords.len(), GraphConfig::undirected());
        let mut attributes = NodeAttributes::default();
        attributes
            .continuous
            .push(Column::new("lat", coords.iter().map(|c| c.0).collect()));
        attributes
            .continuous
            .push(Column::new("lon", coords.iter().map(|c| c.1).collect()));
        attributes.geo = Some((0, 1));
        attributes.coordinates = vec![0, 1];
        graph.set_attributes(attributes).unwrap();
        graph
    }

    #[test]
    fn quarter_meridian_distance() {
        let graph = located(vec![(0.0, 0.0), (90.0, 0.0)]);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((geo_distance(&graph, Dyad::new(0, 1)) - expected).abs() < 1e-6);
        assert!((log_geo_distance(&graph, Dyad::new(0, 1)) - expected.ln()).abs() < 1e-9);
    }

    #[test]
    fn missing_locations_contribute_nothing() {
        let graph = located(vec![(0.0, 0.0), (f64::NAN, 10.0), (3.0, 4.0)]);
        assert_eq!(geo_distance(&graph, Dyad::new(0, 1)), 0.0);
        assert_eq!(euclidean_distance(&graph, Dyad::new(0, 1)), 0.0);
        assert_eq!(euclidean_distance(&graph, Dyad::new(0, 2)), 5.0);
    }
}
