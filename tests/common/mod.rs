#![allow(dead_code)]

use approx::assert_relative_eq;
use orbimpact::{OrbitalElements, Position};

pub const EROS_RECORD_JSON: &str = r#"{
    "id": "2000433",
    "name": "433 Eros (A898 PA)",
    "estimated_diameter": {
        "meters": {"estimated_diameter_min": 22100.0, "estimated_diameter_max": 49400.0}
    },
    "is_potentially_hazardous_asteroid": false,
    "orbital_data": {
        "epoch_osculation": "2461000.5",
        "eccentricity": ".2228359407071628",
        "semi_major_axis": "1.458120998474684",
        "inclination": "10.82846651399785",
        "ascending_node_longitude": "304.2701025753316",
        "perihelion_argument": "178.9297536744151",
        "mean_anomaly": "310.5543277370992"
    }
}"#;

pub fn assert_elements_close(actual: &OrbitalElements, expected: &OrbitalElements, epsilon: f64) {
    assert_relative_eq!(
        actual.semi_major_axis_au(),
        expected.semi_major_axis_au(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity(),
        expected.eccentricity(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.inclination_deg(),
        expected.inclination_deg(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.ascending_node_longitude_deg(),
        expected.ascending_node_longitude_deg(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.argument_of_periapsis_deg(),
        expected.argument_of_periapsis_deg(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.mean_anomaly_deg(),
        expected.mean_anomaly_deg(),
        epsilon = epsilon
    );
}

pub fn assert_positions_close(actual: &[Position], expected: &[Position], max_relative: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(
            a.as_vector(),
            e.as_vector(),
            epsilon = 1e-6,
            max_relative = max_relative
        );
    }
}
