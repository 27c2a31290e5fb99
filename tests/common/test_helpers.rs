//! Helper functions for integration tests

use nalgebra::DVector;
use scatter_rs::physics::{Length, ScatteringParameters};

/// λ = 650 nm, r = 0.01 μm, n = 1.33257, I₀ = 1, d = 3 cm
pub fn water_droplet() -> ScatteringParameters {
    ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.01), 1.33257)
        .with_incident_intensity(1.0)
        .with_observer_distance(Length::centimeters(3.0))
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        actual.abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Assert two series agree element-wise within a relative tolerance
pub fn assert_series_close(
    actual: &DVector<f64>,
    expected: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", message);

    let scale = expected.amax().max(f64::MIN_POSITIVE);
    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance * scale,
            "{}: element {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance * scale
        );
    }
}
