//! Rayleigh scattering amplitude model
//!
//! # Mathematical Background
//!
//! In the small-particle limit the (unnormalized) amplitude functions are
//!
//! ```text
//! S1    = (2πr/λ)² · K           (perpendicular, isotropic)
//! S2(θ) = S1 · cosθ               (parallel)
//! K     = (n² − 1) / (n² + 2)
//! ```
//!
//! S1 is real whenever n is real.
//!
//! # Stored series
//!
//! - `S1`, `S2`: real parts, the columns written to amplitude tables
//! - `S1Squared`, `S2Squared`: |S1|² and |S2(θ)|², the curves plotted on a log axis

use nalgebra::DVector;

use crate::error::Result;
use crate::physics::rayleigh;
use crate::physics::{ScatteringModel, ScatteringParameters, ScatteringQuantity, ScatteringResult};
use crate::solver::AngleGrid;

/// Rayleigh S1 / S2 over an angle grid
///
/// No observer distance or incident intensity is needed.
#[derive(Clone, Debug, PartialEq)]
pub struct RayleighAmplitude {
    params: ScatteringParameters,
}

impl RayleighAmplitude {
    pub fn new(params: ScatteringParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScatteringParameters {
        &self.params
    }
}

impl ScatteringModel for RayleighAmplitude {
    fn compute(&self, grid: &AngleGrid) -> Result<ScatteringResult> {
        let s1 = rayleigh::amplitude_s1(&self.params)?;
        let n = grid.len();

        let cosines = grid.radians().map(f64::cos);
        let s2_re = cosines.map(|c| (s1 * c).re);
        let s2_sq = cosines.map(|c| (s1 * c).norm_sqr());

        let mut result = ScatteringResult::new(grid.clone(), self.name());
        result.insert(ScatteringQuantity::S1, DVector::from_element(n, s1.re))?;
        result.insert(ScatteringQuantity::S2, s2_re)?;
        result.insert(
            ScatteringQuantity::S1Squared,
            DVector::from_element(n, s1.norm_sqr()),
        )?;
        result.insert(ScatteringQuantity::S2Squared, s2_sq)?;
        result.set_metadata("s1_real", s1.re);
        result.set_metadata("s1_imag", s1.im);

        Ok(result)
    }

    fn name(&self) -> &str {
        "Rayleigh Amplitude"
    }

    fn parameters(&self) -> Vec<(String, String)> {
        self.params.table_rows()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Length;

    fn model() -> RayleighAmplitude {
        RayleighAmplitude::new(ScatteringParameters::new(
            Length::nanometers(650.0),
            Length::micrometers(0.01),
            1.33257,
        ))
    }

    #[test]
    fn test_s1_constant_and_real() {
        let result = model().compute(&AngleGrid::standard()).unwrap();
        let s1 = result.get(ScatteringQuantity::S1).unwrap();
        assert!(s1.iter().all(|v| *v == s1[0]));
        assert_eq!(result.get_metadata("s1_imag"), Some(0.0));
    }

    #[test]
    fn test_s2_is_s1_cos_theta() {
        let result = model().compute(&AngleGrid::standard()).unwrap();
        let s1 = result.get(ScatteringQuantity::S1).unwrap();
        let s2 = result.get(ScatteringQuantity::S2).unwrap();

        assert_eq!(s2[0], s1[0]);
        assert!(s2[900].abs() < 1e-15 * s1[0].abs());
        assert!((s2[1800] + s1[0]).abs() < 1e-15 * s1[0].abs());
    }

    #[test]
    fn test_squared_series() {
        let result = model().compute(&AngleGrid::standard()).unwrap();
        let s1 = result.get(ScatteringQuantity::S1).unwrap()[0];
        let s1_sq = result.get(ScatteringQuantity::S1Squared).unwrap()[0];
        let s2_sq = result.get(ScatteringQuantity::S2Squared).unwrap();

        assert!((s1_sq - s1 * s1).abs() < 1e-15 * s1_sq);
        assert!((s2_sq[0] - s1_sq).abs() < 1e-15 * s1_sq);
    }

    #[test]
    fn test_no_distance_needed() {
        assert!(model().params().observer_distance.is_none());
        assert!(model().compute(&AngleGrid::standard()).is_ok());
    }
}
