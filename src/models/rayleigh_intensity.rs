//! Rayleigh polarized intensity model
//!
//! # Mathematical Background
//!
//! For a sphere much smaller than the wavelength, the scattered intensity at distance d
//! splits into two polarization components:
//!
//! ```text
//! I⊥    = I₀ · 16π⁴r⁶ / (λ⁴d²) · |K|²
//! I∥(θ) = I⊥ · cos²θ
//! K     = (n² − 1) / (n² + 2)
//! ```
//!
//! Where:
//! - **I₀** : Incident intensity [W/m²]
//! - **r** : Particle radius [m]
//! - **λ** : Wavelength [m]
//! - **d** : Observer distance [m]
//! - **n** : Refractive index of the particle
//!
//! I⊥ does not depend on θ; I∥ vanishes at 90°. Both scale as r⁶, λ⁻⁴ and d⁻².
//!
//! # Validity
//!
//! The model requires r < λ (both in meters). Otherwise `compute` fails with
//! [`ScatteringError::Domain`](crate::error::ScatteringError::Domain) before any value
//! is produced.
//!
//! # Example Usage
//!
//! ```rust
//! use scatter_rs::models::RayleighIntensity;
//! use scatter_rs::physics::{Length, ScatteringModel, ScatteringParameters, ScatteringQuantity};
//! use scatter_rs::solver::AngleGrid;
//!
//! let model = RayleighIntensity::new(
//!     ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.01), 1.33257)
//!         .with_incident_intensity(1.0)
//!         .with_observer_distance(Length::centimeters(3.0)),
//! );
//!
//! let result = model.compute(&AngleGrid::stepped(0.0, 180.0, 0.1).unwrap()).unwrap();
//! let parallel = result.get(ScatteringQuantity::Parallel).unwrap();
//! let perpendicular = result.get(ScatteringQuantity::Perpendicular).unwrap();
//!
//! assert_eq!(parallel[0], perpendicular[0]);
//! assert!(parallel[900] < 1e-20 * perpendicular[900]);
//! ```

use nalgebra::DVector;

use crate::error::Result;
use crate::physics::rayleigh::{self, parallel_from_perpendicular};
use crate::physics::{ScatteringModel, ScatteringParameters, ScatteringQuantity, ScatteringResult};
use crate::solver::AngleGrid;

/// Rayleigh I∥ / I⊥ over an angle grid
///
/// Stores `Parallel` then `Perpendicular`, plus the scalar metadata `perpendicular_intensity`.
#[derive(Clone, Debug, PartialEq)]
pub struct RayleighIntensity {
    params: ScatteringParameters,
}

impl RayleighIntensity {
    pub fn new(params: ScatteringParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScatteringParameters {
        &self.params
    }
}

impl ScatteringModel for RayleighIntensity {
    fn compute(&self, grid: &AngleGrid) -> Result<ScatteringResult> {
        // ====== Validate (fails before any value is produced) ======

        let perpendicular = rayleigh::perpendicular_intensity(&self.params)?;

        // ====== Evaluate over the grid ======

        let parallel = grid
            .degrees()
            .map(|theta| parallel_from_perpendicular(perpendicular, theta));

        let mut result = ScatteringResult::new(grid.clone(), self.name());
        result.insert(ScatteringQuantity::Parallel, parallel)?;
        result.insert(
            ScatteringQuantity::Perpendicular,
            DVector::from_element(grid.len(), perpendicular),
        )?;
        result.set_metadata("perpendicular_intensity", perpendicular);

        Ok(result)
    }

    fn name(&self) -> &str {
        "Rayleigh Intensity"
    }

    fn description(&self) -> Option<&str> {
        Some("Polarized Rayleigh intensities I∥(θ) = I⊥·cos²θ at distance d")
    }

    fn parameters(&self) -> Vec<(String, String)> {
        self.params.table_rows()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
