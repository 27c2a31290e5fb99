//! Mie scattering model
//!
//! Adapter between [`ScatteringParameters`] and a [`MieSolver`] backend. The model converts
//! the parameters to the solver's units (wavelength and diameter in nanometers), calls it, and
//! stores the returned intensities as a [`ScatteringResult`]:
//!
//! - `Perpendicular`: SL = |S1|²
//! - `Parallel`: SR = |S2|²
//! - `Unpolarized`: SU = (SL + SR)/2
//!
//! The angle grid is the solver's (set by [`MieConfiguration`]), converted from radians to
//! degrees. A grid passed to `compute` is ignored.
//!
//! # Example Usage
//!
//! ```rust
//! use scatter_rs::models::MieScattering;
//! use scatter_rs::physics::{Length, RefractiveIndex, ScatteringModel, ScatteringParameters};
//! use scatter_rs::solver::AngleGrid;
//!
//! let model = MieScattering::new(ScatteringParameters::new(
//!     Length::nanometers(650.0),
//!     Length::nanometers(1000.0),
//!     RefractiveIndex::complex(1.33257, 1.67e-8),
//! ));
//!
//! let result = model.compute(&AngleGrid::standard()).unwrap();
//! assert_eq!(result.len(), 361);
//! assert!(result.get_metadata("size_parameter").unwrap() > 9.0);
//! ```

use std::f64::consts::PI;
use std::sync::Arc;

use nalgebra::DVector;

use crate::error::Result;
use crate::physics::{
    LengthUnit, ScatteringModel, ScatteringParameters, ScatteringQuantity, ScatteringResult,
};
use crate::solver::{
    AngleGrid, BohrenHuffman, MieConfiguration, MieSolver, ScatteringFunction,
};

/// Mie intensities of one sphere, computed by a pluggable solver
#[derive(Clone)]
pub struct MieScattering {
    params: ScatteringParameters,
    solver: Arc<dyn MieSolver>,
    config: MieConfiguration,
}

impl MieScattering {
    /// Model backed by [`BohrenHuffman`] with the default configuration (0.5° steps)
    pub fn new(params: ScatteringParameters) -> Self {
        Self {
            params,
            solver: Arc::new(BohrenHuffman::new()),
            config: MieConfiguration::default(),
        }
    }

    /// Replace the Mie backend
    pub fn with_solver(mut self, solver: impl MieSolver + 'static) -> Self {
        self.solver = Arc::new(solver);
        self
    }

    pub fn with_configuration(mut self, config: MieConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn params(&self) -> &ScatteringParameters {
        &self.params
    }

    pub fn configuration(&self) -> &MieConfiguration {
        &self.config
    }

    /// Size parameter x = π·d·n_medium/λ
    pub fn size_parameter(&self) -> f64 {
        PI * self.params.diameter().to_meters() * self.config.medium_index
            / self.params.wavelength.to_meters()
    }

    /// Raw solver output (angles in radians)
    pub fn scattering_function(&self) -> Result<ScatteringFunction> {
        self.params.validate()?;
        self.solver.scattering_function(
            self.params.refractive_index.value(),
            self.params.wavelength.in_unit(LengthUnit::Nanometer),
            self.params.diameter().in_unit(LengthUnit::Nanometer),
            &self.config,
        )
    }
}

impl ScatteringModel for MieScattering {
    fn compute(&self, _grid: &AngleGrid) -> Result<ScatteringResult> {
        let sf = self.scattering_function()?;
        let grid = AngleGrid::from_radians(&sf.theta_rad)?;

        let mut result = ScatteringResult::new(grid, self.name());
        result.insert(ScatteringQuantity::Perpendicular, DVector::from_vec(sf.sl))?;
        result.insert(ScatteringQuantity::Parallel, DVector::from_vec(sf.sr))?;
        result.insert(ScatteringQuantity::Unpolarized, DVector::from_vec(sf.su))?;
        result.set_metadata("size_parameter", self.size_parameter());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Mie Scattering"
    }

    fn description(&self) -> Option<&str> {
        Some(self.solver.name())
    }

    fn parameters(&self) -> Vec<(String, String)> {
        vec![
            ("λ".to_string(), self.params.wavelength.to_string()),
            ("Radius of particle (r)".to_string(), self.params.radius.to_string()),
            ("Ref. Index (m)".to_string(), self.params.refractive_index.to_string()),
        ]
    }
}

impl std::fmt::Debug for MieScattering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MieScattering")
            .field("params", &self.params)
            .field("solver", &self.solver.name())
            .field("config", &self.config)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
