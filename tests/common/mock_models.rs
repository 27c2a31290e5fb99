//! Mock models and solvers for integration tests

use nalgebra::DVector;
use num_complex::Complex64;

use scatter_rs::error::Result;
use scatter_rs::physics::{ScatteringModel, ScatteringQuantity, ScatteringResult};
use scatter_rs::solver::{AngleGrid, MieConfiguration, MieSolver, ScatteringFunction};

/// Same intensity in every direction, for both polarizations
pub struct IsotropicModel {
    pub intensity: f64,
}

impl IsotropicModel {
    pub fn new(intensity: f64) -> Self {
        Self { intensity }
    }
}

impl ScatteringModel for IsotropicModel {
    fn compute(&self, grid: &AngleGrid) -> Result<ScatteringResult> {
        let mut result = ScatteringResult::new(grid.clone(), self.name());
        let values = DVector::from_element(grid.len(), self.intensity);
        result.insert(ScatteringQuantity::Parallel, values.clone())?;
        result.insert(ScatteringQuantity::Perpendicular, values)?;
        Ok(result)
    }

    fn name(&self) -> &str {
        "Isotropic"
    }

    fn parameters(&self) -> Vec<(String, String)> {
        vec![("I".to_string(), self.intensity.to_string())]
    }
}

/// Mie backend returning SL = 1, SR = 3, SU = 2 on the configured grid
pub struct ConstantSolver;

impl MieSolver for ConstantSolver {
    fn scattering_function(
        &self,
        _m: Complex64,
        _wavelength_nm: f64,
        _diameter_nm: f64,
        config: &MieConfiguration,
    ) -> Result<ScatteringFunction> {
        let theta_rad: Vec<f64> = config
            .angles_deg()?
            .into_iter()
            .map(f64::to_radians)
            .collect();
        let n = theta_rad.len();
        Ok(ScatteringFunction {
            theta_rad,
            sl: vec![1.0; n],
            sr: vec![3.0; n],
            su: vec![2.0; n],
        })
    }

    fn name(&self) -> &str {
        "Constant"
    }
}
