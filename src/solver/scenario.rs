//! Scattering scenario definition
//!
//! A scenario combines a scattering model with the angle grid it is evaluated on.
use crate::error::Result;
use crate::physics::traits::{ScatteringModel, ScatteringResult};
use crate::solver::grid::AngleGrid;
use crate::solver::validate_result;

/// Scattering scenario
///
/// Defines one evaluation:
/// - Scattering model (formula or Mie adapter)
/// - Angle grid
///
/// # Examples
///
/// ```rust
/// use scatter_rs::models::RayleighIntensity;
/// use scatter_rs::physics::{Length, ScatteringParameters};
/// use scatter_rs::solver::{AngleGrid, Scenario};
///
/// let params = ScatteringParameters::new(
///     Length::nanometers(650.0),
///     Length::micrometers(0.01),
///     1.33257,
/// )
/// .with_observer_distance(Length::centimeters(3.0));
///
/// let scenario = Scenario::new(Box::new(RayleighIntensity::new(params)), AngleGrid::standard());
/// let result = scenario.run().unwrap();
/// assert_eq!(result.len(), 1801);
/// ```
pub struct Scenario {
    /// Scattering model
    pub model: Box<dyn ScatteringModel>,

    /// Angles to evaluate
    pub grid: AngleGrid,
}

impl Scenario {
    /// Create a scenario
    pub fn new(model: Box<dyn ScatteringModel>, grid: AngleGrid) -> Self {
        Self { model, grid }
    }

    /// Verifying scenario content (mainly the grid)
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()
    }

    /// Validate, evaluate and check the result for NaN/Inf
    pub fn run(&self) -> Result<ScatteringResult> {
        self.validate()?;
        let result = self.model.compute(&self.grid)?;
        validate_result(&result)?;
        Ok(result)
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }

    /// Number of angles
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("angles", &self.len())
            .field("first", &self.grid.first())
            .field("last", &self.grid.last())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScatteringError;
    use crate::physics::traits::ScatteringQuantity;
    use nalgebra::DVector;

    // Mocking a scattering model
    struct MockModel {
        value: f64,
    }

    impl ScatteringModel for MockModel {
        fn compute(&self, grid: &AngleGrid) -> Result<ScatteringResult> {
            let mut result = ScatteringResult::new(grid.clone(), self.name());
            result.insert(
                ScatteringQuantity::Unpolarized,
                DVector::from_element(grid.len(), self.value),
            )?;
            Ok(result)
        }

        fn name(&self) -> &str {
            "MockModel"
        }

        fn parameters(&self) -> Vec<(String, String)> {
            vec![("value".to_string(), self.value.to_string())]
        }
    }

    #[test]
    fn test_scenario_creation() {
        let scenario = Scenario::new(Box::new(MockModel { value: 1.0 }), AngleGrid::standard());
        assert_eq!(scenario.get_model_name(), "MockModel");
        assert_eq!(scenario.len(), 1801);
        assert!(format!("{:?}", scenario).contains("MockModel"));
    }

    #[test]
    fn test_scenario_run() {
        let grid = AngleGrid::linspace(0.0, 180.0, 10).unwrap();
        let scenario = Scenario::new(Box::new(MockModel { value: 2.0 }), grid);
        let result = scenario.run().unwrap();
        assert_eq!(result.get(ScatteringQuantity::Unpolarized).unwrap()[9], 2.0);
    }

    #[test]
    fn test_scenario_rejects_non_finite() {
        let grid = AngleGrid::linspace(0.0, 180.0, 10).unwrap();
        let scenario = Scenario::new(Box::new(MockModel { value: f64::NAN }), grid);
        match scenario.run() {
            Err(ScatteringError::NonFinite { quantity, index }) => {
                assert_eq!(quantity, "Unpolarized");
                assert_eq!(index, 0);
            }
            other => panic!("unexpected {:?}", other.map(|r| r.len())),
        }
    }
}
