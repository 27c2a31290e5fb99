//! Scattering model traits and types
//!
//! This module defines the core API shared by every scattering model:
//! - `ScatteringModel`: trait for all models (Rayleigh, Mie, ...)
//! - `ScatteringResult`: angle grid plus named series
//! - `ScatteringQuantity`: type-safe series identifiers

use nalgebra::DVector;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, ScatteringError};
use crate::solver::grid::AngleGrid;

// =================================================================================================
// Scattering quantities (Type-safe Identifiers)
// =================================================================================================

/// Known scattering quantities
///
/// Use `Custom` for derived series that have no dedicated variant.
///
/// # Example
/// ```
/// use scatter_rs::physics::ScatteringQuantity;
///
/// let ratio = ScatteringQuantity::Custom("Depolarization");
/// assert_eq!(ratio.to_string(), "Depolarization");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatteringQuantity {
    /// Parallel (horizontal) intensity; SR for Mie
    Parallel,

    /// Perpendicular (vertical) intensity; SL for Mie
    Perpendicular,

    /// Mean of the two polarizations; SU for Mie
    Unpolarized,

    /// Real part of the amplitude S1
    S1,

    /// Real part of the amplitude S2
    S2,

    /// |S1|²
    S1Squared,

    /// |S2|²
    S2Squared,

    /// Named quantity without a dedicated variant
    Custom(&'static str),
}

impl fmt::Display for ScatteringQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScatteringQuantity::Parallel => "Parallel",
            ScatteringQuantity::Perpendicular => "Perpendicular",
            ScatteringQuantity::Unpolarized => "Unpolarized",
            ScatteringQuantity::S1 => "S1",
            ScatteringQuantity::S2 => "S2",
            ScatteringQuantity::S1Squared => "|S1|²",
            ScatteringQuantity::S2Squared => "|S2|²",
            ScatteringQuantity::Custom(name) => name,
        };
        f.write_str(label)
    }
}

/// Series normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Raw values
    #[default]
    None,

    /// Each series divided by its own maximum
    Max,

    /// Each series divided by its trapezoidal integral over θ (radians)
    Total,
}

// =================================================================================================
// Scattering Result
// =================================================================================================

/// Output of one model evaluation
///
/// Series keep their insertion order, which is the order models document and plots use
/// for legends. Every series has the grid's length.
#[derive(Debug, Clone)]
pub struct ScatteringResult {
    grid: AngleGrid,
    series: Vec<(ScatteringQuantity, DVector<f64>)>,
    metadata: HashMap<String, f64>,
    model_name: String,
}

impl ScatteringResult {
    /// Create an empty result over a grid
    pub fn new(grid: AngleGrid, model_name: impl Into<String>) -> Self {
        Self {
            grid,
            series: Vec::new(),
            metadata: HashMap::new(),
            model_name: model_name.into(),
        }
    }

    /// Add or replace a series
    ///
    /// The series must match the grid's length.
    pub fn insert(&mut self, quantity: ScatteringQuantity, values: DVector<f64>) -> Result<()> {
        if values.len() != self.grid.len() {
            return Err(ScatteringError::InvalidGrid(format!(
                "series {} has {} values for {} angles",
                quantity,
                values.len(),
                self.grid.len()
            )));
        }

        match self.series.iter_mut().find(|(q, _)| *q == quantity) {
            Some((_, existing)) => *existing = values,
            None => self.series.push((quantity, values)),
        }
        Ok(())
    }

    /// Get a series by quantity
    pub fn get(&self, quantity: ScatteringQuantity) -> Option<&DVector<f64>> {
        self.series
            .iter()
            .find(|(q, _)| *q == quantity)
            .map(|(_, values)| values)
    }

    /// Quantities in insertion order
    pub fn quantities(&self) -> Vec<ScatteringQuantity> {
        self.series.iter().map(|(q, _)| *q).collect()
    }

    /// All series in insertion order
    pub fn series(&self) -> &[(ScatteringQuantity, DVector<f64>)] {
        &self.series
    }

    pub fn grid(&self) -> &AngleGrid {
        &self.grid
    }

    /// Angles in degrees
    pub fn angles(&self) -> &DVector<f64> {
        self.grid.degrees()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Get a metadata
    pub fn get_metadata(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).copied()
    }

    /// Set a metadata
    pub fn set_metadata(&mut self, key: impl Into<String>, value: f64) {
        self.metadata.insert(key.into(), value);
    }

    /// First (quantity, angle index) holding NaN or infinity
    pub fn first_non_finite(&self) -> Option<(ScatteringQuantity, usize)> {
        self.series.iter().find_map(|(quantity, values)| {
            values
                .iter()
                .position(|v| !v.is_finite())
                .map(|index| (*quantity, index))
        })
    }

    /// Copy with every series multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        self.clone() * factor
    }

    /// Copy with each series normalized independently
    ///
    /// Series whose normalizer is zero are left unchanged.
    pub fn normalized(&self, normalization: Normalization) -> Self {
        let mut result = self.clone();
        let radians = self.grid.radians();

        for (_, values) in result.series.iter_mut() {
            let norm = match normalization {
                Normalization::None => continue,
                Normalization::Max => values.max(),
                Normalization::Total => trapezoid(&radians, values),
            };
            if norm != 0.0 && norm.is_finite() {
                *values /= norm;
            }
        }
        result
    }
}

// Operator overloading for numerical operations

impl std::ops::Mul<f64> for ScatteringResult {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        for (_, data) in self.series.iter_mut() {
            *data *= scalar;
        }
        self
    }
}

/// Trapezoidal integral of `y` over `x`
pub(crate) fn trapezoid(x: &DVector<f64>, y: &DVector<f64>) -> f64 {
    x.as_slice()
        .windows(2)
        .zip(y.as_slice().windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}

// ==================================================================================================
// Scattering Model Trait
// =================================================================================================

/// Trait for scattering models
///
/// # Responsibility
/// Evaluates one scattering formula (or delegates to a solver) over an angle grid.
/// Validation of the physical parameters happens inside `compute`, before any value is
/// produced, so a failing model never returns a partial result.
///
/// # Mandatory Point
/// All scattering models MUST implement this trait.
pub trait ScatteringModel: Send + Sync {
    /// Evaluate the model over `grid`
    ///
    /// Models driven by an external solver may substitute the solver's own grid;
    /// the returned result always carries the grid actually used.
    fn compute(&self, grid: &AngleGrid) -> Result<ScatteringResult>;

    /// Name of the model (used to display and reporting)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Key/value rows describing the inputs, for plot tables and file headers
    fn parameters(&self) -> Vec<(String, String)>;
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScatteringResult {
        let grid = AngleGrid::from_degrees(vec![0.0, 90.0, 180.0]).unwrap();
        let mut result = ScatteringResult::new(grid, "sample");
        result
            .insert(
                ScatteringQuantity::Parallel,
                DVector::from_row_slice(&[2.0, 0.0, 2.0]),
            )
            .unwrap();
        result
            .insert(
                ScatteringQuantity::Perpendicular,
                DVector::from_row_slice(&[2.0, 2.0, 2.0]),
            )
            .unwrap();
        result
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let result = sample();
        assert_eq!(
            result.quantities(),
            vec![ScatteringQuantity::Parallel, ScatteringQuantity::Perpendicular]
        );
        assert_eq!(result.model_name(), "sample");
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut result = sample();
        result
            .insert(
                ScatteringQuantity::Parallel,
                DVector::from_row_slice(&[1.0, 1.0, 1.0]),
            )
            .unwrap();
        assert_eq!(result.quantities().len(), 2);
        assert_eq!(result.get(ScatteringQuantity::Parallel).unwrap()[1], 1.0);
    }

    #[test]
    fn test_insert_rejects_wrong_length() {
        let mut result = sample();
        let err = result
            .insert(ScatteringQuantity::S1, DVector::from_row_slice(&[1.0]))
            .unwrap_err();
        assert!(matches!(err, ScatteringError::InvalidGrid(_)));
    }

    #[test]
    fn test_metadata() {
        let mut result = sample();
        result.set_metadata("size_parameter", 9.7);
        assert_eq!(result.get_metadata("size_parameter"), Some(9.7));
        assert_eq!(result.get_metadata("missing"), None);
    }

    #[test]
    fn test_scaled() {
        let result = sample().scaled(3.0);
        assert_eq!(result.get(ScatteringQuantity::Perpendicular).unwrap()[0], 6.0);
        assert_eq!(result.get(ScatteringQuantity::Parallel).unwrap()[1], 0.0);
    }

    #[test]
    fn test_normalized_max() {
        let result = sample().normalized(Normalization::Max);
        assert_eq!(result.get(ScatteringQuantity::Parallel).unwrap().max(), 1.0);
        assert_eq!(result.get(ScatteringQuantity::Perpendicular).unwrap()[1], 1.0);
    }

    #[test]
    fn test_normalized_total_integrates_to_one() {
        let result = sample().normalized(Normalization::Total);
        let radians = result.grid().radians();
        let area = trapezoid(&radians, result.get(ScatteringQuantity::Perpendicular).unwrap());
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_non_finite() {
        let mut result = sample();
        assert_eq!(result.first_non_finite(), None);
        result
            .insert(
                ScatteringQuantity::S1,
                DVector::from_row_slice(&[0.0, f64::NAN, 0.0]),
            )
            .unwrap();
        assert_eq!(result.first_non_finite(), Some((ScatteringQuantity::S1, 1)));
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(ScatteringQuantity::S1Squared.to_string(), "|S1|²");
        assert_eq!(ScatteringQuantity::Parallel.to_string(), "Parallel");
    }
}
