//! Mie solver traits and types
//!
//! # Design Philosophy
//!
//! The Mie series is delegated to a solver behind a deliberately narrow interface:
//! - `MieConfiguration` carries the numerical options (angular resolution, range, medium)
//! - `MieSolver::scattering_function` turns (m, λ, d) into angular intensities
//! - `ScatteringFunction` holds the angles (radians) and SL, SR, SU
//!
//! Any backend honoring this contract can replace the built-in
//! [`BohrenHuffman`](crate::solver::BohrenHuffman) solver.

use num_complex::Complex64;

use crate::error::{Result, ScatteringError};
use crate::physics::Normalization;

// =================================================================================================
// Mie configuration
// =================================================================================================

/// Numerical options for a Mie scattering function
///
/// # Examples
///
/// ```rust
/// use scatter_rs::solver::MieConfiguration;
///
/// // 0° to 180° every 0.5° (361 angles)
/// let config = MieConfiguration::default();
/// assert_eq!(config.angle_count(), 361);
///
/// let fine = MieConfiguration::default().with_angular_resolution(0.1);
/// assert_eq!(fine.angle_count(), 1801);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MieConfiguration {
    /// Angular step in degrees
    pub angular_resolution_deg: f64,

    /// First angle in degrees
    pub min_angle_deg: f64,

    /// Last angle in degrees
    pub max_angle_deg: f64,

    /// Refractive index of the surrounding medium
    ///
    /// The particle index and the wavelength are divided by it before the series is evaluated.
    pub medium_index: f64,

    /// Normalization applied to SL, SR and SU
    pub normalization: Normalization,
}

impl Default for MieConfiguration {
    fn default() -> Self {
        Self {
            angular_resolution_deg: 0.5,
            min_angle_deg: 0.0,
            max_angle_deg: 180.0,
            medium_index: 1.0,
            normalization: Normalization::None,
        }
    }
}

impl MieConfiguration {
    pub fn with_angular_resolution(mut self, resolution_deg: f64) -> Self {
        self.angular_resolution_deg = resolution_deg;
        self
    }

    pub fn with_angle_range(mut self, min_deg: f64, max_deg: f64) -> Self {
        self.min_angle_deg = min_deg;
        self.max_angle_deg = max_deg;
        self
    }

    pub fn with_medium_index(mut self, medium_index: f64) -> Self {
        self.medium_index = medium_index;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.angular_resolution_deg.is_finite() || self.angular_resolution_deg <= 0.0 {
            return Err(ScatteringError::InvalidConfiguration(format!(
                "angular resolution must be positive (got {})",
                self.angular_resolution_deg
            )));
        }
        if !self.min_angle_deg.is_finite()
            || !self.max_angle_deg.is_finite()
            || self.min_angle_deg < 0.0
            || self.max_angle_deg > 180.0
            || self.max_angle_deg < self.min_angle_deg
        {
            return Err(ScatteringError::InvalidConfiguration(format!(
                "angle range must lie within 0° to 180° (got {} to {})",
                self.min_angle_deg, self.max_angle_deg
            )));
        }
        if !self.medium_index.is_finite() || self.medium_index <= 0.0 {
            return Err(ScatteringError::InvalidConfiguration(format!(
                "medium index must be positive (got {})",
                self.medium_index
            )));
        }
        Ok(())
    }

    /// Angles in degrees, on the same lattice as [`AngleGrid::stepped`](crate::solver::AngleGrid::stepped)
    pub fn angles_deg(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let grid = crate::solver::AngleGrid::stepped(
            self.min_angle_deg,
            self.max_angle_deg,
            self.angular_resolution_deg,
        )?;
        Ok(grid.degrees().iter().copied().collect())
    }

    /// Number of angles the configuration produces (0 when invalid)
    pub fn angle_count(&self) -> usize {
        self.angles_deg().map(|a| a.len()).unwrap_or(0)
    }
}

// =================================================================================================
// Scattering function
// =================================================================================================

/// Angular scattering intensities of one sphere
///
/// - `sl`: |S1|², perpendicular polarization
/// - `sr`: |S2|², parallel polarization
/// - `su`: (SL + SR)/2, unpolarized
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringFunction {
    /// Angles in radians
    pub theta_rad: Vec<f64>,
    pub sl: Vec<f64>,
    pub sr: Vec<f64>,
    pub su: Vec<f64>,
}

impl ScatteringFunction {
    /// Angles converted to degrees, for presentation
    pub fn theta_degrees(&self) -> Vec<f64> {
        self.theta_rad.iter().map(|t| t.to_degrees()).collect()
    }

    pub fn len(&self) -> usize {
        self.theta_rad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta_rad.is_empty()
    }
}

// =================================================================================================
// Mie solver trait
// =================================================================================================

/// Trait for Mie scattering backends
///
/// # Contract
///
/// - `m` is the particle refractive index, `wavelength_nm` the vacuum wavelength and
///   `diameter_nm` the particle diameter (both in nanometers)
/// - the returned angles follow `config.angles_deg()`, converted to radians
/// - every output value is finite; otherwise `ScatteringError::Solver` is returned
pub trait MieSolver: Send + Sync {
    fn scattering_function(
        &self,
        m: Complex64,
        wavelength_nm: f64,
        diameter_nm: f64,
        config: &MieConfiguration,
    ) -> Result<ScatteringFunction>;

    /// Name of the solver
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
