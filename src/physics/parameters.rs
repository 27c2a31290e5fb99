//! Scattering input parameters
//!
//! [`ScatteringParameters`] groups the scalar inputs shared by every model:
//! wavelength, particle radius, refractive index and, for the Rayleigh intensity
//! model, incident intensity and observer distance.

use num_complex::Complex64;
use std::fmt;

use crate::error::{Result, ScatteringError};
use crate::physics::units::Length;

// =================================================================================================
// Refractive index
// =================================================================================================

/// Complex refractive index n = n' + i·n''
///
/// The imaginary part represents absorption. A purely real index is the common
/// case for the Rayleigh formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractiveIndex {
    value: Complex64,
}

impl RefractiveIndex {
    /// Non-absorbing index
    pub fn real(n: f64) -> Self {
        Self {
            value: Complex64::new(n, 0.0),
        }
    }

    /// Absorbing index n' + i·n''
    pub fn complex(real: f64, imaginary: f64) -> Self {
        Self {
            value: Complex64::new(real, imaginary),
        }
    }

    pub fn value(&self) -> Complex64 {
        self.value
    }

    pub fn re(&self) -> f64 {
        self.value.re
    }

    pub fn im(&self) -> f64 {
        self.value.im
    }

    pub fn is_real(&self) -> bool {
        self.value.im == 0.0
    }

    /// Lorentz-Lorenz factor K = (n² − 1) / (n² + 2)
    pub fn lorentz_lorenz(&self) -> Complex64 {
        let n2 = self.value * self.value;
        (n2 - 1.0) / (n2 + 2.0)
    }
}

impl From<f64> for RefractiveIndex {
    fn from(n: f64) -> Self {
        Self::real(n)
    }
}

impl From<Complex64> for RefractiveIndex {
    fn from(value: Complex64) -> Self {
        Self { value }
    }
}

impl fmt::Display for RefractiveIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_real() {
            write!(f, "{}", self.value.re)
        } else if self.value.im < 0.0 {
            write!(f, "{} - {:e}i", self.value.re, -self.value.im)
        } else {
            write!(f, "{} + {:e}i", self.value.re, self.value.im)
        }
    }
}

// =================================================================================================
// Scattering parameters
// =================================================================================================

/// Physical inputs of a single-particle scattering computation
///
/// # Example
///
/// ```rust
/// use scatter_rs::physics::{Length, RefractiveIndex, ScatteringParameters};
///
/// let params = ScatteringParameters::new(
///     Length::nanometers(650.0),
///     Length::micrometers(0.01),
///     RefractiveIndex::real(1.33257),
/// )
/// .with_incident_intensity(1.0)
/// .with_observer_distance(Length::centimeters(3.0));
///
/// assert!(params.validate_rayleigh().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteringParameters {
    /// Wavelength of the incident light λ
    pub wavelength: Length,

    /// Particle radius r
    pub radius: Length,

    /// Particle refractive index n (or m)
    pub refractive_index: RefractiveIndex,

    /// Incident intensity I₀ \[W/m²\]
    pub incident_intensity: Option<f64>,

    /// Distance between particle and observer d (Rayleigh intensity only)
    pub observer_distance: Option<Length>,
}

impl ScatteringParameters {
    pub fn new(
        wavelength: Length,
        radius: Length,
        refractive_index: impl Into<RefractiveIndex>,
    ) -> Self {
        Self {
            wavelength,
            radius,
            refractive_index: refractive_index.into(),
            incident_intensity: None,
            observer_distance: None,
        }
    }

    // ========================================= Builders ==========================================

    pub fn with_incident_intensity(mut self, intensity: f64) -> Self {
        self.incident_intensity = Some(intensity);
        self
    }

    pub fn with_observer_distance(mut self, distance: Length) -> Self {
        self.observer_distance = Some(distance);
        self
    }

    pub fn with_wavelength(mut self, wavelength: Length) -> Self {
        self.wavelength = wavelength;
        self
    }

    pub fn with_radius(mut self, radius: Length) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_refractive_index(mut self, index: impl Into<RefractiveIndex>) -> Self {
        self.refractive_index = index.into();
        self
    }

    // ========================================== Queries ==========================================

    /// Particle diameter 2r, in the radius unit
    pub fn diameter(&self) -> Length {
        self.radius.scaled(2.0)
    }

    /// Incident intensity, 1 W/m² when not set
    pub fn incident_intensity_or_default(&self) -> f64 {
        self.incident_intensity.unwrap_or(1.0)
    }

    /// Observer distance in meters
    pub fn observer_distance_m(&self) -> Result<f64> {
        self.observer_distance
            .map(|d| d.to_meters())
            .ok_or(ScatteringError::MissingParameter("observer distance"))
    }

    // ======================================== Validation =========================================

    /// Check that every given quantity is finite and in its physical range
    pub fn validate(&self) -> Result<()> {
        positive("wavelength", self.wavelength.to_meters())?;
        positive("radius", self.radius.to_meters())?;

        let n = self.refractive_index.value();
        if !n.re.is_finite() || !n.im.is_finite() {
            return Err(ScatteringError::InvalidParameter {
                name: "refractive index",
                value: n.re,
                reason: "must be finite",
            });
        }

        if let Some(distance) = self.observer_distance {
            positive("observer distance", distance.to_meters())?;
        }

        if let Some(intensity) = self.incident_intensity
            && (!intensity.is_finite() || intensity < 0.0) {
                return Err(ScatteringError::InvalidParameter {
                    name: "incident intensity",
                    value: intensity,
                    reason: "must be finite and non-negative",
                });
            }

        Ok(())
    }

    /// [`validate`](Self::validate) plus the Rayleigh-regime condition r < λ
    ///
    /// Both lengths are converted to meters before they are compared.
    pub fn validate_rayleigh(&self) -> Result<()> {
        self.validate()?;
        crate::physics::rayleigh::check_regime(
            self.radius.to_meters(),
            self.wavelength.to_meters(),
        )
    }

    /// Key/value rows describing the parameters, for plot tables and CSV headers
    pub fn table_rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("λ".to_string(), self.wavelength.to_string()),
            ("Radius of particle (r)".to_string(), self.radius.to_string()),
            ("Ref. Index (n)".to_string(), self.refractive_index.to_string()),
        ];

        if let Some(distance) = self.observer_distance {
            rows.push(("Observer Distance (d)".to_string(), distance.to_string()));
        }
        if let Some(intensity) = self.incident_intensity {
            rows.push(("Incident Intensity I₀".to_string(), format!("{} W/m²", intensity)));
        }

        rows
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ScatteringError::InvalidParameter {
            name,
            value,
            reason: "must be finite and strictly positive",
        });
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn water_droplet() -> ScatteringParameters {
        ScatteringParameters::new(
            Length::nanometers(650.0),
            Length::micrometers(0.01),
            1.33257,
        )
        .with_incident_intensity(1.0)
        .with_observer_distance(Length::centimeters(3.0))
    }

    #[test]
    fn test_lorentz_lorenz_real() {
        let n = RefractiveIndex::real(1.5);
        let k = n.lorentz_lorenz();
        assert!((k.re - 1.25 / 4.25).abs() < 1e-15);
        assert_eq!(k.im, 0.0);
    }

    #[test]
    fn test_lorentz_lorenz_vacuum_is_zero() {
        let k = RefractiveIndex::real(1.0).lorentz_lorenz();
        assert_eq!(k.norm(), 0.0);
    }

    #[test]
    fn test_refractive_index_display() {
        assert_eq!(RefractiveIndex::real(1.33257).to_string(), "1.33257");
        assert_eq!(
            RefractiveIndex::complex(1.33257, 1.67e-8).to_string(),
            "1.33257 + 1.67e-8i"
        );
    }

    #[test]
    fn test_valid_parameters() {
        assert!(water_droplet().validate().is_ok());
        assert!(water_droplet().validate_rayleigh().is_ok());
    }

    #[test]
    fn test_negative_wavelength_rejected() {
        let params = water_droplet().with_wavelength(Length::nanometers(-1.0));
        match params.validate() {
            Err(ScatteringError::InvalidParameter { name, .. }) => assert_eq!(name, "wavelength"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_zero_distance_rejected() {
        let params = water_droplet().with_observer_distance(Length::centimeters(0.0));
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_intensity_rejected() {
        let params = water_droplet().with_incident_intensity(-0.5);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rayleigh_check_converts_units() {
        // 1 μm radius vs 650 nm wavelength: numerically 1 < 650, physically r > λ
        let params = water_droplet().with_radius(Length::micrometers(1.0));
        assert!(params.validate().is_ok());
        assert!(params.validate_rayleigh().unwrap_err().is_domain());
    }

    #[test]
    fn test_missing_distance() {
        let params = ScatteringParameters::new(
            Length::nanometers(650.0),
            Length::nanometers(10.0),
            1.33,
        );
        assert_eq!(
            params.observer_distance_m(),
            Err(ScatteringError::MissingParameter("observer distance"))
        );
    }

    #[test]
    fn test_table_rows() {
        let rows = water_droplet().table_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].1, "650 nm");
        assert_eq!(rows[3].1, "3 cm");

        let no_optional = ScatteringParameters::new(
            Length::nanometers(650.0),
            Length::micrometers(0.01),
            1.33257,
        );
        assert_eq!(no_optional.table_rows().len(), 3);
    }

    #[test]
    fn test_diameter() {
        let d = water_droplet().diameter();
        assert_eq!(d.value(), 0.02);
    }
}
