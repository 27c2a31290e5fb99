//! Closed-form Rayleigh scattering formulas
//!
//! Valid when the particle radius is small compared to the wavelength. Every function here
//! is pure: it validates its inputs, converts them to SI meters and evaluates the formula.
//!
//! # Formulas
//!
//! With K = (n² − 1)/(n² + 2) the Lorentz-Lorenz factor:
//!
//! - Perpendicular intensity: $I_\perp = I_0 \frac{16\pi^4 r^6}{\lambda^4 d^2} |K|^2$
//! - Parallel intensity: $I_\parallel(\theta) = I_\perp \cos^2\theta$
//! - Amplitudes: $S_1 = (2\pi r/\lambda)^2 K$, $S_2(\theta) = S_1 \cos\theta$
//!
//! Angles are in degrees; any real value is accepted (the cosine makes them periodic mod 360°).

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{Result, ScatteringError};
use crate::physics::parameters::ScatteringParameters;

/// Intensity pair at one scattering angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarizedIntensity {
    pub parallel: f64,
    pub perpendicular: f64,
}

/// Reject radii that are not strictly smaller than the wavelength (both in meters)
pub fn check_regime(radius_m: f64, wavelength_m: f64) -> Result<()> {
    if radius_m < wavelength_m {
        Ok(())
    } else {
        Err(ScatteringError::Domain {
            radius_m,
            wavelength_m,
        })
    }
}

/// Perpendicular (vertical) intensity I⊥, independent of the scattering angle
///
/// Requires an observer distance; the incident intensity defaults to 1 W/m².
pub fn perpendicular_intensity(params: &ScatteringParameters) -> Result<f64> {
    params.validate_rayleigh()?;

    let r = params.radius.to_meters();
    let lambda = params.wavelength.to_meters();
    let d = params.observer_distance_m()?;
    let i0 = params.incident_intensity_or_default();
    let polarizability = params.refractive_index.lorentz_lorenz().norm_sqr();

    let geometry = 16.0 * PI.powi(4) * r.powi(6) / (lambda.powi(4) * d * d);

    Ok(i0 * geometry * polarizability)
}

/// Parallel (horizontal) intensity I∥(θ) = I⊥·cos²θ
pub fn parallel_intensity(params: &ScatteringParameters, theta_deg: f64) -> Result<f64> {
    let perpendicular = perpendicular_intensity(params)?;
    Ok(parallel_from_perpendicular(perpendicular, theta_deg))
}

/// Both intensity components at one angle
pub fn intensity_at(params: &ScatteringParameters, theta_deg: f64) -> Result<PolarizedIntensity> {
    let perpendicular = perpendicular_intensity(params)?;
    Ok(PolarizedIntensity {
        parallel: parallel_from_perpendicular(perpendicular, theta_deg),
        perpendicular,
    })
}

#[inline]
pub(crate) fn parallel_from_perpendicular(perpendicular: f64, theta_deg: f64) -> f64 {
    let c = theta_deg.to_radians().cos();
    perpendicular * (c * c)
}

/// Unnormalized amplitude S1 = (2πr/λ)²·K, independent of the angle
///
/// Real-valued for a real refractive index.
pub fn amplitude_s1(params: &ScatteringParameters) -> Result<Complex64> {
    params.validate_rayleigh()?;

    let r = params.radius.to_meters();
    let lambda = params.wavelength.to_meters();
    let size = 2.0 * PI * r / lambda;

    Ok(params.refractive_index.lorentz_lorenz() * (size * size))
}

/// Amplitude pair (S1, S2(θ)) with S2 = S1·cosθ
pub fn amplitude_at(params: &ScatteringParameters, theta_deg: f64) -> Result<(Complex64, Complex64)> {
    let s1 = amplitude_s1(params)?;
    Ok((s1, s1 * theta_deg.to_radians().cos()))
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::units::Length;

    fn params() -> ScatteringParameters {
        ScatteringParameters::new(
            Length::nanometers(650.0),
            Length::micrometers(0.01),
            1.33257,
        )
        .with_incident_intensity(1.0)
        .with_observer_distance(Length::centimeters(3.0))
    }

    #[test]
    fn test_check_regime_boundary() {
        assert!(check_regime(1e-9, 2e-9).is_ok());
        assert!(check_regime(2e-9, 2e-9).unwrap_err().is_domain());
        assert!(check_regime(3e-9, 2e-9).unwrap_err().is_domain());
    }

    #[test]
    fn test_perpendicular_matches_hand_computation() {
        let r: f64 = 1e-8;
        let lambda: f64 = 6.5e-7;
        let d: f64 = 0.03;
        let n: f64 = 1.33257;
        let k = (n * n - 1.0) / (n * n + 2.0);
        let expected = 16.0 * PI.powi(4) * r.powi(6) / (lambda.powi(4) * d * d) * k * k;

        let computed = perpendicular_intensity(&params()).unwrap();
        assert!(((computed - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_zero_at_right_angle() {
        let i = intensity_at(&params(), 90.0).unwrap();
        assert!(i.parallel.abs() < 1e-30 * i.perpendicular.max(1.0));
        assert!(i.parallel / i.perpendicular < 1e-30);
    }

    #[test]
    fn test_parallel_equals_perpendicular_forward_and_backward() {
        let forward = intensity_at(&params(), 0.0).unwrap();
        assert_eq!(forward.parallel, forward.perpendicular);

        let backward = intensity_at(&params(), 180.0).unwrap();
        assert!(((backward.parallel - backward.perpendicular) / backward.perpendicular).abs() < 1e-15);
    }

    #[test]
    fn test_angle_periodicity() {
        let a = parallel_intensity(&params(), 30.0).unwrap();
        let b = parallel_intensity(&params(), 390.0).unwrap();
        let c = parallel_intensity(&params(), -30.0).unwrap();
        assert!(((a - b) / a).abs() < 1e-12);
        assert!(((a - c) / a).abs() < 1e-12);
    }

    #[test]
    fn test_missing_distance_is_reported() {
        let mut p = params();
        p.observer_distance = None;
        assert_eq!(
            perpendicular_intensity(&p),
            Err(ScatteringError::MissingParameter("observer distance"))
        );
    }

    #[test]
    fn test_domain_error_on_large_radius() {
        let p = params().with_radius(Length::nanometers(650.0));
        assert!(perpendicular_intensity(&p).unwrap_err().is_domain());
        assert!(amplitude_s1(&p).unwrap_err().is_domain());
    }

    #[test]
    fn test_amplitude_real_for_real_index() {
        let (s1, s2) = amplitude_at(&params(), 60.0).unwrap();
        assert_eq!(s1.im, 0.0);
        assert_eq!(s2, s1 * 60.0_f64.to_radians().cos());
        assert!((s2.re - 0.5 * s1.re).abs() < 1e-15 * s1.re.abs());
    }

    #[test]
    fn test_amplitude_complex_index() {
        let p = params().with_refractive_index(Complex64::new(1.5, 0.1));
        let s1 = amplitude_s1(&p).unwrap();
        assert!(s1.im != 0.0);
    }
}
