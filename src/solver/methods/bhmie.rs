//! Bohren-Huffman Mie solver
//!
//! # Mathematical Background
//!
//! For a homogeneous sphere of relative index m and size parameter x = π·d·n_med/λ, the
//! far-field amplitudes are the series
//!
//! ```text
//! S1(θ) = Σ (2n+1)/(n(n+1)) · (aₙ·πₙ(cosθ) + bₙ·τₙ(cosθ))
//! S2(θ) = Σ (2n+1)/(n(n+1)) · (aₙ·τₙ(cosθ) + bₙ·πₙ(cosθ))
//! ```
//!
//! truncated after n_max = round(2 + x + 4·x^{1/3}) terms.
//!
//! The coefficients use the logarithmic derivative Dₙ(mx) = ψₙ'(mx)/ψₙ(mx):
//!
//! ```text
//! aₙ = ((Dₙ/m + n/x)·ψₙ − ψₙ₋₁) / ((Dₙ/m + n/x)·ξₙ − ξₙ₋₁)
//! bₙ = ((m·Dₙ + n/x)·ψₙ − ψₙ₋₁) / ((m·Dₙ + n/x)·ξₙ − ξₙ₋₁)
//! ```
//!
//! Dₙ is computed by downward recurrence (stable for absorbing spheres), ψₙ and χₙ by upward
//! recurrence with ξₙ = ψₙ − i·χₙ. The angular functions follow
//!
//! ```text
//! π₀ = 0, π₁ = 1, πₙ₊₁ = ((2n+1)·μ·πₙ − (n+1)·πₙ₋₁) / n
//! τₙ = n·μ·πₙ − (n+1)·πₙ₋₁
//! ```
//!
//! # Parallelism
//!
//! Coefficients are computed once; angles are independent and are evaluated with rayon when
//! the grid is larger than [`parallel_threshold()`](crate::solver::parallel_threshold) and the
//! `parallel` feature is enabled.
//!
//! # Reference
//! Bohren & Huffman, *Absorption and Scattering of Light by Small Particles* (1983), §4.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{Result, ScatteringError};
use crate::physics::Normalization;
use crate::solver::{MieConfiguration, MieSolver, ScatteringFunction};

// =================================================================================================
// Bohren-Huffman Solver
// =================================================================================================

/// Mie series solver for homogeneous spheres
///
/// Stateless; one instance can serve any number of evaluations.
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use scatter_rs::solver::{BohrenHuffman, MieConfiguration, MieSolver};
///
/// let solver = BohrenHuffman::new();
/// let sf = solver
///     .scattering_function(
///         Complex64::new(1.33257, 1.67e-8),
///         650.0,
///         2000.0,
///         &MieConfiguration::default(),
///     )
///     .unwrap();
///
/// assert_eq!(sf.len(), 361);
/// assert!((sf.sl[0] - sf.sr[0]).abs() <= 1e-9 * sf.sl[0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BohrenHuffman;

impl BohrenHuffman {
    pub fn new() -> Self {
        Self
    }
}

/// Mie coefficients aₙ, bₙ for n = 1..=n_max (index 0 holds n = 1)
#[derive(Debug, Clone)]
pub(crate) struct MieCoefficients {
    pub(crate) a: Vec<Complex64>,
    pub(crate) b: Vec<Complex64>,
}

/// Number of series terms for size parameter x
pub(crate) fn term_count(x: f64) -> usize {
    (2.0 + x + 4.0 * x.cbrt()).round().max(1.0) as usize
}

pub(crate) fn mie_coefficients(m: Complex64, x: f64) -> MieCoefficients {
    let n_max = term_count(x);
    let mx = m * x;

    // Downward recurrence for Dₙ(mx), started well above n_max
    let n_start = (n_max as f64).max(mx.norm()).round() as usize + 16;
    let mut d = vec![Complex64::new(0.0, 0.0); n_start + 1];
    for n in (2..=n_start).rev() {
        let nf = n as f64 / mx;
        d[n - 1] = nf - 1.0 / (d[n] + nf);
    }

    // ψ₋₁ = cos x, ψ₀ = sin x, χ₋₁ = −sin x, χ₀ = cos x
    let mut psi0 = x.cos();
    let mut psi1 = x.sin();
    let mut chi0 = -x.sin();
    let mut chi1 = x.cos();
    let mut xi1 = Complex64::new(psi1, -chi1);

    let mut a = Vec::with_capacity(n_max);
    let mut b = Vec::with_capacity(n_max);

    for n in 1..=n_max {
        let nf = n as f64;
        let psi = (2.0 * nf - 1.0) / x * psi1 - psi0;
        let chi = (2.0 * nf - 1.0) / x * chi1 - chi0;
        let xi = Complex64::new(psi, -chi);

        let da = d[n] / m + nf / x;
        let db = m * d[n] + nf / x;

        a.push((da * psi - psi1) / (da * xi - xi1));
        b.push((db * psi - psi1) / (db * xi - xi1));

        psi0 = psi1;
        psi1 = psi;
        chi0 = chi1;
        chi1 = chi;
        xi1 = xi;
    }

    MieCoefficients { a, b }
}

/// S1, S2 at μ = cosθ
pub(crate) fn amplitudes(coefficients: &MieCoefficients, mu: f64) -> (Complex64, Complex64) {
    let mut s1 = Complex64::new(0.0, 0.0);
    let mut s2 = Complex64::new(0.0, 0.0);

    let mut pi_prev = 0.0;
    let mut pi = 1.0;

    for (i, (&an, &bn)) in coefficients.a.iter().zip(&coefficients.b).enumerate() {
        let n = (i + 1) as f64;
        let tau = n * mu * pi - (n + 1.0) * pi_prev;
        let weight = (2.0 * n + 1.0) / (n * (n + 1.0));

        s1 += weight * (an * pi + bn * tau);
        s2 += weight * (an * tau + bn * pi);

        let pi_next = ((2.0 * n + 1.0) * mu * pi - (n + 1.0) * pi_prev) / n;
        pi_prev = pi;
        pi = pi_next;
    }

    (s1, s2)
}

/// (|S1|², |S2|²) at every angle, in parallel above `threshold` angles
pub(crate) fn intensities(
    coefficients: &MieCoefficients,
    theta_rad: &[f64],
    threshold: usize,
) -> Vec<(f64, f64)> {
    let intensity_at = |theta: &f64| -> (f64, f64) {
        let (s1, s2) = amplitudes(coefficients, theta.cos());
        (s1.norm_sqr(), s2.norm_sqr())
    };

    if theta_rad.len() > threshold {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            theta_rad.par_iter().map(intensity_at).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            theta_rad.iter().map(intensity_at).collect()
        }
    } else {
        theta_rad.iter().map(intensity_at).collect()
    }
}

impl MieSolver for BohrenHuffman {
    fn scattering_function(
        &self,
        m: Complex64,
        wavelength_nm: f64,
        diameter_nm: f64,
        config: &MieConfiguration,
    ) -> Result<ScatteringFunction> {
        config.validate()?;
        check_input("wavelength", wavelength_nm)?;
        check_input("diameter", diameter_nm)?;
        if !m.re.is_finite() || !m.im.is_finite() || m.norm() == 0.0 {
            return Err(ScatteringError::InvalidParameter {
                name: "refractive index",
                value: m.re,
                reason: "must be finite and non-zero",
            });
        }

        let m = m / config.medium_index;
        let wavelength = wavelength_nm / config.medium_index;
        let x = PI * diameter_nm / wavelength;

        let coefficients = mie_coefficients(m, x);
        let theta_rad: Vec<f64> = config
            .angles_deg()?
            .into_iter()
            .map(f64::to_radians)
            .collect();

        let pairs = intensities(&coefficients, &theta_rad, crate::solver::parallel_threshold());

        let (mut sl, mut sr): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let mut su: Vec<f64> = sl.iter().zip(&sr).map(|(l, r)| 0.5 * (l + r)).collect();

        normalize(config.normalization, &theta_rad, &mut sl, &mut sr, &mut su);

        for (name, series) in [("SL", &sl), ("SR", &sr), ("SU", &su)] {
            if let Some(index) = series.iter().position(|v| !v.is_finite()) {
                return Err(ScatteringError::Solver(format!(
                    "{} is not finite at angle index {} (x = {})",
                    name, index, x
                )));
            }
        }

        Ok(ScatteringFunction {
            theta_rad,
            sl,
            sr,
            su,
        })
    }

    fn name(&self) -> &str {
        "Bohren-Huffman"
    }
}

fn check_input(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ScatteringError::InvalidParameter {
            name,
            value,
            reason: "must be finite and strictly positive",
        });
    }
    Ok(())
}

/// `Max` divides each series by its own peak; `Total` divides each by its own trapezoidal
/// integral over θ.
fn normalize(
    normalization: Normalization,
    theta: &[f64],
    sl: &mut [f64],
    sr: &mut [f64],
    su: &mut [f64],
) {
    match normalization {
        Normalization::None => {}
        Normalization::Max => {
            for series in [sl, sr, su] {
                let peak = series.iter().copied().fold(0.0, f64::max);
                if peak > 0.0 {
                    series.iter_mut().for_each(|v| *v /= peak);
                }
            }
        }
        Normalization::Total => {
            for series in [sl, sr, su] {
                let area: f64 = theta
                    .windows(2)
                    .zip(series.windows(2))
                    .map(|(t, s)| 0.5 * (t[1] - t[0]) * (s[0] + s[1]))
                    .sum();
                if area > 0.0 {
                    series.iter_mut().for_each(|v| *v /= area);
                }
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
