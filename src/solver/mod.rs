//! Evaluation layer
//!
//! This module turns models into results: it owns the angle grid, the scenario
//! (model + grid), parameter sweeps and the Mie solver interface.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to evaluate
//!    - Scattering model (Rayleigh formula or Mie adapter)
//!    - Angle grid
//!
//! 2. **Sweep** (`ParameterSweep`) - the same model family over many parameter values
//!    - One swept parameter (wavelength, radius or observer distance)
//!    - Independent iterations, order-preserving results
//!
//! 3. **Mie solver** (`MieSolver` trait) - HOW the Mie series is computed
//!    - Narrow interface: (m, λ, d, configuration) → angles + SL, SR, SU
//!    - Default backend: [`BohrenHuffman`]
//!
//! # Module Organization
//!
//! - **`grid`**: `AngleGrid` (stepped, linspace, from radians)
//! - **`traits`**: `MieSolver`, `MieConfiguration`, `ScatteringFunction`
//! - **`scenario`**: `Scenario`
//! - **`sweep`**: `ParameterSweep`, `SweepParameter`, `SweepResult`
//! - **`methods`**: Mie solver implementations
//!
//! # Quick Start Example
//!
//! ```rust
//! use scatter_rs::models::RayleighIntensity;
//! use scatter_rs::physics::{Length, ScatteringParameters, ScatteringQuantity};
//! use scatter_rs::solver::{AngleGrid, Scenario};
//!
//! let params = ScatteringParameters::new(
//!     Length::nanometers(650.0),
//!     Length::micrometers(0.01),
//!     1.33257,
//! )
//! .with_incident_intensity(1.0)
//! .with_observer_distance(Length::centimeters(3.0));
//!
//! let scenario = Scenario::new(
//!     Box::new(RayleighIntensity::new(params)),
//!     AngleGrid::linspace(0.0, 180.0, 1000).unwrap(),
//! );
//!
//! let result = scenario.run().unwrap();
//! let parallel = result.get(ScatteringQuantity::Parallel).unwrap();
//! assert_eq!(parallel.len(), 1000);
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────────────┐
//! │ ScatteringParameters │  (λ, r, n, I₀, d)
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐     ┌──────────────┐
//! │ Scattering Model     │◄────│ MieSolver    │ (Mie only)
//! └──────────┬───────────┘     └──────────────┘
//!            │
//! ┌──────────▼───────────┐
//! │ Scenario / Sweep     │ ← model + AngleGrid
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │ ScatteringResult     │ → export (CSV/XLSX), plots
//! └──────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Every operation returns [`crate::error::Result`]. Common errors:
//! - Rayleigh regime violated (r ≥ λ)
//! - Invalid grid (empty, non-finite, descending)
//! - Invalid Mie configuration (non-positive resolution, angles outside 0°–180°)
//! - Non-finite values in a result

// =================================================================================================
// Module Declarations
// =================================================================================================
pub mod grid;
pub mod methods;
mod scenario;
pub mod sweep;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Mie intensities are evaluated angle by angle; angle sets larger than this go to the
// rayon pool. Stored in an AtomicUsize so benches and tests can change it at runtime.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of angles above which Mie evaluation runs in parallel
///
/// The default 0.5° grid (361 angles) stays sequential; the 0.1° grid (1801 angles) does not.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Has an effect only when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use scatter_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use scatter_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that sets the threshold and restores the previous value on drop.
///
/// Only compiled in test builds.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use grid::AngleGrid;
pub use methods::BohrenHuffman;
pub use scenario::Scenario;
pub use sweep::{ParameterSweep, SweepEntry, SweepParameter, SweepResult};
pub use traits::{MieConfiguration, MieSolver, ScatteringFunction};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{Result, ScatteringError};
use crate::physics::ScatteringResult;

/// Reject results holding NaN or Inf
///
/// NaN or Inf in a closed-form result means an input slipped past validation (overflowing
/// r⁶, a vanishing n² + 2); in a Mie result it means the series broke down.
pub(crate) fn validate_result(result: &ScatteringResult) -> Result<()> {
    match result.first_non_finite() {
        Some((quantity, index)) => Err(ScatteringError::NonFinite {
            quantity: quantity.to_string(),
            index,
        }),
        None => Ok(()),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_set_threshold_and_guard_restore() {
        let before = parallel_threshold();
        {
            let _guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
        }
        assert_eq!(parallel_threshold(), before);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_validate_result() {
        use crate::physics::ScatteringQuantity;
        use nalgebra::DVector;

        let grid = AngleGrid::linspace(0.0, 180.0, 3).unwrap();
        let mut result = ScatteringResult::new(grid, "test");
        result
            .insert(
                ScatteringQuantity::S2,
                DVector::from_row_slice(&[1.0, 2.0, f64::INFINITY]),
            )
            .unwrap();

        assert_eq!(
            validate_result(&result),
            Err(ScatteringError::NonFinite {
                quantity: "S2".to_string(),
                index: 2
            })
        );
    }
}
