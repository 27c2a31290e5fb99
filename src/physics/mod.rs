//! Physical models
//!
//! This module provides the inputs, formulas and traits of single-particle light scattering.
//!
//! # Core Concepts
//!
//! - **Scattering Parameters**: wavelength, particle radius, refractive index and, for the
//!   Rayleigh intensity, incident intensity and observer distance
//! - **Scattering Model**: evaluates one formula over an angle grid
//! - **Scattering Result**: the grid plus named series (`ScatteringQuantity`)
//!
//! # Architecture
//!
//! Formulas are **separate from models**:
//! - [`rayleigh`] holds pure functions of the parameters and one angle
//! - models in [`crate::models`] evaluate them over an [`AngleGrid`](crate::solver::AngleGrid)
//!
//! # Example
//!
//! ```rust
//! use scatter_rs::physics::{rayleigh, Length, ScatteringParameters};
//!
//! let params = ScatteringParameters::new(
//!     Length::nanometers(650.0),
//!     Length::micrometers(0.01),
//!     1.33257,
//! )
//! .with_observer_distance(Length::centimeters(3.0));
//!
//! let i = rayleigh::intensity_at(&params, 0.0).unwrap();
//! assert_eq!(i.parallel, i.perpendicular);
//! ```
//!
//! # Implementing a New Scattering Model
//!
//! ```rust
//! use nalgebra::DVector;
//! use scatter_rs::error::Result;
//! use scatter_rs::physics::{ScatteringModel, ScatteringQuantity, ScatteringResult};
//! use scatter_rs::solver::AngleGrid;
//!
//! struct Isotropic;
//!
//! impl ScatteringModel for Isotropic {
//!     fn compute(&self, grid: &AngleGrid) -> Result<ScatteringResult> {
//!         let mut result = ScatteringResult::new(grid.clone(), self.name());
//!         result.insert(
//!             ScatteringQuantity::Unpolarized,
//!             DVector::from_element(grid.len(), 1.0),
//!         )?;
//!         Ok(result)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Isotropic"
//!     }
//!
//!     fn parameters(&self) -> Vec<(String, String)> {
//!         Vec::new()
//!     }
//! }
//! ```

pub mod parameters;
pub mod rayleigh;
pub mod traits;
pub mod units;

pub use parameters::{RefractiveIndex, ScatteringParameters};
pub use rayleigh::PolarizedIntensity;
pub use traits::{Normalization, ScatteringModel, ScatteringQuantity, ScatteringResult};
pub use units::{Length, LengthUnit};
