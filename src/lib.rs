//! scatter-rs: Light Scattering by a Single Sphere
//!
//! Computes electromagnetic scattering intensities and amplitudes of one spherical particle
//! as a function of scattering angle, then tabulates (CSV, XLSX) or plots (PNG, SVG) them.
//!
//! # Architecture
//!
//! scatter-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Evaluation**
//!    - Models define formulas (what to compute): Rayleigh intensity, Rayleigh amplitudes, Mie
//!    - The solver layer evaluates them (how): angle grids, scenarios, sweeps, Mie backends
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design (`ScatteringModel`, `MieSolver`, `Exporter`)
//!    - Lengths carry their unit, so r < λ is checked in meters whatever the input units
//!    - Every failure is a typed error; no partial output is written
//!
//! # Quick Start
//!
//! ```rust
//! use scatter_rs::prelude::*;
//!
//! # fn main() -> Result<(), ScatteringError> {
//! // 1. Physical parameters
//! let params = ScatteringParameters::new(
//!     Length::nanometers(650.0),
//!     Length::micrometers(0.01),
//!     1.33257,
//! )
//! .with_incident_intensity(1.0)
//! .with_observer_distance(Length::centimeters(3.0));
//!
//! // 2. Model and angle grid (0° to 180°, 0.1° steps)
//! let scenario = Scenario::new(Box::new(RayleighIntensity::new(params)), AngleGrid::standard());
//!
//! // 3. Evaluate
//! let result = scenario.run()?;
//!
//! // 4. Access results
//! let parallel = result.get(ScatteringQuantity::Parallel).unwrap();
//! let perpendicular = result.get(ScatteringQuantity::Perpendicular).unwrap();
//! assert_eq!(parallel.len(), 1801);
//! assert!((parallel[0] - perpendicular[0]).abs() <= 1e-12 * perpendicular[0]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Units, parameters, Rayleigh formulas, result container
//! - [`models`]: Scattering models
//! - [`solver`]: Angle grids, scenarios, sweeps, Mie solvers
//! - [`output`]: Export (CSV, XLSX) and visualization (plotters)
//! - [`error`]: Error types
//!
//! # Features
//!
//! - `parallel` (default): evaluate sweeps and large Mie angle sets on the rayon pool

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use scatter_rs::prelude::*;
    //! ```
    pub use crate::error::ScatteringError;
    pub use crate::models::{MieScattering, RayleighAmplitude, RayleighIntensity};
    pub use crate::physics::{
        Length, LengthUnit, Normalization, RefractiveIndex, ScatteringModel, ScatteringParameters,
        ScatteringQuantity, ScatteringResult,
    };
    pub use crate::solver::{
        AngleGrid, BohrenHuffman, MieConfiguration, MieSolver, ParameterSweep, Scenario,
        SweepParameter, SweepResult,
    };
}
