//! Scattering models
//!
//! All models implement the [`ScatteringModel`](crate::physics::ScatteringModel) trait.
//! A model owns its [`ScatteringParameters`](crate::physics::ScatteringParameters), validates
//! them in `compute` and evaluates one formula over an angle grid.
//!
//! # Available Models
//!
//! ## [`RayleighIntensity`]: polarized intensities
//!
//! I∥(θ) and I⊥ at an observer distance d, for particles much smaller than the wavelength.
//!
//! ## [`RayleighAmplitude`]: amplitude functions
//!
//! S1 and S2(θ) = S1·cosθ, with their squared magnitudes.
//!
//! ## [`MieScattering`]: any particle size
//!
//! SL, SR and SU from a [`MieSolver`](crate::solver::MieSolver) backend. Use it when r is
//! comparable to or larger than λ, where the Rayleigh models refuse to evaluate.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod mie;
pub mod rayleigh_amplitude;
pub mod rayleigh_intensity;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use mie::MieScattering;
pub use rayleigh_amplitude::RayleighAmplitude;
pub use rayleigh_intensity::RayleighIntensity;
