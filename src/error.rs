//! Error types for scattering computations
//!
//! A single enum covers every failure of the physics, model and solver layers.
//! Export has its own error type in [`crate::output::export::ExportError`].

use thiserror::Error;

/// Errors raised while validating parameters or evaluating a scattering model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScatteringError {
    /// Rayleigh approximation invalid: the particle radius is not smaller than the wavelength
    #[error(
        "Rayleigh scattering condition not satisfied: particle radius r = {radius_m:e} m \
         must be smaller than wavelength λ = {wavelength_m:e} m"
    )]
    Domain { radius_m: f64, wavelength_m: f64 },

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid angle grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Non-finite value in {quantity} at angle index {index}")]
    NonFinite { quantity: String, index: usize },

    #[error("Mie solver failure: {0}")]
    Solver(String),
}

pub type Result<T> = std::result::Result<T, ScatteringError>;

impl ScatteringError {
    /// True when the error is the Rayleigh-regime domain violation
    pub fn is_domain(&self) -> bool {
        matches!(self, ScatteringError::Domain { .. })
    }
}
