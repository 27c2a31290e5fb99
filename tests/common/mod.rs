//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantSolver, IsotropicModel};
pub use test_helpers::{assert_series_close, relative_error, water_droplet};
