//! Mie solver implementations
//!
//! This module contains concrete implementations of the [`MieSolver`](crate::solver::MieSolver) trait.
//!
//! # Architecture
//!
//! The separation between the abstract interface (`solver::traits`) and concrete backends
//! (`solver::methods`) keeps presentation code independent of the series algorithm: a new
//! backend plugs into [`MieScattering`](crate::models::MieScattering) without touching exports
//! or plots.
//!
//! # Available Methods
//!
//! - **[`BohrenHuffman`]**: homogeneous sphere, Bohren-Huffman series
//!   - Terms: n_max = round(2 + x + 4·x^{1/3})
//!   - Cost: O(n_max) per angle after a single coefficient pass
//!   - Use: any size parameter up to a few thousand
//!
//! # Example
//!
//! ```rust
//! use num_complex::Complex64;
//! use scatter_rs::solver::{BohrenHuffman, MieConfiguration, MieSolver};
//!
//! let sf = BohrenHuffman::new()
//!     .scattering_function(Complex64::new(1.5, 0.0), 532.0, 500.0, &MieConfiguration::default())
//!     .unwrap();
//!
//! let degrees = sf.theta_degrees();
//! assert_eq!(degrees[0], 0.0);
//! assert_eq!(degrees[degrees.len() - 1], 180.0);
//! ```

pub mod bhmie;

// Re-exports for convenience
pub use bhmie::BohrenHuffman;
