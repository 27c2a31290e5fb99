//! Visualization module for scattering results
//!
//! This module renders results to static images using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`, `AxisScale`, `PanelLayout`)
//! - **table**: Parameter table drawn inside a panel (`ParameterTable`)
//! - **panel**: Curves and single-panel drawing on an explicit `DrawingArea`
//! - **intensity**: Polarized intensities, amplitudes, arbitrary quantities
//! - **sweep**: One curve per swept value
//! - **mie**: 2×2 Mie component grid
//!
//! Every figure is drawn on a drawing area the caller (or the `plot_*` function) owns;
//! the `draw_*` functions can be composed onto any plotters backend.
//!
//! # When to Use Which Function
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Rayleigh I∥ and I⊥ | `intensity` | `plot_polarized_intensity` |
//! | Rayleigh \|S1\|², \|S2\|² | `intensity` | `plot_amplitudes` |
//! | Chosen quantities of one result | `intensity` | `plot_quantities` |
//! | Compare radii, wavelengths, distances | `sweep` | `plot_sweep` |
//! | Mie SR, SL, SU | `mie` | `plot_mie_components` |
//!
//! Paths ending in `.svg` are written with the SVG backend, anything else as a bitmap.

pub mod config;
pub mod intensity;
pub mod mie;
pub mod panel;
pub mod sweep;
pub mod table;

pub use config::{AxisScale, IntoOptionalTitle, NO_TITLE, PanelLayout, PlotConfig};
pub use intensity::{plot_amplitudes, plot_polarized_intensity, plot_quantities};
pub use mie::{draw_mie_components, plot_mie_components};
pub use panel::{Curve, PanelLabels, draw_panel};
pub use sweep::{plot_sweep, sweep_table};
pub use table::ParameterTable;
