//! Output module for scattering results
//!
//! This module provides tools to output results in various formats:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV and XLSX tables for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── config.rs, table.rs, panel.rs
//! │   └── intensity.rs, sweep.rs, mie.rs
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait, TableLayout
//!     ├── csv.rs
//!     └── xlsx.rs
//! ```
//!
//! # Quick Start
//!
//! ## Visualization
//!
//! ```rust,ignore
//! use scatter_rs::output::visualization::{plot_polarized_intensity, ParameterTable};
//!
//! plot_polarized_intensity(&result, Some(&ParameterTable::from_parameters(&params)), "rayleigh.png", None)?;
//! ```
//!
//! ## Export
//!
//! ```rust,ignore
//! use scatter_rs::output::export::{Exporter, TableLayout, XlsxExporter};
//!
//! XlsxExporter::default().export_sweep(&sweep, &TableLayout::distance_sheet(), path)?;
//! ```
//!
//! Both sub-modules consume [`ScatteringResult`](crate::physics::ScatteringResult) and
//! [`SweepResult`](crate::solver::SweepResult); no computation happens here.

pub mod export;
pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{
    ParameterTable, PlotConfig, plot_amplitudes, plot_mie_components, plot_polarized_intensity,
    plot_quantities, plot_sweep,
};

pub use export::{CsvConfig, CsvExporter, ExportError, Exporter, TableLayout, XlsxExporter};
