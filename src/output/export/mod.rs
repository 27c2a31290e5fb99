//! Export module for scattering results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module; the column layout
//! of a table is described once by a [`TableLayout`] and shared by every format.
//!
//! # Available formats
//!
//! | Format  | Module     | Sweep output                       |
//! |---------|------------|------------------------------------|
//! | CSV     | [`csv`]    | one file per swept value           |
//! | XLSX    | [`xlsx`]   | one worksheet per swept value      |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use scatter_rs::models::RayleighAmplitude;
//! use scatter_rs::output::export::{CsvExporter, Exporter, TableLayout};
//! use scatter_rs::physics::{Length, ScatteringModel, ScatteringParameters};
//! use scatter_rs::solver::AngleGrid;
//!
//! let model = RayleighAmplitude::new(ScatteringParameters::new(
//!     Length::nanometers(650.0),
//!     Length::micrometers(0.01),
//!     1.33257,
//! ));
//! let result = model.compute(&AngleGrid::standard()).unwrap();
//!
//! CsvExporter::default()
//!     .export_single(&result, &TableLayout::rayleigh_amplitudes(), Path::new("rayleigh_scattering_data.csv"))
//!     .unwrap();
//! ```

pub mod csv;
pub mod xlsx;

pub use self::csv::{
    CsvConfig, CsvExporter, CsvMetadata, NumberFormat, ParsedTable, read_csv_table,
};
pub use self::xlsx::XlsxExporter;

use std::path::Path;

use nalgebra::DVector;
use thiserror::Error;

use crate::physics::{ScatteringQuantity, ScatteringResult};
use crate::solver::SweepResult;

// =================================================================================================
// Errors
// =================================================================================================

/// Errors raised while exporting or re-reading tables
///
/// Data problems are detected before any file is created, so a failed export leaves
/// nothing behind.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Quantity {0} is not present in the result")]
    MissingQuantity(String),

    #[error("Data length mismatch: {0}")]
    LengthMismatch(String),

    #[error("Invalid data: NaN or Inf detected in {column} at row {row}")]
    NonFinite { column: String, row: usize },

    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: &'static str },

    #[error("Invalid export configuration: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Parse error: {0}")]
    Parse(String),
}

// =================================================================================================
// Table layout
// =================================================================================================

/// Column layout of an exported table: the angle column, then one column per quantity
///
/// # Example
///
/// ```rust
/// use scatter_rs::output::export::TableLayout;
///
/// let layout = TableLayout::mie();
/// assert_eq!(
///     layout.headers(),
///     vec!["Angle(degree)", "Perpendicular", "Parallel", "Unpolarized"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Header of the first (angle, degrees) column
    pub angle_header: String,

    /// Quantities and their headers, in column order
    pub columns: Vec<(ScatteringQuantity, String)>,
}

impl TableLayout {
    /// Layout with only the angle column
    pub fn new(angle_header: impl Into<String>) -> Self {
        Self {
            angle_header: angle_header.into(),
            columns: Vec::new(),
        }
    }

    /// Builder pattern: append a column
    pub fn column(mut self, quantity: ScatteringQuantity, header: impl Into<String>) -> Self {
        self.columns.push((quantity, header.into()));
        self
    }

    /// `Angle(degree), Perpendicular, Parallel, Unpolarized`
    pub fn mie() -> Self {
        Self::new("Angle(degree)")
            .column(ScatteringQuantity::Perpendicular, "Perpendicular")
            .column(ScatteringQuantity::Parallel, "Parallel")
            .column(ScatteringQuantity::Unpolarized, "Unpolarized")
    }

    /// `Scattering Angle (degrees), S1, S2`
    pub fn rayleigh_amplitudes() -> Self {
        Self::new("Scattering Angle (degrees)")
            .column(ScatteringQuantity::S1, "S1")
            .column(ScatteringQuantity::S2, "S2")
    }

    /// `Scattering Angle (degrees), Intensity Parallel, Intensity Perpendicular`
    pub fn rayleigh_intensities() -> Self {
        Self::new("Scattering Angle (degrees)")
            .column(ScatteringQuantity::Parallel, "Intensity Parallel")
            .column(ScatteringQuantity::Perpendicular, "Intensity Perpendicular")
    }

    /// Per-distance worksheet: `Scattering Angle (degrees), Intensity Perpendicular, Intensity Parallel`
    pub fn distance_sheet() -> Self {
        Self::new("Scattering Angle (degrees)")
            .column(ScatteringQuantity::Perpendicular, "Intensity Perpendicular")
            .column(ScatteringQuantity::Parallel, "Intensity Parallel")
    }

    /// Every header, angle first
    pub fn headers(&self) -> Vec<&str> {
        std::iter::once(self.angle_header.as_str())
            .chain(self.columns.iter().map(|(_, h)| h.as_str()))
            .collect()
    }

    /// At least one value column, no blank or duplicate headers
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.columns.is_empty() {
            return Err(ExportError::InvalidConfiguration(
                "table layout has no value column".to_string(),
            ));
        }
        let headers = self.headers();
        for (i, header) in headers.iter().enumerate() {
            if header.trim().is_empty() {
                return Err(ExportError::InvalidConfiguration(format!(
                    "column {} has an empty header",
                    i
                )));
            }
            if headers[..i].contains(header) {
                return Err(ExportError::InvalidConfiguration(format!(
                    "duplicate column header '{}'",
                    header
                )));
            }
        }
        Ok(())
    }
}

// =================================================================================================
// Shared validation
// =================================================================================================

/// Angle column plus the layout's value columns, checked for emptiness, presence and NaN/Inf
pub(crate) fn collect_columns<'a>(
    result: &'a ScatteringResult,
    layout: &TableLayout,
) -> Result<(&'a DVector<f64>, Vec<&'a DVector<f64>>), ExportError> {
    layout.validate()?;

    if result.is_empty() {
        return Err(ExportError::EmptyData(format!(
            "result of {} has no angle",
            result.model_name()
        )));
    }

    let angles = result.angles();
    check_finite(&layout.angle_header, angles)?;

    let mut columns = Vec::with_capacity(layout.columns.len());
    for (quantity, header) in &layout.columns {
        let values = result
            .get(*quantity)
            .ok_or_else(|| ExportError::MissingQuantity(quantity.to_string()))?;
        if values.len() != angles.len() {
            return Err(ExportError::LengthMismatch(format!(
                "{} has {} values for {} angles",
                header,
                values.len(),
                angles.len()
            )));
        }
        check_finite(header, values)?;
        columns.push(values);
    }

    Ok((angles, columns))
}

fn check_finite(column: &str, values: &DVector<f64>) -> Result<(), ExportError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(ExportError::NonFinite {
            column: column.to_string(),
            row,
        }),
        None => Ok(()),
    }
}

// =================================================================================================
// Exporter trait
// =================================================================================================

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller can react
/// precisely without downcasting a boxed error.
///
/// # Implementing this trait
///
/// A new format must implement [`export_single`](Exporter::export_single) and
/// [`export_sweep`](Exporter::export_sweep). Both must validate every table before
/// creating any file.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one result as one table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `result` contains no angle
    /// - a layout quantity is missing or holds NaN/Inf
    /// - the path cannot be written
    fn export_single(
        &self,
        result: &ScatteringResult,
        layout: &TableLayout,
        path: &Path,
    ) -> Result<(), Self::Error>;

    /// Exports every iteration of a sweep, one table per swept value.
    ///
    /// Tables are named after [`SweepEntry::sheet_name`](crate::solver::SweepEntry::sheet_name).
    fn export_sweep(
        &self,
        sweep: &SweepResult,
        layout: &TableLayout,
        path: &Path,
    ) -> Result<(), Self::Error>;
}

// =================================================================================================
// Tests
// =================================================================================================
