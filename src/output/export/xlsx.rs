//! XLSX export of scattering results
//!
//! Writes Excel workbooks with [`rust_xlsxwriter`]. A single result becomes one worksheet; a
//! sweep becomes one worksheet per swept value, named after
//! [`SweepEntry::sheet_name`](crate::solver::SweepEntry::sheet_name) (`d_cm_2.1`, `d_cm_2.2`, ...).
//!
//! Each worksheet holds the layout's header row (bold) followed by one row per angle.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use scatter_rs::models::RayleighIntensity;
//! use scatter_rs::output::export::{Exporter, TableLayout, XlsxExporter};
//! use scatter_rs::physics::{Length, LengthUnit, ScatteringParameters};
//! use scatter_rs::solver::{AngleGrid, ParameterSweep, SweepParameter};
//!
//! let base = ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.01), 1.33257)
//!     .with_observer_distance(Length::centimeters(3.0));
//! let sweep = ParameterSweep::range(
//!     base,
//!     SweepParameter::ObserverDistance(LengthUnit::Centimeter),
//!     2.1,
//!     5.0,
//!     0.1,
//! )
//! .unwrap()
//! .run(&AngleGrid::standard(), RayleighIntensity::new)
//! .unwrap();
//!
//! XlsxExporter::default()
//!     .export_sweep(&sweep, &TableLayout::distance_sheet(), Path::new("rayleigh_scattering_data.xlsx"))
//!     .unwrap();
//! ```

use std::path::Path;

use nalgebra::DVector;
use rust_xlsxwriter::{Format, Workbook};

use super::{ExportError, Exporter, TableLayout, collect_columns};
use crate::physics::ScatteringResult;
use crate::solver::SweepResult;

/// Excel limit on worksheet name length
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Checks a worksheet name against Excel's rules
pub fn validate_sheet_name(name: &str) -> Result<(), ExportError> {
    let reason = if name.trim().is_empty() {
        Some("sheet name is empty")
    } else if name.chars().count() > MAX_SHEET_NAME_LEN {
        Some("sheet name is longer than 31 characters")
    } else if name.contains(FORBIDDEN_SHEET_CHARS) {
        Some("sheet name contains one of [ ] : * ? / \\")
    } else if name.starts_with('\'') || name.ends_with('\'') {
        Some("sheet name starts or ends with an apostrophe")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ExportError::InvalidSheetName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// XLSX implementation of [`Exporter`]
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    /// Worksheet name used by [`Exporter::export_single`]
    sheet_name: String,

    /// Width of every written column, in characters
    column_width: f64,
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self {
            sheet_name: "Scattering".to_string(),
            column_width: 26.0,
        }
    }
}

impl XlsxExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: name of the single-result worksheet
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Builder pattern: column width
    pub fn with_column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Worksheet names a sweep would produce, validated and checked for duplicates
    /// (Excel compares sheet names case-insensitively)
    pub fn sheet_names_for<'a>(&self, sweep: &'a SweepResult) -> Result<Vec<&'a str>, ExportError> {
        let names = sweep.sheet_names();
        for (i, name) in names.iter().enumerate() {
            validate_sheet_name(name)?;
            if names[..i].iter().any(|n| n.eq_ignore_ascii_case(name)) {
                return Err(ExportError::InvalidSheetName {
                    name: name.to_string(),
                    reason: "duplicate sheet name",
                });
            }
        }
        Ok(names)
    }

    /// Single result as an in-memory workbook
    pub fn single_to_buffer(
        &self,
        result: &ScatteringResult,
        layout: &TableLayout,
    ) -> Result<Vec<u8>, ExportError> {
        let mut workbook = self.single_workbook(result, layout)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Sweep as an in-memory workbook
    pub fn sweep_to_buffer(
        &self,
        sweep: &SweepResult,
        layout: &TableLayout,
    ) -> Result<Vec<u8>, ExportError> {
        let mut workbook = self.sweep_workbook(sweep, layout)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn single_workbook(
        &self,
        result: &ScatteringResult,
        layout: &TableLayout,
    ) -> Result<Workbook, ExportError> {
        validate_sheet_name(&self.sheet_name)?;
        let (angles, columns) = collect_columns(result, layout)?;

        let mut workbook = Workbook::new();
        self.write_sheet(&mut workbook, &self.sheet_name, angles, &columns, layout)?;
        Ok(workbook)
    }

    fn sweep_workbook(
        &self,
        sweep: &SweepResult,
        layout: &TableLayout,
    ) -> Result<Workbook, ExportError> {
        if sweep.is_empty() {
            return Err(ExportError::EmptyData("sweep has no iteration".to_string()));
        }
        let names = self.sheet_names_for(sweep)?;
        let tables = sweep
            .iter()
            .map(|entry| collect_columns(&entry.result, layout))
            .collect::<Result<Vec<_>, _>>()?;

        let mut workbook = Workbook::new();
        for (name, (angles, columns)) in names.into_iter().zip(tables) {
            self.write_sheet(&mut workbook, name, angles, &columns, layout)?;
        }
        Ok(workbook)
    }

    fn write_sheet(
        &self,
        workbook: &mut Workbook,
        name: &str,
        angles: &DVector<f64>,
        columns: &[&DVector<f64>],
        layout: &TableLayout,
    ) -> Result<(), ExportError> {
        let bold = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;

        for (col, header) in layout.headers().into_iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, header, &bold)?;
            worksheet.set_column_width(col, self.column_width)?;
        }

        for (i, angle) in angles.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_number(row, 0, *angle)?;
            for (j, column) in columns.iter().enumerate() {
                worksheet.write_number(row, (j + 1) as u16, column[i])?;
            }
        }
        Ok(())
    }
}

impl Exporter for XlsxExporter {
    type Error = ExportError;

    fn export_single(
        &self,
        result: &ScatteringResult,
        layout: &TableLayout,
        path: &Path,
    ) -> Result<(), ExportError> {
        let mut workbook = self.single_workbook(result, layout)?;
        workbook.save(path)?;
        Ok(())
    }

    fn export_sweep(
        &self,
        sweep: &SweepResult,
        layout: &TableLayout,
        path: &Path,
    ) -> Result<(), ExportError> {
        let mut workbook = self.sweep_workbook(sweep, layout)?;
        workbook.save(path)?;
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
