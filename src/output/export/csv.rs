//! CSV export of scattering results
//!
//! This module writes [`ScatteringResult`]s to CSV (Comma-Separated Values), which is
//! compatible with Excel, Python pandas, MATLAB and most data analysis tools, and reads
//! those files back.
//!
//! # Features
//!
//! - **Layouts**: columns and headers come from a [`TableLayout`]
//! - **Metadata support**: optional `#` comment header with parameters and a timestamp
//! - **Customizable**: delimiter, decimal separator, number formats
//! - **Sweeps**: one file per swept value, named after the sheet name
//! - **Validation**: empty data, missing quantities and NaN/Inf are rejected before any file is created
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! CsvExporter::default().export_single(&result, &TableLayout::rayleigh_amplitudes(), path)?;
//! ```
//!
//! **Output**:
//! ```csv
//! Scattering Angle (degrees),S1,S2
//! 0,2.0452e-5,2.0452e-5
//! 0.1,2.0452e-5,2.04519e-5
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_model(&model));
//! CsvExporter::new(config).export_single(&result, &layout, path)?;
//! ```
//!
//! **Output**:
//! ```csv
//! # Light Scattering Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Rayleigh Intensity
//! # λ: 650 nm
//! # Radius of particle (r): 0.01 μm
//! #
//! Scattering Angle (degrees),Intensity Parallel,Intensity Perpendicular
//! ...
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use ::csv::ReaderBuilder;
use nalgebra::DVector;

use super::{ExportError, Exporter, TableLayout, collect_columns};
use crate::physics::{ScatteringModel, ScatteringResult};
use crate::solver::{AngleGrid, SweepResult};

// =============================================================================
// Configuration Structures
// =============================================================================

/// How numbers are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Shortest round-trip decimal (`0.3`, `180`)
    Plain,

    /// Shortest round-trip scientific (`2.0452e-5`)
    Exponent,

    /// Fixed number of decimal places
    Fixed(usize),

    /// Scientific with a fixed number of mantissa decimals
    Scientific(usize),
}

impl NumberFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            NumberFormat::Plain => format!("{}", value),
            NumberFormat::Exponent => format!("{:e}", value),
            NumberFormat::Fixed(precision) => format!("{:.prec$}", value, prec = precision),
            NumberFormat::Scientific(precision) => {
                format!("{:.prec$e}", value, prec = precision)
            }
        }
    }
}

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `angle_format`: Format of the angle column (default: plain)
/// - `value_format`: Format of the value columns (default: exponent)
/// - `include_metadata`: Add header comments
/// - `metadata`: Metadata to include
///
/// # Example
///
/// ```rust
/// use scatter_rs::output::export::{CsvConfig, NumberFormat};
///
/// let config = CsvConfig {
///     delimiter: ';',
///     value_format: NumberFormat::Scientific(10),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number format of the angle column
    pub angle_format: NumberFormat,

    /// Number format of the value columns
    pub value_format: NumberFormat,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            angle_format: NumberFormat::Plain,
            value_format: NumberFormat::Exponent,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set the value format
    pub fn value_format(mut self, format: NumberFormat) -> Self {
        self.value_format = format;
        self
    }

    /// Builder pattern: set the angle format
    pub fn angle_format(mut self, format: NumberFormat) -> Self {
        self.angle_format = format;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    /// ASCII delimiter distinct from the decimal separator
    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.delimiter.is_ascii() || self.delimiter == '#' || self.delimiter == '"' {
            return Err(ExportError::InvalidConfiguration(format!(
                "delimiter '{}' must be ASCII and not '#' or '\"'",
                self.delimiter
            )));
        }
        if self.delimiter == self.decimal_separator {
            return Err(ExportError::InvalidConfiguration(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }

    fn format(&self, format: NumberFormat, value: f64) -> String {
        let formatted = format.format(value);
        if self.decimal_separator != '.' {
            formatted.replace('.', &self.decimal_separator.to_string())
        } else {
            formatted
        }
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// First comment line (default: "Light Scattering Data")
    pub title: Option<String>,

    /// Model name (e.g., "Rayleigh Intensity")
    pub model_name: Option<String>,

    /// Input parameters as label/value pairs
    pub parameters: Vec<(String, String)>,

    /// Additional custom entries
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Name and parameter rows of a model
    pub fn from_model(model: &dyn ScatteringModel) -> Self {
        Self {
            model_name: Some(model.name().to_string()),
            parameters: model.parameters(),
            ..Default::default()
        }
    }

    /// Add custom entry
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> Result<(), ExportError> {
    writeln!(
        out,
        "# {}",
        metadata.title.as_deref().unwrap_or("Light Scattering Data")
    )?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {}", model)?;
    }
    for (key, value) in metadata.parameters.iter().chain(metadata.custom.iter()) {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Quote a header field when it contains the delimiter or a quote
fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// =============================================================================
// CSV Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Write one validated table
    fn write_table(
        &self,
        angles: &DVector<f64>,
        columns: &[&DVector<f64>],
        layout: &TableLayout,
        path: &Path,
    ) -> Result<(), ExportError> {
        let config = &self.config;
        let mut out = BufWriter::new(File::create(path)?);

        // ============================= Write Metadata =========================

        if config.include_metadata
            && let Some(metadata) = &config.metadata
        {
            write_metadata_header(&mut out, metadata)?;
        }

        // ============================= Write Header ===========================

        let header: Vec<String> = layout
            .headers()
            .iter()
            .map(|h| escape_field(h, config.delimiter))
            .collect();
        writeln!(out, "{}", header.join(&config.delimiter.to_string()))?;

        // ============================= Write Data =============================

        for (i, angle) in angles.iter().enumerate() {
            write!(out, "{}", config.format(config.angle_format, *angle))?;
            for column in columns {
                write!(
                    out,
                    "{}{}",
                    config.delimiter,
                    config.format(config.value_format, column[i])
                )?;
            }
            writeln!(out)?;
        }

        out.flush()?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = ExportError;

    fn export_single(
        &self,
        result: &ScatteringResult,
        layout: &TableLayout,
        path: &Path,
    ) -> Result<(), ExportError> {
        self.config.validate()?;
        let (angles, columns) = collect_columns(result, layout)?;
        self.write_table(angles, &columns, layout, path)
    }

    /// `path` is a directory; it is created when missing and receives `<sheet_name>.csv`
    /// for every swept value.
    fn export_sweep(
        &self,
        sweep: &SweepResult,
        layout: &TableLayout,
        path: &Path,
    ) -> Result<(), ExportError> {
        self.config.validate()?;
        if sweep.is_empty() {
            return Err(ExportError::EmptyData("sweep has no iteration".to_string()));
        }

        // Validate every table before the first file is created
        let tables = sweep
            .iter()
            .map(|entry| collect_columns(&entry.result, layout).map(|t| (entry, t)))
            .collect::<Result<Vec<_>, _>>()?;

        fs::create_dir_all(path)?;
        for (entry, (angles, columns)) in tables {
            let file = path.join(format!("{}.csv", entry.sheet_name));
            self.write_table(angles, &columns, layout, &file)?;
        }
        Ok(())
    }
}

// =============================================================================
// Reading back
// =============================================================================

/// Columns of a CSV file, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl ParsedTable {
    /// Column by header
    pub fn column(&self, header: &str) -> Option<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == header)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Rebuild a result from the columns named by `layout`
    pub fn to_result(&self, layout: &TableLayout) -> Result<ScatteringResult, ExportError> {
        let angles = self
            .column(&layout.angle_header)
            .ok_or_else(|| ExportError::Parse(format!("no column '{}'", layout.angle_header)))?;
        let grid = AngleGrid::from_degrees(angles.to_vec())
            .map_err(|e| ExportError::Parse(e.to_string()))?;

        let mut result = ScatteringResult::new(grid, "Imported");
        for (quantity, header) in &layout.columns {
            let values = self
                .column(header)
                .ok_or_else(|| ExportError::Parse(format!("no column '{}'", header)))?;
            result
                .insert(*quantity, DVector::from_column_slice(values))
                .map_err(|e| ExportError::Parse(e.to_string()))?;
        }
        Ok(result)
    }
}

/// Parse a CSV written by [`CsvExporter`] (comment lines are skipped)
pub fn read_csv_table(path: &Path, config: &CsvConfig) -> Result<ParsedTable, ExportError> {
    config.validate()?;

    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .comment(Some(b'#'))
        .has_headers(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut columns = vec![Vec::new(); headers.len()];

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != headers.len() {
            return Err(ExportError::LengthMismatch(format!(
                "row {} has {} fields for {} headers",
                row,
                record.len(),
                headers.len()
            )));
        }
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            let normalized = field.trim().replace(config.decimal_separator, ".");
            let value = normalized.parse::<f64>().map_err(|e| {
                ExportError::Parse(format!("row {}: '{}' ({})", row, field, e))
            })?;
            column.push(value);
        }
    }

    Ok(ParsedTable { headers, columns })
}

// =================================================================================================
// Tests
// =================================================================================================
