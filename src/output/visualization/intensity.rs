//! Intensity and amplitude plots of a single result
//!
//! # Available functions
//!
//! - [`plot_polarized_intensity`]: Rayleigh I∥ (solid) and I⊥ (dashed), linear and log panels
//! - [`plot_amplitudes`]         : |S1|² and |S2(θ)|² on a log axis
//! - [`plot_quantities`]         : any chosen quantities of a result on one figure
//!
//! # Usage
//!
//! ```rust,no_run
//! use scatter_rs::models::RayleighIntensity;
//! use scatter_rs::output::visualization::{ParameterTable, plot_polarized_intensity};
//! use scatter_rs::physics::{Length, ScatteringModel, ScatteringParameters};
//! use scatter_rs::solver::AngleGrid;
//!
//! let params = ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.01), 1.33257)
//!     .with_incident_intensity(1.0)
//!     .with_observer_distance(Length::centimeters(4.0));
//! let result = RayleighIntensity::new(params)
//!     .compute(&AngleGrid::linspace(0.0, 180.0, 1000).unwrap())
//!     .unwrap();
//!
//! let table = ParameterTable::from_parameters(&params);
//! plot_polarized_intensity(&result, Some(&table), "rayleigh.png", None).unwrap();
//! ```

use std::error::Error;

use plotters::prelude::*;

use super::config::{NO_TITLE, PlotConfig};
use super::panel::{Curve, render_figure};
use super::table::ParameterTable;
use crate::physics::{ScatteringQuantity, ScatteringResult};

/// Curve of one quantity, or an error naming the missing quantity
pub(crate) fn quantity_curve(
    result: &ScatteringResult,
    quantity: ScatteringQuantity,
    label: impl Into<String>,
    color: RGBColor,
) -> Result<Curve, Box<dyn Error>> {
    let values = result
        .get(quantity)
        .ok_or_else(|| format!("{} is not present in the {} result", quantity, result.model_name()))?;
    Ok(Curve::new(label, result.angles(), values, color))
}

fn ensure_not_empty(result: &ScatteringResult) -> Result<(), Box<dyn Error>> {
    if result.is_empty() {
        return Err(format!("{} result has no angle to plot", result.model_name()).into());
    }
    Ok(())
}

/// Plot Rayleigh polarized intensities
///
/// Draws `Parallel` as a solid line and `Perpendicular` as a dashed line, both in
/// `config.line_color`, on the panels of `config.layout` (linear and log by default).
/// The table, when given, is drawn in the last panel.
///
/// # Arguments
///
/// * `result`     : Result holding `Parallel` and `Perpendicular`
/// * `table`      : Optional parameter table
/// * `output_path`: Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`     : Optional plot configuration; `None` uses [`PlotConfig::intensity`]
///
/// # Errors
///
/// Returns `Err` if a quantity is missing, the result is empty, or the backend fails.
pub fn plot_polarized_intensity(
    result: &ScatteringResult,
    table: Option<&ParameterTable>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::intensity(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    ensure_not_empty(result)?;

    let curves = vec![
        quantity_curve(
            result,
            ScatteringQuantity::Parallel,
            "Parallel Polarization",
            config.line_color,
        )?,
        quantity_curve(
            result,
            ScatteringQuantity::Perpendicular,
            "Perpendicular Polarization",
            config.line_color,
        )?
        .dashed(),
    ];

    render_figure(output_path, &curves, table, config)
}

/// Plot |S1|² and |S2(θ)|²
///
/// Uses the first two colors of the series palette. `None` config uses
/// [`PlotConfig::amplitude`] (single log panel).
pub fn plot_amplitudes(
    result: &ScatteringResult,
    table: Option<&ParameterTable>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::amplitude(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    ensure_not_empty(result)?;

    let curves = vec![
        quantity_curve(
            result,
            ScatteringQuantity::S1Squared,
            "|S1|² (perpendicular)",
            config.get_series_color(0),
        )?,
        quantity_curve(
            result,
            ScatteringQuantity::S2Squared,
            "|S2|² (parallel)",
            config.get_series_color(1),
        )?,
    ];

    render_figure(output_path, &curves, table, config)
}

/// Plot chosen quantities of a result, one palette color each
///
/// The legend uses each quantity's display name.
///
/// # Example
///
/// ```rust,no_run
/// use scatter_rs::models::MieScattering;
/// use scatter_rs::output::visualization::{AxisScale, PanelLayout, PlotConfig, plot_quantities};
/// use scatter_rs::physics::{Length, RefractiveIndex, ScatteringModel, ScatteringParameters, ScatteringQuantity};
/// use scatter_rs::solver::AngleGrid;
///
/// let model = MieScattering::new(ScatteringParameters::new(
///     Length::nanometers(650.0),
///     Length::nanometers(1000.0),
///     RefractiveIndex::complex(1.33257, 1.67e-8),
/// ));
/// let result = model.compute(&AngleGrid::standard()).unwrap();
///
/// let config = PlotConfig::mie("Unpolarized").with_layout(PanelLayout::Single(AxisScale::Log));
/// plot_quantities(&result, &[ScatteringQuantity::Unpolarized], None, "su.png", Some(&config)).unwrap();
/// ```
pub fn plot_quantities(
    result: &ScatteringResult,
    quantities: &[ScatteringQuantity],
    table: Option<&ParameterTable>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);
    ensure_not_empty(result)?;

    if quantities.is_empty() {
        return Err("no quantity to plot".into());
    }

    let curves = quantities
        .iter()
        .enumerate()
        .map(|(i, q)| quantity_curve(result, *q, q.to_string(), config.get_series_color(i)))
        .collect::<Result<Vec<_>, _>>()?;

    render_figure(output_path, &curves, table, config)
}

// =================================================================================================
// Tests
// =================================================================================================
