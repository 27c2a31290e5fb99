//! Sweep plots: one curve per swept value
//!
//! The legend carries the swept value (`r = 0.01 μm`, `λ = 532 nm`, `d = 2.1 cm`), and the
//! parameter table lists the base parameters without the swept one.

use std::error::Error;

use super::config::{NO_TITLE, PlotConfig};
use super::intensity::quantity_curve;
use super::panel::render_figure;
use super::table::ParameterTable;
use crate::physics::ScatteringQuantity;
use crate::solver::SweepResult;

/// Parameter table of a sweep: base parameters minus the swept one
pub fn sweep_table(sweep: &SweepResult) -> ParameterTable {
    ParameterTable::from_parameters(sweep.base())
        .without(sweep.parameter().table_key())
        .with_header("Input Parameters", "Values")
}

/// Plot one quantity for every iteration of a sweep
///
/// # Arguments
///
/// * `sweep`      : Sweep result, curves are drawn in value order
/// * `quantity`   : Quantity to draw (e.g. `Parallel`)
/// * `output_path`: Output file path (`.png` or `.svg`)
/// * `config`     : Optional plot configuration; `None` uses [`PlotConfig::sweep`].
///   Use `config.series_colors` to override the default palette.
///
/// # Example
///
/// ```rust,no_run
/// use scatter_rs::models::RayleighIntensity;
/// use scatter_rs::output::visualization::plot_sweep;
/// use scatter_rs::physics::{Length, LengthUnit, ScatteringParameters, ScatteringQuantity};
/// use scatter_rs::solver::{AngleGrid, ParameterSweep, SweepParameter};
///
/// let base = ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.01), 1.33257)
///     .with_incident_intensity(1.0)
///     .with_observer_distance(Length::centimeters(4.0));
/// let sweep = ParameterSweep::new(
///     base,
///     SweepParameter::Radius(LengthUnit::Micrometer),
///     vec![0.0001, 0.001, 0.01, 0.1],
/// )
/// .run(&AngleGrid::standard(), RayleighIntensity::new)
/// .unwrap();
///
/// plot_sweep(&sweep, ScatteringQuantity::Parallel, "radii.png", None).unwrap();
/// ```
pub fn plot_sweep(
    sweep: &SweepResult,
    quantity: ScatteringQuantity,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::sweep(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    if sweep.is_empty() {
        return Err("sweep has no iteration to plot".into());
    }

    let curves = sweep
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            quantity_curve(&entry.result, quantity, entry.label.clone(), config.get_series_color(i))
        })
        .collect::<Result<Vec<_>, _>>()?;

    render_figure(output_path, &curves, Some(&sweep_table(sweep)), config)
}

// =================================================================================================
// Tests
// =================================================================================================
