//! Mie component grid
//!
//! A 2×2 figure of one Mie result:
//!
//! | | left | right |
//! |---|---|---|
//! | top | SR = \|S2\|² (parallel, dashed) | SL = \|S1\|² (perpendicular) |
//! | bottom | SU (unpolarized) | all three |
//!
//! Only the bottom row carries the angle label.

use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::{AxisScale, NO_TITLE, PanelLayout, PlotConfig};
use super::intensity::quantity_curve;
use super::panel::{Curve, PanelLabels, draw_panel, is_svg};
use crate::physics::{ScatteringQuantity, ScatteringResult};

/// Curves of the four panels with their y labels
fn component_panels(
    result: &ScatteringResult,
    config: &PlotConfig,
) -> Result<Vec<(Vec<Curve>, &'static str)>, Box<dyn Error>> {
    let parallel =
        quantity_curve(result, ScatteringQuantity::Parallel, "Parallel", config.line_color)?
            .dashed();
    let perpendicular = quantity_curve(
        result,
        ScatteringQuantity::Perpendicular,
        "Perpendicular",
        config.line_color,
    )?;
    let unpolarized =
        quantity_curve(result, ScatteringQuantity::Unpolarized, "Unpolarized", BLUE)?;

    Ok(vec![
        (vec![parallel.clone()], "Intensity (|S_R|²)"),
        (vec![perpendicular.clone()], "Intensity (|S_L|²)"),
        (vec![unpolarized.clone()], "Intensity (|S_U|²)"),
        (vec![parallel, perpendicular, unpolarized], "Intensity"),
    ])
}

/// Draw the 2×2 grid on `root`
pub fn draw_mie_components<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    result: &ScatteringResult,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let panels = component_panels(result, config)?;
    let scale = match config.layout {
        PanelLayout::Single(scale) => scale,
        PanelLayout::LinearAndLog => AxisScale::Log,
    };

    root.fill(&config.background)?;
    let body = root.titled(&config.title, ("sans-serif", 28).into_font())?;
    let areas = body.split_evenly((2, 2));

    for (i, (area, (curves, ylabel))) in areas.iter().zip(&panels).enumerate() {
        let labels = PanelLabels {
            caption: None,
            xlabel: (i >= 2).then_some(config.xlabel.as_str()),
            ylabel: *ylabel,
        };
        draw_panel(area, curves, scale, &labels, config)?;
    }

    Ok(())
}

/// Plot SR, SL, SU and all three together in a 2×2 grid
///
/// # Arguments
///
/// * `result`     : Result holding `Parallel`, `Perpendicular` and `Unpolarized`
///   (as produced by [`MieScattering`](crate::models::MieScattering))
/// * `output_path`: Output file path (`.png` or `.svg`)
/// * `config`     : Optional plot configuration; `None` uses [`PlotConfig::mie`] (log axes)
///
/// # Example
///
/// ```rust,no_run
/// use scatter_rs::models::MieScattering;
/// use scatter_rs::output::visualization::plot_mie_components;
/// use scatter_rs::physics::{Length, RefractiveIndex, ScatteringModel, ScatteringParameters};
/// use scatter_rs::solver::AngleGrid;
///
/// let model = MieScattering::new(ScatteringParameters::new(
///     Length::nanometers(650.0),
///     Length::nanometers(1000.0),
///     RefractiveIndex::complex(1.33257, 1.67e-8),
/// ));
/// let result = model.compute(&AngleGrid::standard()).unwrap();
/// plot_mie_components(&result, "mie.png", None).unwrap();
/// ```
pub fn plot_mie_components(
    result: &ScatteringResult,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::mie(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    config.validate()?;

    if result.is_empty() {
        return Err(format!("{} result has no angle to plot", result.model_name()).into());
    }

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_mie_components(&root, result, config)?;
        root.present()?;
    } else {
        let root =
            BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_mie_components(&root, result, config)?;
        root.present()?;
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
