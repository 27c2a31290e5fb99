//! Panel rendering shared by every plot
//!
//! A panel is one chart (angle on x, one or more curves on y) drawn on an explicit
//! [`DrawingArea`]. Figures split their root area into panels and hand each one to
//! [`draw_panel`]; nothing relies on an implicit current figure.

use std::error::Error;

use nalgebra::DVector;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::{ANGLE_RANGE, ANGLE_TICK_STEP, AxisScale, PlotConfig};
use super::table::ParameterTable;

/// Dash period and dash length along the angle axis, degrees
const DASH_PERIOD_DEG: f64 = 6.0;
const DASH_LENGTH_DEG: f64 = 4.0;

// =================================================================================================
// Curves
// =================================================================================================

/// One labelled XY series
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub dashed: bool,
}

impl Curve {
    /// Solid curve from an angle column and a value column
    pub fn new(
        label: impl Into<String>,
        angles: &DVector<f64>,
        values: &DVector<f64>,
        color: RGBColor,
    ) -> Self {
        Self {
            label: label.into(),
            points: angles.iter().copied().zip(values.iter().copied()).collect(),
            color,
            dashed: false,
        }
    }

    /// Builder pattern: draw dashed
    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    /// Contiguous drawable samples; on a log axis non-positive samples break the curve
    pub(crate) fn runs(&self, scale: AxisScale) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();

        for &(x, y) in &self.points {
            let drawable = y.is_finite() && (scale == AxisScale::Linear || y > 0.0);
            if drawable {
                current.push((x, y));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Polylines to stroke: the runs, cut into dashes when the curve is dashed
    pub(crate) fn strokes(&self, scale: AxisScale) -> Vec<Vec<(f64, f64)>> {
        let runs = self.runs(scale);
        if !self.dashed {
            return runs;
        }

        let origin = self.points.first().map_or(0.0, |p| p.0);
        let mut dashes = Vec::new();
        for run in runs {
            let mut dash = Vec::new();
            for (x, y) in run {
                if (x - origin).rem_euclid(DASH_PERIOD_DEG) < DASH_LENGTH_DEG {
                    dash.push((x, y));
                } else if !dash.is_empty() {
                    dashes.push(std::mem::take(&mut dash));
                }
            }
            if !dash.is_empty() {
                dashes.push(dash);
            }
        }
        dashes.retain(|d| d.len() > 1);
        dashes
    }
}

/// Y range covering every drawable sample, padded; `None` when nothing is drawable
pub(crate) fn value_range(curves: &[Curve], scale: AxisScale) -> Option<(f64, f64)> {
    let (lo, hi) = curves
        .iter()
        .flat_map(|c| c.runs(scale))
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
            (lo.min(y), hi.max(y))
        });
    if lo > hi {
        return None;
    }

    let range = match scale {
        AxisScale::Linear => {
            let span = hi - lo;
            let pad = if span > 0.0 {
                0.05 * span
            } else {
                0.1 * hi.abs().max(1e-300)
            };
            // Intensities start at zero, as in the usual linear plots
            let bottom = if lo >= 0.0 { 0.0 } else { lo - pad };
            (bottom, hi + pad)
        }
        AxisScale::Log => {
            if hi > lo {
                (lo / 2.0, hi * 2.0)
            } else {
                (lo / 10.0, hi * 10.0)
            }
        }
    };
    Some(range)
}

fn format_angle(x: &f64) -> String {
    format!("{:.0}", x)
}

fn format_linear(y: &f64) -> String {
    format!("{:.2e}", y)
}

fn format_decade(y: &f64) -> String {
    format!("{:.0e}", y)
}

// =================================================================================================
// Panel drawing
// =================================================================================================

/// Labels of one panel
#[derive(Debug, Clone, Default)]
pub struct PanelLabels<'a> {
    pub caption: Option<&'a str>,
    pub xlabel: Option<&'a str>,
    pub ylabel: &'a str,
}

/// Draw `curves` on `area` with the given intensity scale
pub fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    curves: &[Curve],
    scale: AxisScale,
    labels: &PanelLabels<'_>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (y_min, y_max) = value_range(curves, scale)
        .ok_or_else(|| format!("no drawable sample on a {:?} axis", scale))?;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80);
    if let Some(caption) = labels.caption {
        builder.caption(caption, ("sans-serif", 20).into_font().style(FontStyle::Bold));
    }

    let (x_min, x_max) = ANGLE_RANGE;
    let x_range = (x_min..x_max).step(ANGLE_TICK_STEP);
    let xlabel = labels.xlabel.unwrap_or("");

    match scale {
        AxisScale::Linear => {
            let mut chart = builder.build_cartesian_2d(x_range, y_min..y_max)?;
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(xlabel)
                .y_desc(labels.ylabel)
                .x_label_formatter(&format_angle)
                .y_label_formatter(&format_linear);
            if !config.show_grid {
                mesh.disable_mesh();
            }
            mesh.draw()?;
            draw_curves(&mut chart, curves, scale, config)
        }
        AxisScale::Log => {
            let mut chart = builder.build_cartesian_2d(x_range, (y_min..y_max).log_scale())?;
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(xlabel)
                .y_desc(labels.ylabel)
                .x_label_formatter(&format_angle)
                .y_label_formatter(&format_decade);
            if !config.show_grid {
                mesh.disable_mesh();
            }
            mesh.draw()?;
            draw_curves(&mut chart, curves, scale, config)
        }
    }
}

/// Stroke every curve and draw the legend
fn draw_curves<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    curves: &[Curve],
    scale: AxisScale,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    for curve in curves {
        let style = curve.color.stroke_width(config.line_width);
        let series = chart.draw_series(
            curve
                .strokes(scale)
                .into_iter()
                .map(move |stroke| PathElement::new(stroke, style)),
        )?;

        series.label(curve.label.as_str());
        if curve.dashed {
            series.legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (7, 0)], style)
                    + PathElement::new(vec![(13, 0), (20, 0)], style)
            });
        } else {
            series.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

// =================================================================================================
// Figures
// =================================================================================================

/// Title, one panel per scale of `config.layout`, parameter table on the last panel
pub(crate) fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    curves: &[Curve],
    table: Option<&ParameterTable>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&config.background)?;
    let body = root.titled(&config.title, ("sans-serif", 28).into_font())?;

    let scales = config.layout.scales();
    let panels = body.split_evenly((1, scales.len()));
    let several = scales.len() > 1;

    for (panel, scale) in panels.iter().zip(&scales) {
        let ylabel = if several && *scale == AxisScale::Log {
            format!("{} (log scale)", config.ylabel)
        } else {
            config.ylabel.clone()
        };
        let labels = PanelLabels {
            caption: several.then(|| scale.caption()),
            xlabel: Some(config.xlabel.as_str()),
            ylabel: &ylabel,
        };
        draw_panel(panel, curves, *scale, &labels, config)?;
    }

    if config.show_table
        && let (Some(table), Some(last)) = (table, panels.last())
    {
        table.draw(last)?;
    }

    Ok(())
}

/// `true` for paths ending in `.svg`
pub(crate) fn is_svg(output_path: &str) -> bool {
    std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Render a figure to `output_path` (`.svg` → vector, anything else → bitmap)
pub(crate) fn render_figure(
    output_path: &str,
    curves: &[Curve],
    table: Option<&ParameterTable>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    config.validate()?;

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_figure(&root, curves, table, config)?;
        root.present()?;
    } else {
        let root =
            BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_figure(&root, curves, table, config)?;
        root.present()?;
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(values: &[f64]) -> Curve {
        let angles = DVector::from_fn(values.len(), |i, _| i as f64);
        Curve::new("c", &angles, &DVector::from_row_slice(values), RED)
    }

    #[test]
    fn test_log_runs_skip_non_positive() {
        let c = curve(&[1.0, 2.0, 0.0, 3.0, -1.0, 4.0, 5.0]);
        assert_eq!(c.runs(AxisScale::Linear).len(), 1);

        let runs = c.runs(AxisScale::Log);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(runs[2], vec![(5.0, 4.0), (6.0, 5.0)]);
    }

    #[test]
    fn test_non_finite_breaks_runs() {
        let c = curve(&[1.0, f64::NAN, 3.0, 4.0]);
        assert_eq!(c.runs(AxisScale::Linear).len(), 2);
    }

    #[test]
    fn test_dashes() {
        let c = curve(&vec![1.0; 19]).dashed();
        let strokes = c.strokes(AxisScale::Linear);
        // 0..=3, 6..=9, 12..=15, 18 (dropped: single point)
        assert_eq!(strokes.len(), 3);
        assert!(strokes.iter().all(|s| s.len() == 4));
        assert_eq!(strokes[1][0], (6.0, 1.0));
    }

    #[test]
    fn test_value_range() {
        let curves = vec![curve(&[1.0, 2.0]), curve(&[0.5, 4.0])];
        let (lo, hi) = value_range(&curves, AxisScale::Linear).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 4.0);

        let (lo, hi) = value_range(&curves, AxisScale::Log).unwrap();
        assert_eq!(lo, 0.25);
        assert_eq!(hi, 8.0);
    }

    #[test]
    fn test_value_range_constant_and_empty() {
        let (lo, hi) = value_range(&[curve(&[2.0, 2.0])], AxisScale::Log).unwrap();
        assert!(lo < 2.0 && hi > 2.0);

        let (lo, hi) = value_range(&[curve(&[2.0, 2.0])], AxisScale::Linear).unwrap();
        assert!(lo < 2.0 && hi > 2.0);

        assert!(value_range(&[curve(&[0.0, -1.0])], AxisScale::Log).is_none());
    }

    #[test]
    fn test_draw_panel_both_scales() {
        let curves = vec![
            curve(&[1.0, 10.0, 100.0, 10.0]),
            curve(&[2.0, 3.0, 4.0, 5.0]).dashed(),
        ];
        let labels = PanelLabels {
            caption: Some("panel"),
            xlabel: Some("Scattering Angle (degrees)"),
            ylabel: "Intensity",
        };

        for scale in [AxisScale::Linear, AxisScale::Log] {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
                draw_panel(&root, &curves, scale, &labels, &PlotConfig::default()).unwrap();
                root.present().unwrap();
            }
            // Fixed angle axis with 30° ticks
            for tick in ["30", "90", "150"] {
                let text = format!(">\n{}\n</text>", tick);
                assert!(svg.contains(&text), "{:?} axis misses tick {}", scale, tick);
            }
        }
    }

    #[test]
    fn test_is_svg() {
        assert!(is_svg("plot.svg"));
        assert!(is_svg("plot.SVG"));
        assert!(!is_svg("plot.png"));
        assert!(!is_svg("plot"));
    }

    #[test]
    fn test_render_png_and_svg() {
        let curves = vec![curve(&[1.0, 2.0, 3.0]), curve(&[3.0, 0.0, 1.0]).dashed()];
        for ext in ["png", "svg"] {
            let tmp = tempfile::NamedTempFile::new().unwrap();
            let path = tmp.path().with_extension(ext);
            render_figure(path.to_str().unwrap(), &curves, None, &PlotConfig::default()).unwrap();
            assert!(path.exists());
        }
    }

    #[test]
    fn test_render_rejects_invalid_config() {
        let mut config = PlotConfig::default();
        config.height = 0;
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        assert!(render_figure(path.to_str().unwrap(), &[curve(&[1.0])], None, &config).is_err());
    }
}
