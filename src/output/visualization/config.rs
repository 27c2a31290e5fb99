//! Plot configuration shared across visualization modules
//!
//! Every scattering plot shares the same angle axis: 0° to 180° with a tick every 30°.
//! Only the intensity axis changes, either linear, logarithmic, or both side by side.

use plotters::prelude::*;

/// Angle axis range, degrees
pub const ANGLE_RANGE: (f64, f64) = (0.0, 180.0);

/// Spacing of the angle ticks, degrees
pub const ANGLE_TICK_STEP: f64 = 30.0;

/// Intensity axis scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,

    /// Base-10 logarithmic; non-positive samples are left out
    Log,
}

impl AxisScale {
    /// Panel caption used when both scales are drawn
    pub fn caption(&self) -> &'static str {
        match self {
            AxisScale::Linear => "Linear Scale",
            AxisScale::Log => "Log Scale",
        }
    }
}

/// How many panels a single-figure plot is split into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLayout {
    /// One panel with the given scale
    Single(AxisScale),

    /// Linear panel on the left, log panel on the right
    LinearAndLog,
}

impl PanelLayout {
    /// Scales of the panels, left to right
    pub fn scales(&self) -> Vec<AxisScale> {
        match self {
            PanelLayout::Single(scale) => vec![*scale],
            PanelLayout::LinearAndLog => vec![AxisScale::Linear, AxisScale::Log],
        }
    }
}

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Figure title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Color of the primary curve
/// - `series_colors`: Optional colors for multi-curve plots (one per curve)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
/// - `layout`: Linear, log, or both panels
/// - `show_table`: Whether to draw the parameter table
///
/// # Example
///
/// ```rust
/// use scatter_rs::output::visualization::{AxisScale, PanelLayout, PlotConfig};
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::intensity("Water droplet, d = 3 cm");
/// config.line_color = BLUE;
/// config.layout = PanelLayout::Single(AxisScale::Log);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1400)
    pub width: u32,

    /// Image height in pixels (default: 600)
    pub height: u32,

    /// Figure title (default: "Scattering Intensity vs Scattering Angle")
    pub title: String,

    /// X-axis label (default: "Scattering Angle (degrees)")
    pub xlabel: String,

    /// Y-axis label (default: "Intensity")
    pub ylabel: String,

    /// Primary curve color (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for multi-curve plots
    ///
    /// If None, uses default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 1)
    pub line_width: u32,

    /// Show grid lines (default: false)
    pub show_grid: bool,

    /// Panels of the figure (default: linear and log)
    pub layout: PanelLayout,

    /// Draw the parameter table in the last panel (default: true)
    pub show_table: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 600,
            title: "Scattering Intensity vs Scattering Angle".to_string(),
            xlabel: "Scattering Angle (degrees)".to_string(),
            ylabel: "Intensity".to_string(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 1,
            show_grid: false,
            layout: PanelLayout::LinearAndLog,
            show_table: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust
/// use scatter_rs::output::visualization::{NO_TITLE, PlotConfig};
///
/// let config = PlotConfig::mie(NO_TITLE);
/// assert_eq!(config.title, "Mie Scattering Intensity");
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Rayleigh polarized intensities: linear and log panels
    pub fn intensity(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Rayleigh Scattering Intensity vs Scattering Angle".to_string()),
            ..Self::default()
        }
    }

    /// |S1|² and |S2|²: single log panel
    pub fn amplitude(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1000,
            height: 700,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Rayleigh Scattering Amplitudes".to_string()),
            ylabel: "|S(θ)|²".to_string(),
            layout: PanelLayout::Single(AxisScale::Log),
            ..Self::default()
        }
    }

    /// Mie 2×2 component grid, all panels logarithmic
    pub fn mie(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1200,
            height: 1000,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Mie Scattering Intensity".to_string()),
            xlabel: "Scattering angle (θ) [degrees]".to_string(),
            layout: PanelLayout::Single(AxisScale::Log),
            show_table: false,
            ..Self::default()
        }
    }

    /// One curve per swept value, linear and log panels
    pub fn sweep(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Scattering Intensity Sweep".to_string()),
            ..Self::default()
        }
    }

    /// Builder pattern: set custom curve colors
    pub fn with_series_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = Some(colors);
        self
    }

    /// Builder pattern: set panel layout
    pub fn with_layout(mut self, layout: PanelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Non-zero size and line width, non-empty custom palette
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "plot size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.line_width == 0 {
            return Err("line width must be at least 1 pixel".to_string());
        }
        if let Some(colors) = &self.series_colors
            && colors.is_empty()
        {
            return Err("custom series palette is empty".to_string());
        }
        Ok(())
    }

    /// Get color for curve at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && index < colors.len()
        {
            return colors[index];
        }

        const DEFAULT_COLORS: [RGBColor; 10] = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),   // Orange
            RGBColor(128, 0, 128),   // Purple
            RGBColor(255, 192, 203), // Pink
            RGBColor(165, 42, 42),   // Brown
        ];

        DEFAULT_COLORS[index % DEFAULT_COLORS.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
