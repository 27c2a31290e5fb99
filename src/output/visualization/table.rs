//! Parameter table drawn inside a plot panel
//!
//! A small two-column key/value box listing the inputs of a computation (λ, r, n, d, I₀),
//! anchored to the lower-right corner of the panel it is drawn on.

use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::physics::{ScatteringModel, ScatteringParameters};

/// Key/value rows rendered as a boxed table
///
/// # Example
///
/// ```rust
/// use scatter_rs::output::visualization::ParameterTable;
/// use scatter_rs::physics::{Length, ScatteringParameters};
///
/// let params = ScatteringParameters::new(
///     Length::nanometers(650.0),
///     Length::micrometers(0.01),
///     1.33257,
/// )
/// .with_observer_distance(Length::centimeters(4.0));
///
/// let table = ParameterTable::from_parameters(&params).without("Observer Distance (d)");
/// assert_eq!(table.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    rows: Vec<(String, String)>,

    /// Optional column titles, e.g. ("Input Parameters", "Values")
    pub header: Option<(String, String)>,

    /// Font size in pixels (default: 14)
    pub font_size: u32,

    /// Distance from the panel's right and bottom edges, in pixels
    pub offset: (i32, i32),
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            header: None,
            font_size: 14,
            offset: (30, 70),
        }
    }
}

/// Pixel geometry of a table inside a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TableGeometry {
    pub top_left: (i32, i32),
    pub bottom_right: (i32, i32),
    pub key_width: i32,
    pub row_height: i32,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<(String, String)>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Rows from [`ScatteringParameters::table_rows`]
    pub fn from_parameters(params: &ScatteringParameters) -> Self {
        Self::from_rows(params.table_rows())
    }

    /// Rows from [`ScatteringModel::parameters`]
    pub fn from_model(model: &dyn ScatteringModel) -> Self {
        Self::from_rows(model.parameters())
    }

    /// Drop the row with the given key (the swept parameter of a sweep plot)
    pub fn without(mut self, key: &str) -> Self {
        self.rows.retain(|(k, _)| k != key);
        self
    }

    /// Builder pattern: column titles
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.header = Some((key.into(), value.into()));
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.rows.push((key.into(), value.into()));
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn all_rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Width estimate for sans-serif text
    fn text_width(&self, text: &str) -> i32 {
        (text.chars().count() as f64 * self.font_size as f64 * 0.6).ceil() as i32
    }

    /// Box position in a panel of `size` pixels
    pub(crate) fn geometry(&self, size: (u32, u32)) -> TableGeometry {
        let padding = (self.font_size / 2) as i32;
        let row_height = (self.font_size as f64 * 1.5).round() as i32;

        let key_width = self
            .all_rows()
            .map(|(k, _)| self.text_width(k))
            .max()
            .unwrap_or(0)
            + 2 * padding;
        let value_width = self
            .all_rows()
            .map(|(_, v)| self.text_width(v))
            .max()
            .unwrap_or(0)
            + 2 * padding;
        let height = row_height * self.all_rows().count() as i32;

        let right = size.0 as i32 - self.offset.0;
        let bottom = size.1 as i32 - self.offset.1;
        TableGeometry {
            top_left: ((right - key_width - value_width).max(0), (bottom - height).max(0)),
            bottom_right: (right, bottom),
            key_width,
            row_height,
        }
    }

    /// Draw the table on `area` (pixel coordinates)
    pub fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static,
    {
        if self.is_empty() {
            return Ok(());
        }

        let geometry = self.geometry(area.dim_in_pixel());
        let (x0, y0) = geometry.top_left;
        let (x1, y1) = geometry.bottom_right;
        let split = x0 + geometry.key_width;
        let padding = (self.font_size / 2) as i32;
        let font = ("sans-serif", self.font_size as f64).into_font();

        area.draw(&Rectangle::new([(x0, y0), (x1, y1)], WHITE.filled()))?;
        area.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1)))?;
        area.draw(&PathElement::new(vec![(split, y0), (split, y1)], &BLACK))?;

        for (i, (key, value)) in self.all_rows().enumerate() {
            let top = y0 + i as i32 * geometry.row_height;
            if i > 0 {
                area.draw(&PathElement::new(vec![(x0, top), (x1, top)], &BLACK))?;
            }
            let baseline = top + (geometry.row_height - self.font_size as i32) / 2;
            area.draw(&Text::new(key.to_string(), (x0 + padding, baseline), font.clone()))?;
            area.draw(&Text::new(value.to_string(), (split + padding, baseline), font.clone()))?;
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Length;

    fn params() -> ScatteringParameters {
        ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.01), 1.33257)
            .with_observer_distance(Length::centimeters(4.0))
            .with_incident_intensity(1.0)
    }

    #[test]
    fn test_rows_from_parameters() {
        let table = ParameterTable::from_parameters(&params());
        assert_eq!(table.len(), 5);
        assert_eq!(table.rows()[0], ("λ".to_string(), "650 nm".to_string()));
    }

    #[test]
    fn test_without_and_push() {
        let mut table = ParameterTable::from_parameters(&params()).without("Radius of particle (r)");
        assert_eq!(table.len(), 4);
        assert!(table.rows().iter().all(|(k, _)| !k.starts_with("Radius")));

        table.push("Note", "x");
        assert_eq!(table.len(), 5);
        assert!(ParameterTable::new().is_empty());
    }

    #[test]
    fn test_geometry_inside_panel() {
        let table = ParameterTable::from_parameters(&params()).with_header("Input Parameters", "Values");
        let g = table.geometry((700, 600));

        assert_eq!(g.bottom_right, (670, 530));
        assert!(g.top_left.0 >= 0 && g.top_left.0 < g.bottom_right.0);
        assert_eq!(g.bottom_right.1 - g.top_left.1, 6 * g.row_height);
        assert!(g.key_width > 0);
    }

    #[test]
    fn test_geometry_clamped_on_tiny_panel() {
        let g = ParameterTable::from_parameters(&params()).geometry((50, 50));
        assert_eq!(g.top_left, (0, 0));
    }
}
