//! Angle grids
//!
//! An [`AngleGrid`] is the ordered set of scattering angles a model is evaluated on.
//! Angles are stored in degrees; radians are derived on demand.

use nalgebra::DVector;

use crate::error::{Result, ScatteringError};

/// Relative tolerance used to decide whether `stop` lies on the step lattice
const LATTICE_TOLERANCE: f64 = 1e-9;

/// Largest number of segments a stepped range may produce
const MAX_LATTICE_SEGMENTS: usize = 100_000_000;

/// Immutable, ordered scattering angles in degrees
///
/// # Example
///
/// ```rust
/// use scatter_rs::solver::AngleGrid;
///
/// let grid = AngleGrid::stepped(0.0, 180.0, 0.1).unwrap();
/// assert_eq!(grid.len(), 1801);
/// assert_eq!(grid.last(), Some(180.0));
///
/// let grid = AngleGrid::linspace(0.0, 180.0, 1000).unwrap();
/// assert_eq!(grid.len(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AngleGrid {
    degrees: DVector<f64>,
}

impl AngleGrid {
    /// Angles from `start` to `stop` every `step` degrees
    ///
    /// `stop` is included when it lies on the lattice `start + k·step`. Samples are
    /// computed as `start + span·i/segments` rather than by accumulation, so lattice
    /// points such as 0.3 come out as the nearest double to their decimal value.
    pub fn stepped(start: f64, stop: f64, step: f64) -> Result<Self> {
        let (segments, end) = lattice(start, stop, step)?;
        Ok(Self::from_lattice(start, end, segments))
    }

    /// `count` evenly spaced angles, both ends included
    pub fn linspace(start: f64, stop: f64, count: usize) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(ScatteringError::InvalidGrid(format!(
                "bounds must be finite (got {} to {})",
                start, stop
            )));
        }
        if stop < start {
            return Err(ScatteringError::InvalidGrid(format!(
                "stop {} is below start {}",
                stop, start
            )));
        }
        match count {
            0 => Err(ScatteringError::InvalidGrid(
                "a grid needs at least one angle".to_string(),
            )),
            1 => Ok(Self {
                degrees: DVector::from_element(1, start),
            }),
            n => Ok(Self::from_lattice(start, stop, n - 1)),
        }
    }

    /// 0° to 180° every 0.1° (1801 angles)
    pub fn standard() -> Self {
        Self::from_lattice(0.0, 180.0, 1800)
    }

    /// Grid from explicit angles in degrees
    pub fn from_degrees(degrees: Vec<f64>) -> Result<Self> {
        let grid = Self {
            degrees: DVector::from_vec(degrees),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Grid from angles in radians (as returned by Mie solvers)
    pub fn from_radians(radians: &[f64]) -> Result<Self> {
        Self::from_degrees(radians.iter().map(|r| r.to_degrees()).collect())
    }

    fn from_lattice(start: f64, end: f64, segments: usize) -> Self {
        if segments == 0 {
            return Self {
                degrees: DVector::from_element(1, start),
            };
        }
        let span = end - start;
        let n = segments as f64;
        Self {
            degrees: DVector::from_fn(segments + 1, |i, _| {
                if i == segments {
                    end
                } else {
                    start + span * (i as f64) / n
                }
            }),
        }
    }

    /// Check that the grid is non-empty, finite and in ascending order
    pub fn validate(&self) -> Result<()> {
        if self.degrees.is_empty() {
            return Err(ScatteringError::InvalidGrid(
                "a grid needs at least one angle".to_string(),
            ));
        }
        if let Some(i) = self.degrees.iter().position(|a| !a.is_finite()) {
            return Err(ScatteringError::InvalidGrid(format!(
                "angle at index {} is not finite",
                i
            )));
        }
        if let Some(i) = self
            .degrees
            .as_slice()
            .windows(2)
            .position(|w| w[1] < w[0])
        {
            return Err(ScatteringError::InvalidGrid(format!(
                "angles must be ascending (index {} to {})",
                i,
                i + 1
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Angles in degrees
    pub fn degrees(&self) -> &DVector<f64> {
        &self.degrees
    }

    /// Angles in radians
    pub fn radians(&self) -> DVector<f64> {
        self.degrees.map(f64::to_radians)
    }

    pub fn first(&self) -> Option<f64> {
        self.degrees.as_slice().first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.degrees.as_slice().last().copied()
    }

    /// Spacing between the first two angles
    pub fn step_hint(&self) -> Option<f64> {
        match self.degrees.as_slice() {
            [a, b, ..] => Some(b - a),
            _ => None,
        }
    }
}

/// Number of segments and the lattice end point for an inclusive stepped range
///
/// Shared with parameter sweeps, which build their value lists the same way.
pub(crate) fn lattice(start: f64, stop: f64, step: f64) -> Result<(usize, f64)> {
    if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
        return Err(ScatteringError::InvalidGrid(format!(
            "range must be finite (got {} to {} step {})",
            start, stop, step
        )));
    }
    if step <= 0.0 {
        return Err(ScatteringError::InvalidGrid(format!(
            "step must be strictly positive (got {})",
            step
        )));
    }
    if stop < start {
        return Err(ScatteringError::InvalidGrid(format!(
            "stop {} is below start {}",
            stop, start
        )));
    }

    let ratio = (stop - start) / step;
    if !ratio.is_finite() || ratio > MAX_LATTICE_SEGMENTS as f64 {
        return Err(ScatteringError::InvalidGrid(format!(
            "{} to {} step {} gives more than {} segments",
            start, stop, step, MAX_LATTICE_SEGMENTS
        )));
    }
    let nearest = ratio.round();

    if (ratio - nearest).abs() <= LATTICE_TOLERANCE * nearest.max(1.0) {
        Ok((nearest as usize, stop))
    } else {
        let segments = ratio.floor() as usize;
        Ok((segments, start + segments as f64 * step))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_grid() {
        let grid = AngleGrid::standard();
        assert_eq!(grid.len(), 1801);
        assert_eq!(grid.first(), Some(0.0));
        assert_eq!(grid.last(), Some(180.0));
        assert_eq!(grid, AngleGrid::stepped(0.0, 180.0, 0.1).unwrap());
    }

    #[test]
    fn test_stepped_lattice_points_are_exact() {
        let grid = AngleGrid::stepped(0.0, 180.0, 0.1).unwrap();
        assert_eq!(grid.degrees()[3], 0.3);
        assert_eq!(grid.degrees()[900], 90.0);
    }

    #[test]
    fn test_stepped_stop_off_lattice() {
        let grid = AngleGrid::stepped(0.0, 10.0, 3.0).unwrap();
        assert_eq!(grid.degrees().as_slice(), &[0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_stepped_single_point() {
        let grid = AngleGrid::stepped(45.0, 45.0, 1.0).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.step_hint(), None);
    }

    #[test]
    fn test_stepped_rejects_bad_step() {
        assert!(AngleGrid::stepped(0.0, 180.0, 0.0).is_err());
        assert!(AngleGrid::stepped(0.0, 180.0, -1.0).is_err());
        assert!(AngleGrid::stepped(10.0, 0.0, 1.0).is_err());
        assert!(AngleGrid::stepped(0.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_stepped_rejects_huge_segment_count() {
        for step in [1e-300, f64::MIN_POSITIVE, 1e-7] {
            assert!(matches!(
                AngleGrid::stepped(0.0, 180.0, step),
                Err(ScatteringError::InvalidGrid(_))
            ));
        }
        assert!(matches!(
            AngleGrid::stepped(-f64::MAX, f64::MAX, 1.0),
            Err(ScatteringError::InvalidGrid(_))
        ));
        assert_eq!(AngleGrid::stepped(0.0, 180.0, 1e-4).unwrap().len(), 1_800_001);
    }

    #[test]
    fn test_linspace() {
        let grid = AngleGrid::linspace(0.0, 180.0, 1000).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.first(), Some(0.0));
        assert_eq!(grid.last(), Some(180.0));
        assert!((grid.step_hint().unwrap() - 180.0 / 999.0).abs() < 1e-12);

        assert!(AngleGrid::linspace(0.0, 180.0, 0).is_err());
        assert_eq!(AngleGrid::linspace(5.0, 180.0, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_from_radians() {
        let grid = AngleGrid::from_radians(&[0.0, std::f64::consts::FRAC_PI_2, std::f64::consts::PI])
            .unwrap();
        assert_eq!(grid.degrees().as_slice(), &[0.0, 90.0, 180.0]);
        assert!((grid.radians()[2] - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn test_validation() {
        assert!(AngleGrid::from_degrees(vec![]).is_err());
        assert!(AngleGrid::from_degrees(vec![0.0, f64::INFINITY]).is_err());
        assert!(AngleGrid::from_degrees(vec![10.0, 0.0]).is_err());
        assert!(AngleGrid::from_degrees(vec![-30.0, 0.0, 390.0]).is_ok());
    }

    #[test]
    fn test_lattice_sweep_range() {
        let (segments, end) = lattice(2.1, 5.0, 0.1).unwrap();
        assert_eq!(segments, 29);
        assert_eq!(end, 5.0);
    }
}
