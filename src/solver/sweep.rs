//! Parameter sweeps
//!
//! A sweep evaluates the same model family once per value of one parameter (wavelength,
//! radius or observer distance), the other parameters held at a base value. Iterations are
//! independent; with the `parallel` feature they run on the rayon pool, and the result order
//! always matches the value order.

use crate::error::Result;
use crate::physics::{Length, LengthUnit, ScatteringModel, ScatteringParameters, ScatteringResult};
use crate::solver::grid::{AngleGrid, lattice};

/// Digits kept when building range values, so 2.1 + 0.1 reads 2.2
const RANGE_DECIMALS: i32 = 12;

// =================================================================================================
// Swept parameter
// =================================================================================================

/// Which parameter varies, and the unit its values are given in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepParameter {
    Wavelength(LengthUnit),
    Radius(LengthUnit),
    ObserverDistance(LengthUnit),
}

impl SweepParameter {
    /// Symbol used in labels
    pub fn symbol(&self) -> &'static str {
        match self {
            SweepParameter::Wavelength(_) => "λ",
            SweepParameter::Radius(_) => "r",
            SweepParameter::ObserverDistance(_) => "d",
        }
    }

    fn ascii_name(&self) -> &'static str {
        match self {
            SweepParameter::Wavelength(_) => "lambda",
            SweepParameter::Radius(_) => "r",
            SweepParameter::ObserverDistance(_) => "d",
        }
    }

    pub fn unit(&self) -> LengthUnit {
        match self {
            SweepParameter::Wavelength(unit)
            | SweepParameter::Radius(unit)
            | SweepParameter::ObserverDistance(unit) => *unit,
        }
    }

    /// Copy of `base` with this parameter set to `value`
    pub fn apply(&self, base: &ScatteringParameters, value: f64) -> ScatteringParameters {
        let length = Length::new(value, self.unit());
        match self {
            SweepParameter::Wavelength(_) => base.with_wavelength(length),
            SweepParameter::Radius(_) => base.with_radius(length),
            SweepParameter::ObserverDistance(_) => base.with_observer_distance(length),
        }
    }

    /// Key of this parameter in [`ScatteringParameters::table_rows`]
    pub fn table_key(&self) -> &'static str {
        match self {
            SweepParameter::Wavelength(_) => "λ",
            SweepParameter::Radius(_) => "Radius of particle (r)",
            SweepParameter::ObserverDistance(_) => "Observer Distance (d)",
        }
    }

    /// Legend label, e.g. `d = 2.1 cm`
    pub fn label(&self, value: f64) -> String {
        format!("{} = {}", self.symbol(), Length::new(value, self.unit()))
    }

    /// Sheet or file stem, e.g. `d_cm_2.1`
    ///
    /// Distances always carry one decimal; other parameters use the shortest representation.
    pub fn sheet_name(&self, value: f64) -> String {
        let unit = self.unit().ascii_symbol();
        match self {
            SweepParameter::ObserverDistance(_) => format!("d_{}_{:.1}", unit, value),
            _ => format!("{}_{}_{}", self.ascii_name(), unit, value),
        }
    }
}

// =================================================================================================
// Sweep definition
// =================================================================================================

/// One parameter varied over a list of values
///
/// # Example
///
/// ```rust
/// use scatter_rs::models::RayleighIntensity;
/// use scatter_rs::physics::{Length, LengthUnit, ScatteringParameters};
/// use scatter_rs::solver::{AngleGrid, ParameterSweep, SweepParameter};
///
/// let base = ScatteringParameters::new(
///     Length::nanometers(650.0),
///     Length::micrometers(0.01),
///     1.33257,
/// )
/// .with_observer_distance(Length::centimeters(3.0));
///
/// let sweep = ParameterSweep::range(
///     base,
///     SweepParameter::ObserverDistance(LengthUnit::Centimeter),
///     2.1,
///     5.0,
///     0.1,
/// )
/// .unwrap();
/// assert_eq!(sweep.len(), 30);
///
/// let result = sweep.run(&AngleGrid::standard(), RayleighIntensity::new).unwrap();
/// assert_eq!(result.entries()[0].sheet_name, "d_cm_2.1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSweep {
    base: ScatteringParameters,
    parameter: SweepParameter,
    values: Vec<f64>,
}

impl ParameterSweep {
    pub fn new(base: ScatteringParameters, parameter: SweepParameter, values: Vec<f64>) -> Self {
        Self {
            base,
            parameter,
            values,
        }
    }

    /// Inclusive range `start..=stop` every `step`, built like [`AngleGrid::stepped`]
    pub fn range(
        base: ScatteringParameters,
        parameter: SweepParameter,
        start: f64,
        stop: f64,
        step: f64,
    ) -> Result<Self> {
        let (segments, end) = lattice(start, stop, step)?;
        let scale = 10f64.powi(RANGE_DECIMALS);
        let values = (0..=segments)
            .map(|i| {
                let v = if segments == 0 {
                    start
                } else {
                    start + (end - start) * (i as f64) / (segments as f64)
                };
                (v * scale).round() / scale
            })
            .collect();
        Ok(Self::new(base, parameter, values))
    }

    pub fn base(&self) -> &ScatteringParameters {
        &self.base
    }

    pub fn parameter(&self) -> SweepParameter {
        self.parameter
    }

    /// Swept values, in the parameter's unit
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Parameter set for every swept value
    pub fn parameters(&self) -> Vec<ScatteringParameters> {
        self.values
            .iter()
            .map(|v| self.parameter.apply(&self.base, *v))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build one model per value with `build` and evaluate it on `grid`
    ///
    /// The first failing iteration aborts the whole sweep.
    pub fn run<M, F>(&self, grid: &AngleGrid, build: F) -> Result<SweepResult>
    where
        M: ScatteringModel,
        F: Fn(ScatteringParameters) -> M + Sync,
    {
        grid.validate()?;

        let evaluate = |value: &f64| -> Result<SweepEntry> {
            let model = build(self.parameter.apply(&self.base, *value));
            let result = model.compute(grid)?;
            crate::solver::validate_result(&result)?;
            Ok(SweepEntry {
                value: *value,
                label: self.parameter.label(*value),
                sheet_name: self.parameter.sheet_name(*value),
                result,
            })
        };

        #[cfg(feature = "parallel")]
        let entries: Result<Vec<SweepEntry>> = {
            use rayon::prelude::*;
            self.values.par_iter().map(evaluate).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let entries: Result<Vec<SweepEntry>> = self.values.iter().map(evaluate).collect();

        Ok(SweepResult {
            base: self.base,
            parameter: self.parameter,
            entries: entries?,
        })
    }
}

// =================================================================================================
// Sweep result
// =================================================================================================

/// Result of one sweep iteration
#[derive(Debug, Clone)]
pub struct SweepEntry {
    /// Swept value, in the parameter's unit
    pub value: f64,

    /// Legend label, e.g. `λ = 532 nm`
    pub label: String,

    /// Sheet or file stem, e.g. `d_cm_2.1`
    pub sheet_name: String,

    pub result: ScatteringResult,
}

/// All iterations of a sweep, in value order
#[derive(Debug, Clone)]
pub struct SweepResult {
    base: ScatteringParameters,
    parameter: SweepParameter,
    entries: Vec<SweepEntry>,
}

impl SweepResult {
    pub fn base(&self) -> &ScatteringParameters {
        &self.base
    }

    pub fn parameter(&self) -> SweepParameter {
        self.parameter
    }

    pub fn entries(&self) -> &[SweepEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SweepEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.sheet_name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a SweepResult {
    type Item = &'a SweepEntry;
    type IntoIter = std::slice::Iter<'a, SweepEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
