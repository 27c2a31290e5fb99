//! Length units
//!
//! Scattering inputs are given in whatever unit is natural for them (wavelength in nm,
//! radius in nm or μm, observer distance in cm). Every formula works in meters, so the
//! conversion happens once, through [`Length::to_meters`], before any comparison or evaluation.

use std::fmt;

/// Supported length units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// 1e-9 m
    Nanometer,
    /// 1e-6 m
    Micrometer,
    /// 1e-2 m
    Centimeter,
    /// SI base unit
    Meter,
}

impl LengthUnit {
    /// Multiplicative factor converting a value in this unit to meters
    pub fn to_meters_factor(&self) -> f64 {
        match self {
            LengthUnit::Nanometer => 1e-9,
            LengthUnit::Micrometer => 1e-6,
            LengthUnit::Centimeter => 1e-2,
            LengthUnit::Meter => 1.0,
        }
    }

    /// Unit symbol used in labels and tables
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Nanometer => "nm",
            LengthUnit::Micrometer => "μm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
        }
    }

    /// ASCII symbol, safe for file and sheet names
    pub fn ascii_symbol(&self) -> &'static str {
        match self {
            LengthUnit::Nanometer => "nm",
            LengthUnit::Micrometer => "um",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
        }
    }
}

/// A length carrying its unit
///
/// # Example
///
/// ```rust
/// use scatter_rs::physics::{Length, LengthUnit};
///
/// let wavelength = Length::nanometers(650.0);
/// let radius = Length::micrometers(0.01);
///
/// assert_eq!(wavelength.unit(), LengthUnit::Nanometer);
/// assert!(radius.to_meters() < wavelength.to_meters());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn nanometers(value: f64) -> Self {
        Self::new(value, LengthUnit::Nanometer)
    }

    pub fn micrometers(value: f64) -> Self {
        Self::new(value, LengthUnit::Micrometer)
    }

    pub fn centimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Centimeter)
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, LengthUnit::Meter)
    }

    /// Numeric value in the original unit
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Value converted to SI meters
    pub fn to_meters(&self) -> f64 {
        self.value * self.unit.to_meters_factor()
    }

    /// Value expressed in another unit
    pub fn in_unit(&self, unit: LengthUnit) -> f64 {
        self.to_meters() / unit.to_meters_factor()
    }

    /// Same length, re-expressed in another unit
    pub fn convert(&self, unit: LengthUnit) -> Self {
        Self::new(self.in_unit(unit), unit)
    }

    /// Scale the numeric value, keeping the unit
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.value * factor, self.unit)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}
