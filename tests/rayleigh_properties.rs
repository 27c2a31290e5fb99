//! Integration tests: Rayleigh models + scenarios + sweeps
//!
//! Checks the closed-form formulas end to end, through the public API only.

use std::f64::consts::PI;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use scatter_rs::error::ScatteringError;
use scatter_rs::models::{RayleighAmplitude, RayleighIntensity};
use scatter_rs::output::export::{Exporter, TableLayout, XlsxExporter};
use scatter_rs::physics::{
    Length, LengthUnit, RefractiveIndex, ScatteringModel, ScatteringParameters,
    ScatteringQuantity,
};
use scatter_rs::solver::{AngleGrid, ParameterSweep, Scenario, SweepParameter};

mod common;
use common::{IsotropicModel, assert_series_close, relative_error, water_droplet};

/// Entry of an XLSX package as text
fn xlsx_part(path: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut text = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    text
}

// =================================================================================================
// Reference scenario
// =================================================================================================

#[test]
fn test_reference_intensity() {
    let result = RayleighIntensity::new(water_droplet())
        .compute(&AngleGrid::standard())
        .unwrap();

    let perp = result.get(ScatteringQuantity::Perpendicular).unwrap();
    let par = result.get(ScatteringQuantity::Parallel).unwrap();

    // I⊥ = 16π⁴r⁶/(λ⁴d²)·K², K = (n²−1)/(n²+2)
    let expected = 4.0950031745335075e-19;
    assert!(relative_error(perp[0], expected) < 1e-12);
    assert!(perp.iter().all(|v| *v == perp[0]));

    assert_eq!(par[0], perp[0]);
    assert!(par[900] < 1e-30 * perp[0]);
    assert!(relative_error(par[1800], perp[0]) < 1e-12);
}

#[test]
fn test_parallel_is_perpendicular_cos_squared() {
    let result = RayleighIntensity::new(water_droplet())
        .compute(&AngleGrid::linspace(0.0, 180.0, 1000).unwrap())
        .unwrap();

    let perp = result.get(ScatteringQuantity::Perpendicular).unwrap();
    let expected = result.angles().map(|deg| perp[0] * deg.to_radians().cos().powi(2));
    assert_series_close(
        result.get(ScatteringQuantity::Parallel).unwrap(),
        &expected,
        1e-12,
        "I∥ = I⊥·cos²θ",
    );
}

#[test]
fn test_reference_amplitude() {
    let result = RayleighAmplitude::new(water_droplet())
        .compute(&AngleGrid::standard())
        .unwrap();

    let s1 = result.get(ScatteringQuantity::S1).unwrap();
    let s2 = result.get(ScatteringQuantity::S2).unwrap();

    // S1 = (2πr/λ)²·K
    assert!(relative_error(s1[0], 0.0019197663548151261) < 1e-12);
    assert_eq!(result.get_metadata("s1_imag"), Some(0.0));

    let expected = result.angles().map(|deg| s1[0] * deg.to_radians().cos());
    assert_series_close(s2, &expected, 1e-14, "S2 = S1·cosθ");
    assert!(s2[900].abs() < 1e-15);
}

#[test]
fn test_absorbing_particle_amplitude_is_complex() {
    let params = water_droplet().with_refractive_index(RefractiveIndex::complex(1.5, 0.1));
    let result = RayleighAmplitude::new(params)
        .compute(&AngleGrid::standard())
        .unwrap();

    let imag = result.get_metadata("s1_imag").unwrap();
    assert!(imag.abs() > 0.0);
    let s1_sq = result.get(ScatteringQuantity::S1Squared).unwrap()[0];
    let s1_re = result.get_metadata("s1_real").unwrap();
    assert!(relative_error(s1_sq, s1_re * s1_re + imag * imag) < 1e-12);
}

// =================================================================================================
// Scaling laws
// =================================================================================================

#[test]
fn test_radius_sixth_power() {
    let grid = AngleGrid::linspace(0.0, 180.0, 5).unwrap();
    let small = RayleighIntensity::new(water_droplet()).compute(&grid).unwrap();
    let large = RayleighIntensity::new(water_droplet().with_radius(Length::micrometers(0.02)))
        .compute(&grid)
        .unwrap();

    let ratio = large.get(ScatteringQuantity::Perpendicular).unwrap()[0]
        / small.get(ScatteringQuantity::Perpendicular).unwrap()[0];
    assert!(relative_error(ratio, 64.0) < 1e-12);
}

#[test]
fn test_wavelength_inverse_fourth_power() {
    let grid = AngleGrid::linspace(0.0, 180.0, 5).unwrap();
    let red = RayleighIntensity::new(water_droplet()).compute(&grid).unwrap();
    let blue = RayleighIntensity::new(water_droplet().with_wavelength(Length::nanometers(325.0)))
        .compute(&grid)
        .unwrap();

    let ratio = blue.get(ScatteringQuantity::Perpendicular).unwrap()[0]
        / red.get(ScatteringQuantity::Perpendicular).unwrap()[0];
    assert!(relative_error(ratio, 16.0) < 1e-12);
}

// =================================================================================================
// Domain of validity
// =================================================================================================

#[test]
fn test_radius_equal_to_wavelength_is_rejected() {
    let params = water_droplet().with_radius(Length::nanometers(650.0));
    let err = RayleighIntensity::new(params)
        .compute(&AngleGrid::standard())
        .unwrap_err();
    assert!(err.is_domain());
}

#[test]
fn test_domain_check_uses_meters() {
    // 0.5 μm < 650 nm even though 0.5 < 650 and 0.7 μm > 650 nm even though 0.7 < 650
    let ok = water_droplet().with_radius(Length::micrometers(0.5));
    assert!(RayleighAmplitude::new(ok).compute(&AngleGrid::standard()).is_ok());

    let too_big = water_droplet().with_radius(Length::micrometers(0.7));
    match RayleighAmplitude::new(too_big).compute(&AngleGrid::standard()) {
        Err(ScatteringError::Domain { radius_m, wavelength_m }) => {
            assert!(relative_error(radius_m, 7e-7) < 1e-12);
            assert!(relative_error(wavelength_m, 6.5e-7) < 1e-12);
        }
        other => panic!("expected a domain error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_missing_distance() {
    let params = ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.01), 1.33257);
    assert!(matches!(
        RayleighIntensity::new(params).compute(&AngleGrid::standard()),
        Err(ScatteringError::MissingParameter(_))
    ));
}

// =================================================================================================
// Scenario
// =================================================================================================

#[test]
fn test_scenario_runs_model() {
    let scenario = Scenario::new(
        Box::new(RayleighIntensity::new(water_droplet())),
        AngleGrid::linspace(0.0, 180.0, 1000).unwrap(),
    );
    assert_eq!(scenario.get_model_name(), "Rayleigh Intensity");

    let result = scenario.run().unwrap();
    assert_eq!(result.len(), 1000);
    assert_eq!(result.angles()[999], 180.0);
}

#[test]
fn test_scenario_rejects_non_finite_output() {
    let scenario = Scenario::new(Box::new(IsotropicModel::new(f64::INFINITY)), AngleGrid::standard());
    assert!(matches!(scenario.run(), Err(ScatteringError::NonFinite { .. })));
}

// =================================================================================================
// Sweeps
// =================================================================================================

#[test]
fn test_distance_sweep_thirty_sheets_of_1801_rows() {
    let base = water_droplet();
    let sweep = ParameterSweep::range(
        base,
        SweepParameter::ObserverDistance(LengthUnit::Centimeter),
        2.1,
        5.0,
        0.1,
    )
    .unwrap()
    .run(&AngleGrid::standard(), RayleighIntensity::new)
    .unwrap();

    assert_eq!(sweep.len(), 30);
    let names = sweep.sheet_names();
    assert_eq!(names[0], "d_cm_2.1");
    assert_eq!(names[29], "d_cm_5.0");
    assert!(sweep.iter().all(|e| e.result.len() == 1801));

    // Same d as the reference scenario gives the same intensity
    let at_3cm = sweep.iter().find(|e| e.sheet_name == "d_cm_3.0").unwrap();
    let perp = at_3cm.result.get(ScatteringQuantity::Perpendicular).unwrap()[0];
    assert!(relative_error(perp, 4.0950031745335075e-19) < 1e-9);

    // One worksheet per distance
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rayleigh_scattering_data.xlsx");
    XlsxExporter::default()
        .export_sweep(&sweep, &TableLayout::distance_sheet(), &path)
        .unwrap();

    let workbook = xlsx_part(&path, "xl/workbook.xml");
    assert_eq!(workbook.matches("<sheet ").count(), 30);
    for name in &names {
        assert!(workbook.contains(&format!("name=\"{}\"", name)), "missing sheet {}", name);
    }

    let strings = xlsx_part(&path, "xl/sharedStrings.xml");
    for header in TableLayout::distance_sheet().headers() {
        assert!(strings.contains(header), "missing header {}", header);
    }

    // Header row plus one row per angle on every worksheet
    for i in 1..=30 {
        let sheet = xlsx_part(&path, &format!("xl/worksheets/sheet{}.xml", i));
        assert_eq!(sheet.matches("<row r=").count(), 1802, "sheet{}", i);
        assert!(sheet.contains("<row r=\"1802\""));
    }
}

#[test]
fn test_radius_sweep_ordering() {
    let radii = vec![0.0001, 0.001, 0.01, 0.1];
    let sweep = ParameterSweep::new(water_droplet(), SweepParameter::Radius(LengthUnit::Micrometer), radii.clone())
        .run(&AngleGrid::standard(), RayleighIntensity::new)
        .unwrap();

    let values: Vec<f64> = sweep.iter().map(|e| e.value).collect();
    assert_eq!(values, radii);
    assert_eq!(sweep.entries()[2].label, "r = 0.01 μm");

    let peaks: Vec<f64> = sweep
        .iter()
        .map(|e| e.result.get(ScatteringQuantity::Parallel).unwrap()[0])
        .collect();
    for w in peaks.windows(2) {
        assert!(relative_error(w[1] / w[0], 1e6) < 1e-9);
    }
}

#[test]
fn test_wavelength_sweep_with_amplitudes() {
    let sweep = ParameterSweep::new(
        water_droplet(),
        SweepParameter::Wavelength(LengthUnit::Nanometer),
        vec![450.0, 550.0, 650.0],
    )
    .run(&AngleGrid::standard(), RayleighAmplitude::new)
    .unwrap();

    let s1: Vec<f64> = sweep
        .iter()
        .map(|e| e.result.get(ScatteringQuantity::S1).unwrap()[0])
        .collect();
    let k = RefractiveIndex::real(1.33257).lorentz_lorenz().re;
    for (entry, value) in sweep.iter().zip(&s1) {
        let x = 2.0 * PI * 1e-8 / (entry.value * 1e-9);
        assert!(relative_error(*value, x * x * k) < 1e-12);
    }
}
