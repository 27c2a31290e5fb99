//! Integration tests: models + exporters
//!
//! Writes real files into temporary directories and reads CSV output back.

use std::fs;

use scatter_rs::models::{MieScattering, RayleighAmplitude, RayleighIntensity};
use scatter_rs::output::export::{
    CsvConfig, CsvExporter, CsvMetadata, ExportError, Exporter, NumberFormat, TableLayout,
    XlsxExporter, read_csv_table,
};
use scatter_rs::physics::{
    Length, LengthUnit, RefractiveIndex, ScatteringModel, ScatteringParameters,
    ScatteringQuantity,
};
use scatter_rs::solver::{AngleGrid, ParameterSweep, SweepParameter};

mod common;
use common::{assert_series_close, water_droplet};

#[test]
fn test_amplitude_csv_round_trip() {
    let model = RayleighAmplitude::new(water_droplet());
    let result = model.compute(&AngleGrid::standard()).unwrap();
    let layout = TableLayout::rayleigh_amplitudes();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rayleigh_scattering_data.csv");
    let config = CsvConfig::default().with_metadata(CsvMetadata::from_model(&model));
    CsvExporter::new(config.clone())
        .export_single(&result, &layout, &path)
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# Model: Rayleigh Amplitude\n"));
    assert!(content.contains("Scattering Angle (degrees),S1,S2\n"));

    let table = read_csv_table(&path, &config).unwrap();
    assert_eq!(table.rows(), 1801);

    let back = table.to_result(&layout).unwrap();
    assert_series_close(back.angles(), result.angles(), 1e-15, "angles");
    for q in [ScatteringQuantity::S1, ScatteringQuantity::S2] {
        assert_series_close(back.get(q).unwrap(), result.get(q).unwrap(), 1e-15, "amplitudes");
    }
}

#[test]
fn test_intensity_csv_european_round_trip() {
    let result = RayleighIntensity::new(water_droplet())
        .compute(&AngleGrid::linspace(0.0, 180.0, 1000).unwrap())
        .unwrap();
    let layout = TableLayout::rayleigh_intensities();
    let config = CsvConfig::european().value_format(NumberFormat::Scientific(12));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rayleigh_intensity.csv");
    CsvExporter::new(config.clone())
        .export_single(&result, &layout, &path)
        .unwrap();

    let back = read_csv_table(&path, &config)
        .unwrap()
        .to_result(&layout)
        .unwrap();
    assert_eq!(back.len(), 1000);
    for q in [ScatteringQuantity::Parallel, ScatteringQuantity::Perpendicular] {
        assert_series_close(back.get(q).unwrap(), result.get(q).unwrap(), 1e-11, "intensities");
    }
}

#[test]
fn test_mie_csv_layout() {
    let model = MieScattering::new(ScatteringParameters::new(
        Length::nanometers(650.0),
        Length::nanometers(1000.0),
        RefractiveIndex::complex(1.33257, 1.67e-8),
    ));
    let result = model.compute(&AngleGrid::standard()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mie_data.csv");
    CsvExporter::default()
        .export_single(&result, &TableLayout::mie(), &path)
        .unwrap();

    let table = read_csv_table(&path, &CsvConfig::default()).unwrap();
    assert_eq!(
        table.headers,
        vec!["Angle(degree)", "Perpendicular", "Parallel", "Unpolarized"]
    );
    assert_eq!(table.rows(), 361);

    let su = table.column("Unpolarized").unwrap();
    let sl = table.column("Perpendicular").unwrap();
    let sr = table.column("Parallel").unwrap();
    for i in 0..361 {
        assert!((su[i] - 0.5 * (sl[i] + sr[i])).abs() <= 1e-12 * su[i].abs().max(1e-300));
    }
}

#[test]
fn test_csv_sweep_one_file_per_value() {
    let sweep = ParameterSweep::range(
        water_droplet(),
        SweepParameter::ObserverDistance(LengthUnit::Centimeter),
        2.1,
        2.5,
        0.1,
    )
    .unwrap()
    .run(&AngleGrid::standard(), RayleighIntensity::new)
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("distances");
    CsvExporter::default()
        .export_sweep(&sweep, &TableLayout::distance_sheet(), &out)
        .unwrap();

    for name in ["d_cm_2.1", "d_cm_2.2", "d_cm_2.3", "d_cm_2.4", "d_cm_2.5"] {
        let file = out.join(format!("{}.csv", name));
        let table = read_csv_table(&file, &CsvConfig::default()).unwrap();
        assert_eq!(table.rows(), 1801);
        assert_eq!(table.headers[1], "Intensity Perpendicular");
    }
    assert_eq!(fs::read_dir(&out).unwrap().count(), 5);
}

#[test]
fn test_xlsx_sweep_and_single() {
    let sweep = ParameterSweep::new(
        water_droplet(),
        SweepParameter::Radius(LengthUnit::Micrometer),
        vec![0.001, 0.01, 0.1],
    )
    .run(&AngleGrid::standard(), RayleighIntensity::new)
    .unwrap();

    let exporter = XlsxExporter::default();
    assert_eq!(
        exporter.sheet_names_for(&sweep).unwrap(),
        vec!["r_um_0.001", "r_um_0.01", "r_um_0.1"]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("radii.xlsx");
    exporter
        .export_sweep(&sweep, &TableLayout::rayleigh_intensities(), &path)
        .unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);

    let single = dir.path().join("single.xlsx");
    exporter
        .export_single(&sweep.entries()[0].result, &TableLayout::rayleigh_intensities(), &single)
        .unwrap();
    assert!(single.exists());
}

#[test]
fn test_failed_export_leaves_no_file() {
    let result = RayleighIntensity::new(water_droplet())
        .compute(&AngleGrid::standard())
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("amplitudes.csv");
    let err = CsvExporter::default()
        .export_single(&result, &TableLayout::rayleigh_amplitudes(), &csv_path)
        .unwrap_err();
    assert!(matches!(err, ExportError::MissingQuantity(_)));

    let xlsx_path = dir.path().join("amplitudes.xlsx");
    assert!(XlsxExporter::default()
        .export_single(&result, &TableLayout::rayleigh_amplitudes(), &xlsx_path)
        .is_err());

    assert!(!csv_path.exists());
    assert!(!xlsx_path.exists());
}
