//! Demo: Rayleigh Data Extraction
//!
//! Writes the tables of the Rayleigh workflows:
//!
//! - `rayleigh_scattering_data.csv`: S1 and S2 every 0.1°
//! - `rayleigh_intensity.csv`: I∥ and I⊥ at d = 3 cm, with a metadata header
//! - `rayleigh_intensity_distances.xlsx`: one worksheet per distance, d = 2.1 … 5.0 cm
//!
//! The amplitude CSV is read back to check the round trip.

use scatter_rs::{
    models::{RayleighAmplitude, RayleighIntensity},
    output::export::{
        CsvConfig, CsvExporter, CsvMetadata, Exporter, TableLayout, XlsxExporter, read_csv_table,
    },
    physics::{Length, LengthUnit, ScatteringModel, ScatteringParameters, ScatteringQuantity},
    solver::{AngleGrid, ParameterSweep, SweepParameter},
};

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = ScatteringParameters::new(
        Length::nanometers(650.0),
        Length::micrometers(0.01),
        1.33257,
    );
    let grid = AngleGrid::standard();
    let out_dir = std::env::temp_dir().join("scatter_rs");
    std::fs::create_dir_all(&out_dir)?;

    // ====== S1, S2 ======

    print_section("Amplitudes S1, S2");

    let amplitude = RayleighAmplitude::new(params);
    let amplitudes = amplitude.compute(&grid)?;
    let layout = TableLayout::rayleigh_amplitudes();
    let path = out_dir.join("rayleigh_scattering_data.csv");
    CsvExporter::default().export_single(&amplitudes, &layout, &path)?;
    println!("  ✓ {} ({} rows)", path.display(), amplitudes.len());

    let back = read_csv_table(&path, &CsvConfig::default())?.to_result(&layout)?;
    let original = amplitudes.get(ScatteringQuantity::S2).ok_or("missing S2")?;
    let restored = back.get(ScatteringQuantity::S2).ok_or("missing S2")?;
    println!("  round trip max |ΔS2| = {:.3e}", (original - restored).amax());

    // ====== Intensities at d = 3 cm ======

    print_section("Intensities at d = 3 cm");

    let intensity = RayleighIntensity::new(
        params
            .with_incident_intensity(1.0)
            .with_observer_distance(Length::centimeters(3.0)),
    );
    let intensities = intensity.compute(&grid)?;

    let mut metadata = CsvMetadata::from_model(&intensity);
    metadata.add_custom("Angle step", "0.1°");
    let exporter = CsvExporter::new(CsvConfig::default().with_metadata(metadata));
    let path = out_dir.join("rayleigh_intensity.csv");
    exporter.export_single(&intensities, &TableLayout::rayleigh_intensities(), &path)?;
    println!("  ✓ {}", path.display());

    // ====== Distance range to XLSX ======

    print_section("Distance range d = 2.1 … 5.0 cm");

    let sweep = ParameterSweep::range(
        params.with_incident_intensity(1.0),
        SweepParameter::ObserverDistance(LengthUnit::Centimeter),
        2.1,
        5.0,
        0.1,
    )?
    .run(&grid, RayleighIntensity::new)?;

    let xlsx = XlsxExporter::default();
    let sheets = xlsx.sheet_names_for(&sweep)?;
    println!(
        "  {} worksheets: {} … {}",
        sheets.len(),
        sheets.first().unwrap_or(&"-"),
        sheets.last().unwrap_or(&"-")
    );

    let path = out_dir.join("rayleigh_intensity_distances.xlsx");
    xlsx.export_sweep(&sweep, &TableLayout::distance_sheet(), &path)?;
    println!("  ✓ {}", path.display());

    Ok(())
}
