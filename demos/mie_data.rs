//! Demo: Mie Data Extraction
//!
//! SL, SR and SU of a 1 μm droplet at 630 nm every 0.1° (1801 angles), written as
//! `mie_data.csv` and `mie_data.xlsx` with the `Angle(degree), Perpendicular, Parallel,
//! Unpolarized` layout.

use scatter_rs::{
    models::MieScattering,
    output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter, TableLayout, XlsxExporter},
    physics::{Length, RefractiveIndex, ScatteringModel, ScatteringParameters},
    solver::{AngleGrid, MieConfiguration},
};

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    print_section("Mie Data Extraction");

    let params = ScatteringParameters::new(
        Length::nanometers(630.0),
        Length::nanometers(1000.0),
        RefractiveIndex::complex(1.33257, 1.67e-8),
    );
    let model = MieScattering::new(params)
        .with_configuration(MieConfiguration::default().with_angular_resolution(0.1));

    let result = model.compute(&AngleGrid::standard())?;
    println!("  x = {:.4}, {} angles", model.size_parameter(), result.len());

    let out_dir = std::env::temp_dir().join("scatter_rs");
    std::fs::create_dir_all(&out_dir)?;
    let layout = TableLayout::mie();

    let path = out_dir.join("mie_data.csv");
    let config = CsvConfig::default().with_metadata(CsvMetadata::from_model(&model));
    CsvExporter::new(config).export_single(&result, &layout, &path)?;
    println!("  ✓ {}", path.display());

    let path = out_dir.join("mie_data.xlsx");
    XlsxExporter::new()
        .with_sheet_name("Mie")
        .export_single(&result, &layout, &path)?;
    println!("  ✓ {}", path.display());

    Ok(())
}
