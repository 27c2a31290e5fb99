//! Demo: Mie Intensity Sweeps
//!
//! Unpolarized intensity SU for one varied parameter at a time.
//!
//! ## Structure
//!
//! **Phase 1: Small radii at 800 nm** (r = 10 … 50 μm)
//! **Phase 2: Radius decades at 650 nm** (r = 0.5, 5, 50 μm)
//! **Phase 3: Wavelength** (λ = 532, 650, 800 nm at r = 1 μm)
//!
//! m = 1.33257 + 1.67e-8i throughout. Each phase prints the size parameters and the
//! forward-to-backward ratio, then plots the curves on a log axis.

use scatter_rs::{
    models::MieScattering,
    output::visualization::{AxisScale, PanelLayout, PlotConfig, plot_sweep},
    physics::{Length, LengthUnit, RefractiveIndex, ScatteringParameters, ScatteringQuantity},
    solver::{AngleGrid, ParameterSweep, SweepParameter},
};

use std::path::Path;
use std::time::Instant;

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn run_and_plot(
    sweep: ParameterSweep,
    title: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let result = sweep.run(&AngleGrid::standard(), MieScattering::new)?;
    println!(
        "  {} curves in {:.3} ms",
        result.len(),
        start.elapsed().as_secs_f64() * 1e3
    );

    for entry in result.iter() {
        let su = entry
            .result
            .get(ScatteringQuantity::Unpolarized)
            .ok_or("missing SU")?;
        println!(
            "  {:<16} x = {:>9.3}   SU(0°)/SU(180°) = {:.3e}",
            entry.label,
            entry.result.get_metadata("size_parameter").unwrap_or(f64::NAN),
            su[0] / su[su.len() - 1]
        );
    }

    let config = PlotConfig::sweep(title).with_layout(PanelLayout::Single(AxisScale::Log));
    let config = PlotConfig {
        ylabel: "Intensity (|S|²)".to_string(),
        ..config
    };
    plot_sweep(&result, ScatteringQuantity::Unpolarized, &path.to_string_lossy(), Some(&config))?;
    println!("  ✓ {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let m = RefractiveIndex::complex(1.33257, 1.67e-8);
    let out_dir = std::env::temp_dir().join("scatter_rs");
    std::fs::create_dir_all(&out_dir)?;

    // ====== Phase 1 ======

    print_section("Phase 1: r = 10 … 50 μm at λ = 800 nm");
    let base = ScatteringParameters::new(Length::nanometers(800.0), Length::micrometers(10.0), m);
    run_and_plot(
        ParameterSweep::new(
            base,
            SweepParameter::Radius(LengthUnit::Micrometer),
            vec![10.0, 20.0, 25.0, 30.0, 40.0, 50.0],
        ),
        "Scattering Intensity Functions for Different Radii",
        &out_dir.join("mie_radii_10_50.png"),
    )?;

    // ====== Phase 2 ======

    print_section("Phase 2: r = 0.5, 5, 50 μm at λ = 650 nm");
    let base = ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(0.5), m);
    run_and_plot(
        ParameterSweep::new(
            base,
            SweepParameter::Radius(LengthUnit::Micrometer),
            vec![0.5, 5.0, 50.0],
        ),
        "Scattering Intensity Functions",
        &out_dir.join("mie_radii_decades.png"),
    )?;

    // ====== Phase 3 ======

    print_section("Phase 3: λ = 532, 650, 800 nm at r = 1 μm");
    let base = ScatteringParameters::new(Length::nanometers(650.0), Length::micrometers(1.0), m);
    run_and_plot(
        ParameterSweep::new(
            base,
            SweepParameter::Wavelength(LengthUnit::Nanometer),
            vec![532.0, 650.0, 800.0],
        ),
        "Mie Scattering for Different Wavelengths",
        &out_dir.join("mie_wavelengths.svg"),
    )?;

    Ok(())
}
