//! Demo: Rayleigh Intensity Sweeps
//!
//! Parallel intensity for one varied parameter at a time, every curve on the same axes.
//!
//! ## Structure
//!
//! **Phase 1: Radius** (r = 0.0001, 0.001, 0.01, 0.1 μm at d = 4 cm)
//! - Each decade of r moves the curve six decades (I ∝ r⁶)
//!
//! **Phase 2: Observer distance** (d = 1 … 5 cm)
//! - I ∝ 1/d²
//!
//! **Phase 3: Wavelength** (λ = 532, 650, 800 nm at d = 4 cm)
//! - I ∝ λ⁻⁴: blue light scatters more
//!
//! Every sweep is plotted with `plot_sweep`; the fixed parameters are tabulated.

use scatter_rs::{
    models::RayleighIntensity,
    output::visualization::{PlotConfig, plot_sweep},
    physics::{Length, LengthUnit, ScatteringParameters, ScatteringQuantity},
    solver::{AngleGrid, ParameterSweep, SweepParameter, SweepResult},
};

use std::path::Path;
use std::time::Instant;

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

/// Runs one sweep, prints the peak parallel intensity of each curve and plots it.
fn run_and_plot(
    sweep: ParameterSweep,
    grid: &AngleGrid,
    title: &str,
    path: &Path,
) -> Result<SweepResult, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let result = sweep.run(grid, RayleighIntensity::new)?;
    println!(
        "  {} curves × {} angles in {:.3} ms",
        result.len(),
        grid.len(),
        start.elapsed().as_secs_f64() * 1e3
    );

    for entry in result.iter() {
        let peak = entry
            .result
            .get(ScatteringQuantity::Parallel)
            .map_or(f64::NAN, |v| v.max());
        println!("  {:<18} I∥(0°) = {:.6e}", entry.label, peak);
    }

    let config = PlotConfig::sweep(title);
    plot_sweep(&result, ScatteringQuantity::Parallel, &path.to_string_lossy(), Some(&config))?;
    println!("  ✓ {}", path.display());

    Ok(result)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = ScatteringParameters::new(
        Length::nanometers(650.0),
        Length::micrometers(0.01),
        1.33257,
    )
    .with_incident_intensity(1.0)
    .with_observer_distance(Length::centimeters(4.0));

    let grid = AngleGrid::standard();
    let out_dir = std::env::temp_dir().join("scatter_rs");
    std::fs::create_dir_all(&out_dir)?;

    // ====== Phase 1: radius ======

    print_section("Phase 1: Particle radius");
    let radii = run_and_plot(
        ParameterSweep::new(
            base,
            SweepParameter::Radius(LengthUnit::Micrometer),
            vec![0.0001, 0.001, 0.01, 0.1],
        ),
        &grid,
        "Rayleigh Scattering Intensity (Parallel) for Different Radii",
        &out_dir.join("rayleigh_radii.png"),
    )?;

    // ====== Phase 2: observer distance ======

    print_section("Phase 2: Observer distance");
    let distances = run_and_plot(
        ParameterSweep::new(
            base,
            SweepParameter::ObserverDistance(LengthUnit::Centimeter),
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        ),
        &grid,
        "Rayleigh Scattering Intensity (Parallel) vs Scattering Angle",
        &out_dir.join("rayleigh_distances.png"),
    )?;

    // ====== Phase 3: wavelength ======

    print_section("Phase 3: Wavelength");
    let wavelengths = run_and_plot(
        ParameterSweep::new(
            base,
            SweepParameter::Wavelength(LengthUnit::Nanometer),
            vec![532.0, 650.0, 800.0],
        ),
        &grid,
        "Rayleigh Scattering Intensity for Different Wavelengths",
        &out_dir.join("rayleigh_wavelengths.svg"),
    )?;

    // ====== Scaling laws ======

    print_section("Scaling laws");

    let forward = |sweep: &SweepResult, i: usize| {
        sweep.entries()[i]
            .result
            .get(ScatteringQuantity::Parallel)
            .map_or(f64::NAN, |v| v[0])
    };
    println!("  I(r=0.1)/I(r=0.01)   = {:.6e}  (r⁶ → 1e6)", forward(&radii, 3) / forward(&radii, 2));
    println!("  I(d=1)/I(d=2)        = {:.6}      (1/d² → 4)", forward(&distances, 0) / forward(&distances, 1));
    println!(
        "  I(532)/I(800)        = {:.6}      ((800/532)⁴ = {:.6})",
        forward(&wavelengths, 0) / forward(&wavelengths, 2),
        (800.0f64 / 532.0).powi(4)
    );

    Ok(())
}
