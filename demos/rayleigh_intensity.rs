//! Demo: Rayleigh Intensity vs Scattering Angle
//!
//! Parallel and perpendicular intensity of a 10 nm water droplet lit at 650 nm, observed
//! 4 cm away, on a linear and a log panel with the input parameters tabulated.
//!
//! ## Structure
//!
//! - Validate the parameters against the Rayleigh regime (r < λ)
//! - Evaluate `RayleighIntensity` on 1000 angles between 0° and 180°
//! - Print a few characteristic angles
//! - Plot both polarizations (`plot_polarized_intensity`) as PNG and SVG

use scatter_rs::{
    models::RayleighIntensity,
    output::visualization::{NO_TITLE, ParameterTable, PlotConfig, plot_polarized_intensity},
    physics::{Length, ScatteringParameters, ScatteringQuantity},
    solver::{AngleGrid, Scenario},
};

use std::time::Instant;

/// Prints a titled section banner to stdout.
fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    print_section("Rayleigh Scattering Intensity vs Scattering Angle");

    // ====== Parameters ======

    let params = ScatteringParameters::new(
        Length::nanometers(650.0),
        Length::micrometers(0.01),
        1.33257,
    )
    .with_incident_intensity(1.0)
    .with_observer_distance(Length::centimeters(4.0));
    params.validate_rayleigh()?;

    for (key, value) in params.table_rows() {
        println!("  {key:<24} {value}");
    }

    // ====== Evaluation ======

    let model = RayleighIntensity::new(params);
    let table = ParameterTable::from_model(&model);
    let scenario = Scenario::new(Box::new(model), AngleGrid::linspace(0.0, 180.0, 1000)?);

    let start = Instant::now();
    let result = scenario.run()?;
    println!(
        "\n{} angles evaluated in {:.3} ms",
        result.len(),
        start.elapsed().as_secs_f64() * 1e3
    );

    let angles = result.angles();
    let parallel = result
        .get(ScatteringQuantity::Parallel)
        .ok_or("missing parallel intensity")?;
    let perpendicular = result
        .get(ScatteringQuantity::Perpendicular)
        .ok_or("missing perpendicular intensity")?;

    println!("\n  {:>10}  {:>14}  {:>14}", "θ (deg)", "I∥", "I⊥");
    for i in [0, 166, 333, 499, 666, 833, 999] {
        println!(
            "  {:>10.2}  {:>14.6e}  {:>14.6e}",
            angles[i], parallel[i], perpendicular[i]
        );
    }

    // ====== Plots ======

    print_section("Plots");

    let out_dir = std::env::temp_dir().join("scatter_rs");
    std::fs::create_dir_all(&out_dir)?;

    let config = PlotConfig::intensity(NO_TITLE);
    for name in ["rayleigh_intensity.png", "rayleigh_intensity.svg"] {
        let path = out_dir.join(name);
        plot_polarized_intensity(&result, Some(&table), &path.to_string_lossy(), Some(&config))?;
        println!("  ✓ {}", path.display());
    }

    Ok(())
}
