//! Demo: Rayleigh Amplitude Functions
//!
//! S1 and S2 of a 10 nm sphere (n = 1.33257) lit at 650 nm. S1 does not depend on the angle,
//! S2 = S1·cosθ vanishes at 90°. The squared amplitudes are plotted on a log axis.
//!
//! An absorbing particle (complex index) is evaluated as well to show the imaginary part of S1.

use scatter_rs::{
    models::RayleighAmplitude,
    output::visualization::{NO_TITLE, ParameterTable, PlotConfig, plot_amplitudes},
    physics::{Length, RefractiveIndex, ScatteringModel, ScatteringParameters, ScatteringQuantity},
    solver::AngleGrid,
};

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    print_section("Rayleigh Amplitude Functions S1, S2");

    let params = ScatteringParameters::new(
        Length::nanometers(650.0),
        Length::micrometers(0.01),
        1.33257,
    );
    let model = RayleighAmplitude::new(params);
    let result = model.compute(&AngleGrid::standard())?;

    let s1 = result.get(ScatteringQuantity::S1).ok_or("missing S1")?;
    let s2 = result.get(ScatteringQuantity::S2).ok_or("missing S2")?;

    println!("  K  = {:.10}", params.refractive_index.lorentz_lorenz().re);
    println!("  S1 = {:.10e} (constant)", s1[0]);
    println!("  S2(0°)  = {:.10e}", s2[0]);
    println!("  S2(90°) = {:.3e}", s2[900]);
    println!("  S2(180°) = {:.10e}", s2[1800]);

    // ====== Absorbing particle ======

    print_section("Absorbing particle (n = 1.5 + 0.1i)");

    let absorbing = RayleighAmplitude::new(
        params.with_refractive_index(RefractiveIndex::complex(1.5, 0.1)),
    )
    .compute(&AngleGrid::standard())?;
    println!(
        "  S1 = {:.6e} + {:.6e}i",
        absorbing.get_metadata("s1_real").unwrap_or(f64::NAN),
        absorbing.get_metadata("s1_imag").unwrap_or(f64::NAN)
    );

    // ====== Plot ======

    print_section("Plot");

    let out_dir = std::env::temp_dir().join("scatter_rs");
    std::fs::create_dir_all(&out_dir)?;
    let path = out_dir.join("rayleigh_amplitude.png");

    let table = ParameterTable::from_model(&model).with_header("Input Parameters", "Values");
    plot_amplitudes(
        &result,
        Some(&table),
        &path.to_string_lossy(),
        Some(&PlotConfig::amplitude(NO_TITLE)),
    )?;
    println!("  ✓ {}", path.display());

    Ok(())
}
