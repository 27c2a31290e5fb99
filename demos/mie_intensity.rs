//! Demo: Mie Scattering Intensity Functions
//!
//! A 1 μm radius water droplet (m = 1.33257 + 1.67e-8i) lit at 650 nm, x ≈ 9.7.
//!
//! ## Structure
//!
//! - Evaluate `MieScattering` with the default configuration (0.5° steps, 361 angles)
//! - Print the forward, side and backward intensities
//! - Plot SR, SL and SU on one log axis (`plot_quantities`)
//! - Plot the 2×2 component grid (`plot_mie_components`)
//! - Repeat with Max normalization

use scatter_rs::{
    models::MieScattering,
    output::visualization::{
        AxisScale, NO_TITLE, PanelLayout, ParameterTable, PlotConfig, plot_mie_components,
        plot_quantities,
    },
    physics::{
        Length, Normalization, RefractiveIndex, ScatteringModel, ScatteringParameters,
        ScatteringQuantity,
    },
    solver::{AngleGrid, MieConfiguration},
};

use std::time::Instant;

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    print_section("Mie Scattering Intensity Functions");

    let params = ScatteringParameters::new(
        Length::nanometers(650.0),
        Length::nanometers(1000.0),
        RefractiveIndex::complex(1.33257, 1.67e-8),
    );
    let model = MieScattering::new(params);
    println!("  m = {}", params.refractive_index);
    println!("  x = {:.4}", model.size_parameter());

    // ====== Evaluation ======

    let start = Instant::now();
    let result = model.compute(&AngleGrid::standard())?;
    println!(
        "  {} angles in {:.3} ms ({})",
        result.len(),
        start.elapsed().as_secs_f64() * 1e3,
        model.description().unwrap_or("unknown solver")
    );

    let sl = result.get(ScatteringQuantity::Perpendicular).ok_or("missing SL")?;
    let sr = result.get(ScatteringQuantity::Parallel).ok_or("missing SR")?;
    let su = result.get(ScatteringQuantity::Unpolarized).ok_or("missing SU")?;

    println!("\n  {:>8}  {:>13}  {:>13}  {:>13}", "θ (deg)", "SL", "SR", "SU");
    for i in [0, 60, 120, 180, 240, 300, 360] {
        println!(
            "  {:>8.1}  {:>13.5e}  {:>13.5e}  {:>13.5e}",
            result.angles()[i],
            sl[i],
            sr[i],
            su[i]
        );
    }

    // ====== Plots ======

    print_section("Plots");

    let out_dir = std::env::temp_dir().join("scatter_rs");
    std::fs::create_dir_all(&out_dir)?;

    let table = ParameterTable::from_model(&model).with_header("Input Parameters", "Values");
    let combined = PlotConfig::mie("Scattering Intensity Functions");
    let path = out_dir.join("mie_intensity.png");
    plot_quantities(
        &result,
        &[
            ScatteringQuantity::Parallel,
            ScatteringQuantity::Perpendicular,
            ScatteringQuantity::Unpolarized,
        ],
        Some(&table),
        &path.to_string_lossy(),
        Some(&PlotConfig {
            width: 1000,
            height: 700,
            ylabel: "Intensity (|S|²)".to_string(),
            show_table: true,
            ..combined
        }),
    )?;
    println!("  ✓ {}", path.display());

    let path = out_dir.join("mie_components.png");
    plot_mie_components(&result, &path.to_string_lossy(), None)?;
    println!("  ✓ {}", path.display());

    let path = out_dir.join("mie_components_linear.svg");
    let linear = PlotConfig::mie(NO_TITLE).with_layout(PanelLayout::Single(AxisScale::Linear));
    plot_mie_components(&result, &path.to_string_lossy(), Some(&linear))?;
    println!("  ✓ {}", path.display());

    // ====== Normalized ======

    print_section("Max normalization");

    let normalized = model
        .clone()
        .with_configuration(MieConfiguration::default().with_normalization(Normalization::Max))
        .compute(&AngleGrid::standard())?;
    let peak = normalized
        .get(ScatteringQuantity::Perpendicular)
        .map_or(f64::NAN, |v| v.max());
    println!("  SL peak after normalization = {:.6}", peak);

    let path = out_dir.join("mie_components_normalized.png");
    plot_mie_components(
        &normalized,
        &path.to_string_lossy(),
        Some(&PlotConfig::mie("Mie Scattering Intensity (normalized)")),
    )?;
    println!("  ✓ {}", path.display());

    Ok(())
}
