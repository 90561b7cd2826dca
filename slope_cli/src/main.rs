//! # Slopecalc CLI
//!
//! Terminal front-end for the slope stability engine. Prompts for a slope
//! definition, searches for the critical circle with each equilibrium
//! method, and prints a comparison report.

use std::io::{self, BufRead, Write};

use slope_core::units::Degrees;
use slope_core::{find_critical_surface, Method, SearchConfig, SlopeInput};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Slopecalc CLI - Slope Stability Calculator");
    println!("==========================================");
    println!();

    let height_m = prompt_f64("Slope height H (m) [10.0]: ", 10.0);
    let slope_angle = prompt_f64("Slope angle beta (deg) [30.0]: ", 30.0);
    let unit_weight = prompt_f64("Unit weight gamma (kN/m3) [18.0]: ", 18.0);
    let cohesion = prompt_f64("Cohesion c (kPa) [25.0]: ", 25.0);
    let friction_angle = prompt_f64("Friction angle phi (deg) [25.0]: ", 25.0);
    let ru = prompt_f64("Pore-pressure ratio ru [0.0]: ", 0.0);
    let kh = prompt_f64("Seismic coefficient kh [0.0]: ", 0.0);

    let slope = SlopeInput {
        height_m,
        slope_angle: Degrees(slope_angle),
        unit_weight,
        cohesion,
        friction_angle: Degrees(friction_angle),
        ru,
        kh,
    };

    if let Err(err) = slope.validate() {
        eprintln!("Input error: {}", err);
        std::process::exit(1);
    }

    println!();
    println!("Searching for the critical failure surface...");
    println!();
    println!("═══════════════════════════════════════════════════");
    println!("  SLOPE STABILITY RESULTS");
    println!("═══════════════════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  H = {:.1} m, beta = {:.1} deg", height_m, slope_angle);
    println!(
        "  gamma = {:.1} kN/m3, c = {:.1} kPa, phi = {:.1} deg",
        unit_weight, cohesion, friction_angle
    );
    if ru > 0.0 || kh > 0.0 {
        println!("  ru = {:.2}, kh = {:.2}", ru, kh);
    }
    println!();

    let config = SearchConfig::default();
    for method in [Method::Fellenius, Method::Bishop, Method::Janbu] {
        match find_critical_surface(&slope, method, &config) {
            Ok(result) => {
                let note = if result.converged { "" } else { "  (unconverged)" };
                println!(
                    "  {:<10} FS = {:.3}  [{}]{}",
                    result.method, result.fs, result.status_label, note
                );
                println!(
                    "             circle: center ({:.1}, {:.1}) m, R = {:.1} m, {} slices",
                    result.critical_center.x,
                    result.critical_center.y,
                    result.critical_radius,
                    result.slices.len()
                );
            }
            Err(err) => {
                println!("  {:<10} {}", method.name(), err);
            }
        }
        println!();
    }
}
