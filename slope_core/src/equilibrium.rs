//! # Limit-Equilibrium Solvers
//!
//! Three interchangeable method-of-slices strategies over one shared slice
//! sequence:
//!
//! - **Fellenius** (Ordinary Method of Slices) - closed form, single pass
//! - **Bishop Simplified** - FS appears inside the m-alpha term, solved by
//!   bounded fixed-point iteration seeded with the Fellenius result
//! - **Janbu Simplified** - same fixed-point shape with Janbu's m-alpha,
//!   followed by the one-shot empirical depth correction f0
//!
//! The iteration state is local to [`fixed_point`]; slice data stays
//! immutable throughout. Non-convergence within the cap is a reportable
//! condition carried on [`Solution::converged`], not an error.
//!
//! ## Example
//!
//! ```rust
//! use slope_core::equilibrium::{analyze_circle, Method};
//! use slope_core::geometry::{SlopeInput, TrialCircle};
//! use slope_core::units::Degrees;
//!
//! let slope = SlopeInput {
//!     height_m: 10.0,
//!     slope_angle: Degrees(30.0),
//!     unit_weight: 18.0,
//!     cohesion: 25.0,
//!     friction_angle: Degrees(25.0),
//!     ru: 0.0,
//!     kh: 0.0,
//! };
//! let circle = TrialCircle::new(8.0, 14.0, 16.12);
//!
//! let result = analyze_circle(&slope, &circle, Method::Bishop).unwrap();
//! assert!(result.fs > 1.0);
//! assert!(result.converged);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{SlopeInput, TrialCircle};
use crate::results::{build_result, SlopeResult};
use crate::slices::{discretize, sag_ratio, Slice};

/// Default slice count for single-circle analyses
pub const DEFAULT_SLICE_COUNT: usize = 40;

/// Convergence tolerance on successive FS estimates
pub const TOLERANCE: f64 = 1e-4;

/// Iteration cap for the Bishop/Janbu fixed point
pub const MAX_ITERATIONS: usize = 100;

/// Relative threshold below which the summed driving force is treated as
/// degenerate (near-vertical or reversed surfaces)
const DRIVING_EPS: f64 = 1e-6;

/// Guard against a collapsing m-alpha denominator inside the iteration
const M_ALPHA_MIN: f64 = 1e-6;

/// Equilibrium method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Ordinary Method of Slices - closed form
    Fellenius,
    /// Bishop Simplified - moment equilibrium, iterative
    Bishop,
    /// Janbu Simplified - force equilibrium, iterative, depth-corrected
    Janbu,
}

impl Method {
    /// Method name as reported in results
    pub fn name(self) -> &'static str {
        match self {
            Method::Fellenius => "Fellenius",
            Method::Bishop => "Bishop",
            Method::Janbu => "Janbu",
        }
    }
}

/// Outcome of one equilibrium solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Factor of safety (last estimate when unconverged)
    pub fs: f64,
    /// Whether the iteration met tolerance before the cap
    pub converged: bool,
    /// Iterations used (0 for the closed-form Fellenius method)
    pub iterations: usize,
}

/// Explicit fixed-point iteration: repeatedly apply `next` to the current
/// FS estimate until successive estimates agree within `tolerance` or
/// `max_iterations` is reached.
///
/// Hitting the cap is not an error: the last estimate is returned with
/// `converged: false`. `next` may fail (degenerate m-alpha); that failure
/// propagates and rejects the surface.
pub fn fixed_point<F>(
    seed: f64,
    tolerance: f64,
    max_iterations: usize,
    mut next: F,
) -> CalcResult<Solution>
where
    F: FnMut(f64) -> CalcResult<f64>,
{
    let mut fs = seed;
    for iteration in 1..=max_iterations {
        let fs_next = next(fs)?;
        if !fs_next.is_finite() || fs_next <= 0.0 {
            return Err(CalcError::degenerate_surface(format!(
                "Fixed-point iteration produced a non-positive factor of safety ({fs_next})"
            )));
        }
        if (fs_next - fs).abs() < tolerance {
            return Ok(Solution {
                fs: fs_next,
                converged: true,
                iterations: iteration,
            });
        }
        fs = fs_next;
    }
    Ok(Solution {
        fs,
        converged: false,
        iterations: max_iterations,
    })
}

/// Summed driving force: W sin(alpha) per slice, plus the pseudo-static
/// term k_h * W * (d / R) when seismic load is present.
fn driving_sum(slices: &[Slice], kh: f64, radius: f64) -> f64 {
    slices
        .iter()
        .map(|s| s.weight * s.alpha.sin() + kh * s.weight * s.seismic_arm / radius)
        .sum()
}

/// Driving force with the degeneracy check applied: surfaces whose summed
/// driving force is near zero relative to the mass weight are unusable.
fn checked_driving(slices: &[Slice], kh: f64, radius: f64) -> CalcResult<f64> {
    let den = driving_sum(slices, kh, radius);
    let total_weight: f64 = slices.iter().map(|s| s.weight).sum();
    if den.abs() <= DRIVING_EPS * total_weight.max(1.0) {
        return Err(CalcError::degenerate_surface(
            "Summed driving force is near zero; factor of safety is undefined for this surface",
        ));
    }
    Ok(den)
}

/// Fellenius resisting-force numerator:
/// sum of c*l + (W cos(alpha) - u*l) tan(phi).
fn fellenius_numerator(slices: &[Slice], cohesion: f64, tan_phi: f64) -> f64 {
    slices
        .iter()
        .map(|s| {
            cohesion * s.base_length
                + (s.weight * s.alpha.cos() - s.pore_pressure * s.base_length) * tan_phi
        })
        .sum()
}

/// Bishop/Janbu resisting numerator at the current FS estimate. The two
/// methods differ only in the m-alpha expression.
fn iterative_numerator(
    slices: &[Slice],
    cohesion: f64,
    tan_phi: f64,
    fs: f64,
    method: Method,
) -> CalcResult<f64> {
    let mut num = 0.0;
    for s in slices {
        let cos_a = s.alpha.cos();
        let m_alpha = match method {
            Method::Bishop => cos_a + s.alpha.sin() * tan_phi / fs,
            Method::Janbu => cos_a * (1.0 + s.alpha.tan() * tan_phi / fs),
            Method::Fellenius => unreachable!("Fellenius is closed form"),
        };
        if m_alpha <= M_ALPHA_MIN {
            return Err(CalcError::degenerate_surface(format!(
                "m-alpha collapsed to {m_alpha:.3e} at slice {}",
                s.index
            )));
        }
        num += (cohesion * s.width + (s.weight - s.pore_pressure * s.width) * tan_phi) / m_alpha;
    }
    Ok(num)
}

/// Janbu's empirical depth correction f0 = 1 + k (d/L - 1.4 (d/L)^2).
///
/// k depends on the soil strength make-up: 0.69 purely cohesive, 0.31
/// purely frictional, 0.5 mixed.
pub fn janbu_correction(cohesion: f64, tan_phi: f64, sag_over_chord: f64) -> f64 {
    let k = if cohesion > 0.0 && tan_phi == 0.0 {
        0.69
    } else if cohesion == 0.0 && tan_phi > 0.0 {
        0.31
    } else {
        0.5
    };
    1.0 + k * (sag_over_chord - 1.4 * sag_over_chord * sag_over_chord)
}

/// Solve one equilibrium method over an already-discretized slice sequence.
///
/// `radius` is the trial circle's radius, used only to scale the seismic
/// moment arm into the driving-force sum.
pub fn solve(
    slices: &[Slice],
    slope: &SlopeInput,
    radius: f64,
    method: Method,
) -> CalcResult<Solution> {
    let cohesion = slope.cohesion;
    let tan_phi = slope.friction_angle.tan();
    let den = checked_driving(slices, slope.kh, radius)?;

    // Closed-form Fellenius, also the seed for the iterative methods
    let fellenius_fs = fellenius_numerator(slices, cohesion, tan_phi) / den;

    match method {
        Method::Fellenius => {
            if !fellenius_fs.is_finite() || fellenius_fs <= 0.0 {
                return Err(CalcError::degenerate_surface(format!(
                    "Fellenius factor of safety is non-positive ({fellenius_fs})"
                )));
            }
            Ok(Solution {
                fs: fellenius_fs,
                converged: true,
                iterations: 0,
            })
        }
        Method::Bishop | Method::Janbu => {
            let seed = if fellenius_fs.is_finite() && fellenius_fs > 0.0 {
                fellenius_fs
            } else {
                1.0
            };
            let mut solution = fixed_point(seed, TOLERANCE, MAX_ITERATIONS, |fs| {
                iterative_numerator(slices, cohesion, tan_phi, fs, method).map(|num| num / den)
            })?;

            if method == Method::Janbu {
                // Depth correction applied once, after convergence
                solution.fs *= janbu_correction(cohesion, tan_phi, sag_ratio(slices));
            }
            Ok(solution)
        }
    }
}

/// Analyze one fixed trial circle with the default slice count.
///
/// This is the single-circle entry point of the engine: validate, slice,
/// solve, aggregate. Pure and stateless; identical inputs give identical
/// output.
pub fn analyze_circle(
    slope: &SlopeInput,
    circle: &TrialCircle,
    method: Method,
) -> CalcResult<SlopeResult> {
    analyze_circle_with_slices(slope, circle, method, DEFAULT_SLICE_COUNT)
}

/// Analyze one fixed trial circle with an explicit slice count.
pub fn analyze_circle_with_slices(
    slope: &SlopeInput,
    circle: &TrialCircle,
    method: Method,
    slice_count: usize,
) -> CalcResult<SlopeResult> {
    slope.validate()?;
    circle.validate()?;
    let slices = discretize(slope, circle, slice_count)?;
    let solution = solve(&slices, slope, circle.radius, method)?;
    Ok(build_result(
        method,
        &solution,
        circle,
        &slices,
        slope.is_seismic(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Degrees;

    fn test_slope() -> SlopeInput {
        SlopeInput {
            height_m: 10.0,
            slope_angle: Degrees(30.0),
            unit_weight: 18.0,
            cohesion: 25.0,
            friction_angle: Degrees(25.0),
            ru: 0.0,
            kh: 0.0,
        }
    }

    /// Toe circle through (0, 0) for the test slope
    fn test_circle() -> TrialCircle {
        TrialCircle::new(8.0, 14.0, (8.0f64 * 8.0 + 14.0 * 14.0).sqrt())
    }

    /// Hand-built slice with only the fields the solver reads populated
    /// meaningfully
    fn synthetic_slice(index: usize, alpha: f64, weight: f64, width: f64) -> Slice {
        Slice {
            index,
            x: index as f64,
            width,
            height: 1.0,
            weight,
            alpha,
            base_length: width / alpha.cos(),
            pore_pressure: 0.0,
            base_y: 0.0,
            seismic_arm: 5.0,
        }
    }

    #[test]
    fn test_fellenius_matches_hand_calculation() {
        let slices = vec![
            synthetic_slice(1, -0.2, 18.0, 1.0),
            synthetic_slice(2, 0.1, 36.0, 1.0),
            synthetic_slice(3, 0.4, 18.0, 1.0),
        ];
        let mut slope = test_slope();
        slope.cohesion = 10.0;
        slope.friction_angle = Degrees(20.0);

        let solution = solve(&slices, &slope, 10.0, Method::Fellenius).unwrap();

        // FS = [c * sum(l) + tan(phi) * sum(W cos a)] / sum(W sin a)
        let tan_phi = 20.0f64.to_radians().tan();
        let num: f64 = slices
            .iter()
            .map(|s| 10.0 * s.base_length + tan_phi * s.weight * s.alpha.cos())
            .sum();
        let den: f64 = slices.iter().map(|s| s.weight * s.alpha.sin()).sum();
        assert!((solution.fs - num / den).abs() < 1e-12);
        assert!(solution.converged);
        assert_eq!(solution.iterations, 0);
    }

    #[test]
    fn test_degenerate_driving_force_rejected() {
        // Mirror-image slices: driving terms cancel exactly
        let slices = vec![
            synthetic_slice(1, -0.3, 20.0, 1.0),
            synthetic_slice(2, 0.0, 20.0, 1.0),
            synthetic_slice(3, 0.3, 20.0, 1.0),
        ];
        let err = solve(&slices, &test_slope(), 10.0, Method::Fellenius).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SURFACE");
        assert!(err.is_surface_rejection());
    }

    #[test]
    fn test_bishop_converges_on_reference_circle() {
        let result = analyze_circle(&test_slope(), &test_circle(), Method::Bishop).unwrap();
        assert!(result.converged);
        assert!(result.iterations >= 1 && result.iterations < MAX_ITERATIONS);
        assert!(result.fs > 1.0 && result.fs < 5.0);
    }

    #[test]
    fn test_fellenius_not_above_bishop() {
        // Ordering regression guard across a battery of typical inputs
        let cases = [
            (25.0, 25.0, 0.0),
            (10.0, 30.0, 0.0),
            (40.0, 15.0, 0.0),
            (0.0, 35.0, 0.0),
            (25.0, 25.0, 0.25),
        ];
        for (c, phi, ru) in cases {
            let mut slope = test_slope();
            slope.cohesion = c;
            slope.friction_angle = Degrees(phi);
            slope.ru = ru;

            let fell = analyze_circle(&slope, &test_circle(), Method::Fellenius).unwrap();
            let bish = analyze_circle(&slope, &test_circle(), Method::Bishop).unwrap();
            assert!(
                fell.fs <= bish.fs + 1e-9,
                "Fellenius {} > Bishop {} for c={c}, phi={phi}, ru={ru}",
                fell.fs,
                bish.fs
            );
        }
    }

    #[test]
    fn test_phi_zero_reduces_bishop_to_cohesive_closed_form() {
        // With tan(phi) = 0, m-alpha is cos(alpha) only and the Bishop
        // numerator collapses to sum(c*l) - identical to Fellenius
        let mut slope = test_slope();
        slope.friction_angle = Degrees(0.0);

        let fell = analyze_circle(&slope, &test_circle(), Method::Fellenius).unwrap();
        let bish = analyze_circle(&slope, &test_circle(), Method::Bishop).unwrap();
        assert!((fell.fs - bish.fs).abs() < 1e-9);
    }

    #[test]
    fn test_cohesionless_fs_is_purely_frictional() {
        let mut slope = test_slope();
        slope.cohesion = 0.0;

        let slices = discretize(&slope, &test_circle(), DEFAULT_SLICE_COUNT).unwrap();
        let solution = solve(&slices, &slope, test_circle().radius, Method::Fellenius).unwrap();

        let tan_phi = slope.friction_angle.tan();
        let num: f64 = slices.iter().map(|s| s.weight * s.alpha.cos() * tan_phi).sum();
        let den: f64 = slices.iter().map(|s| s.weight * s.alpha.sin()).sum();
        assert!((solution.fs - num / den).abs() < 1e-9);
    }

    #[test]
    fn test_fs_non_increasing_with_seismic_coefficient() {
        let mut previous = f64::INFINITY;
        for kh in [0.0, 0.05, 0.1, 0.2, 0.3] {
            let mut slope = test_slope();
            slope.kh = kh;
            let result = analyze_circle(&slope, &test_circle(), Method::Bishop).unwrap();
            assert!(
                result.fs <= previous + 1e-9,
                "FS rose from {previous} to {} at kh={kh}",
                result.fs
            );
            previous = result.fs;
        }
    }

    #[test]
    fn test_seismic_term_absent_when_kh_zero() {
        let slices = discretize(&test_slope(), &test_circle(), DEFAULT_SLICE_COUNT).unwrap();
        let base: f64 = slices.iter().map(|s| s.weight * s.alpha.sin()).sum();
        let with_term = super::driving_sum(&slices, 0.0, test_circle().radius);
        assert!((base - with_term).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_point_converges_to_fixed_value() {
        // x -> x/2 + 1 has the fixed point 2
        let solution = fixed_point(10.0, 1e-10, 100, |fs| Ok(fs / 2.0 + 1.0)).unwrap();
        assert!(solution.converged);
        assert!((solution.fs - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_fixed_point_cap_reports_unconverged() {
        // x -> 2x never settles; must terminate at the cap with the flag set
        let solution = fixed_point(1.0, 1e-6, 10, |fs| Ok(fs * 2.0)).unwrap();
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 10);
        assert!(solution.fs.is_finite() && solution.fs > 0.0);
    }

    #[test]
    fn test_janbu_correction_factor_selection() {
        let dl = 0.2;
        let shape = dl - 1.4 * dl * dl;
        assert!((janbu_correction(10.0, 0.0, dl) - (1.0 + 0.69 * shape)).abs() < 1e-12);
        assert!((janbu_correction(0.0, 0.5, dl) - (1.0 + 0.31 * shape)).abs() < 1e-12);
        assert!((janbu_correction(10.0, 0.5, dl) - (1.0 + 0.5 * shape)).abs() < 1e-12);
        // Flat surface: no correction
        assert_eq!(janbu_correction(10.0, 0.5, 0.0), 1.0);
    }

    #[test]
    fn test_janbu_runs_and_lands_near_bishop() {
        let janbu = analyze_circle(&test_slope(), &test_circle(), Method::Janbu).unwrap();
        let bishop = analyze_circle(&test_slope(), &test_circle(), Method::Bishop).unwrap();
        assert!(janbu.converged);
        // The two simplified methods agree within tens of percent for
        // routine geometries
        assert!(janbu.fs > 0.5 * bishop.fs && janbu.fs < 1.5 * bishop.fs);
    }

    #[test]
    fn test_method_names_in_results() {
        for (method, name) in [
            (Method::Fellenius, "Fellenius"),
            (Method::Bishop, "Bishop"),
            (Method::Janbu, "Janbu"),
        ] {
            let result = analyze_circle(&test_slope(), &test_circle(), method).unwrap();
            assert_eq!(result.method, name);
        }
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let a = analyze_circle(&test_slope(), &test_circle(), Method::Bishop).unwrap();
        let b = analyze_circle(&test_slope(), &test_circle(), Method::Bishop).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_invalid_input_rejected_before_computation() {
        let mut slope = test_slope();
        slope.unit_weight = 0.0;
        let err = analyze_circle(&slope, &test_circle(), Method::Bishop).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
