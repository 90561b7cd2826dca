//! # Critical-Surface Search
//!
//! Given only a slope definition, locate the trial circle minimizing the
//! factor of safety for a chosen method - the governing design case.
//!
//! The search enumerates a bounded parameter grid of candidate circles
//! (center x, center y, radius), evaluates each candidate as an
//! independent pure call, and reduces to the minimum valid FS. Candidates
//! are produced by a lazy, restartable generator; evaluation is
//! parallelized with rayon and followed by a sequential reduction in
//! generator order, so the winner is deterministic regardless of thread
//! scheduling.
//!
//! Grid policy (see DESIGN.md): center x spans [-0.2 H, 1.2 run], center y
//! spans [1.1 H, 3 H], and radius spans [y_c - H, y_c + 0.5 H] per center,
//! i.e. from shallow circles to ones reaching well below the toe.
//! Geometrically invalid candidates are skipped silently; they do not
//! count as search failures.
//!
//! ## Example
//!
//! ```rust
//! use slope_core::equilibrium::Method;
//! use slope_core::geometry::SlopeInput;
//! use slope_core::search::{find_critical_surface, SearchConfig};
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
//!
//! let result =
//!     find_critical_surface(&slope, Method::Bishop, &SearchConfig::default()).unwrap();
//! assert!(result.fs > 1.0);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::equilibrium::{solve, Method, Solution, DEFAULT_SLICE_COUNT};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::{SlopeInput, TrialCircle};
use crate::results::{build_result, SlopeResult};
use crate::slices::{discretize, Slice, MIN_SLICES};

/// Search grid resolution and evaluation policy.
///
/// The defaults give a 12 x 8 x 10 grid (960 candidates), dense enough to
/// land within a few percent of chart solutions for textbook slopes while
/// staying cheap to evaluate exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Grid steps along center x
    pub center_x_steps: usize,

    /// Grid steps along center y
    pub center_y_steps: usize,

    /// Grid steps along the radius, per center
    pub radius_steps: usize,

    /// Slices per candidate evaluation
    pub slice_count: usize,

    /// Optional cap on evaluated candidates. The candidate stream is
    /// truncated before evaluation and the best-so-far result over what
    /// was examined is returned.
    pub max_evaluations: Option<usize>,

    /// FS ties within this tolerance resolve to the smaller radius
    /// (shallower, more conservative to report)
    pub fs_tie_tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            center_x_steps: 12,
            center_y_steps: 8,
            radius_steps: 10,
            slice_count: DEFAULT_SLICE_COUNT,
            max_evaluations: None,
            fs_tie_tolerance: 1e-6,
        }
    }
}

impl SearchConfig {
    /// Validate grid resolution.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, steps) in [
            ("center_x_steps", self.center_x_steps),
            ("center_y_steps", self.center_y_steps),
            ("radius_steps", self.radius_steps),
        ] {
            if steps == 0 {
                return Err(CalcError::invalid_input(
                    field,
                    steps.to_string(),
                    "Grid resolution must be at least 1",
                ));
            }
        }
        if self.slice_count < MIN_SLICES {
            return Err(CalcError::invalid_input(
                "slice_count",
                self.slice_count.to_string(),
                format!("At least {} slices are required", MIN_SLICES),
            ));
        }
        if !self.fs_tie_tolerance.is_finite() || self.fs_tie_tolerance < 0.0 {
            return Err(CalcError::invalid_input(
                "fs_tie_tolerance",
                self.fs_tie_tolerance.to_string(),
                "Tie tolerance must be non-negative",
            ));
        }
        Ok(())
    }
}

/// i-th of `steps` uniformly spaced values over [lo, hi]
fn grid_value(lo: f64, hi: f64, steps: usize, i: usize) -> f64 {
    if steps <= 1 {
        (lo + hi) / 2.0
    } else {
        lo + (hi - lo) * i as f64 / (steps - 1) as f64
    }
}

/// Lazily produce the bounded family of candidate circles for a slope.
///
/// Finite and restartable: calling this again yields the same sequence in
/// the same order, which is what makes the search reduction (and any
/// caller comparing against the candidate set) deterministic.
pub fn candidate_circles<'a>(
    slope: &'a SlopeInput,
    config: &'a SearchConfig,
) -> impl Iterator<Item = TrialCircle> + 'a {
    let h = slope.height_m;
    let run = slope.horizontal_run();
    let (x_lo, x_hi) = (-0.2 * h, 1.2 * run);
    let (y_lo, y_hi) = (1.1 * h, 3.0 * h);

    (0..config.center_x_steps).flat_map(move |ix| {
        let x = grid_value(x_lo, x_hi, config.center_x_steps, ix);
        (0..config.center_y_steps).flat_map(move |iy| {
            let y = grid_value(y_lo, y_hi, config.center_y_steps, iy);
            // Radius band per center: bottom of the circle from just
            // below the crest depth down to half a height below the toe
            let (r_lo, r_hi) = (y - h, y + 0.5 * h);
            (0..config.radius_steps).map(move |ir| {
                TrialCircle::new(x, y, grid_value(r_lo, r_hi, config.radius_steps, ir))
            })
        })
    })
}

/// One evaluated candidate, kept only when the surface is valid.
struct Candidate {
    circle: TrialCircle,
    slices: Vec<Slice>,
    solution: Solution,
}

/// Evaluate a single candidate circle; invalid or degenerate surfaces
/// come back as None and are skipped without counting as failures.
fn evaluate_candidate(
    slope: &SlopeInput,
    circle: TrialCircle,
    method: Method,
    slice_count: usize,
) -> Option<Candidate> {
    let slices = discretize(slope, &circle, slice_count).ok()?;
    let solution = solve(&slices, slope, circle.radius, method).ok()?;
    Some(Candidate {
        circle,
        slices,
        solution,
    })
}

/// Keep the better of two valid candidates: lower FS wins; FS ties within
/// tolerance resolve to the smaller radius.
fn pick_better(a: Candidate, b: Candidate, tie_tolerance: f64) -> Candidate {
    if (a.solution.fs - b.solution.fs).abs() <= tie_tolerance {
        if b.circle.radius < a.circle.radius {
            b
        } else {
            a
        }
    } else if b.solution.fs < a.solution.fs {
        b
    } else {
        a
    }
}

/// Find the circle minimizing the factor of safety for `method`.
///
/// Candidate evaluations are independent pure calls and run in parallel;
/// the reduction then walks the per-candidate outcomes sequentially in
/// generator order. If no candidate anywhere in the (possibly budgeted)
/// grid forms a valid surface, the search reports `NoCriticalSurface`
/// rather than fabricating a result.
pub fn find_critical_surface(
    slope: &SlopeInput,
    method: Method,
    config: &SearchConfig,
) -> CalcResult<SlopeResult> {
    slope.validate()?;
    config.validate()?;

    let budget = config.max_evaluations.unwrap_or(usize::MAX);
    let candidates: Vec<TrialCircle> = candidate_circles(slope, config).take(budget).collect();

    let evaluated: Vec<Option<Candidate>> = candidates
        .par_iter()
        .map(|&circle| evaluate_candidate(slope, circle, method, config.slice_count))
        .collect();

    let mut best: Option<Candidate> = None;
    for candidate in evaluated.into_iter().flatten() {
        best = Some(match best {
            None => candidate,
            Some(current) => pick_better(current, candidate, config.fs_tie_tolerance),
        });
    }

    match best {
        Some(winner) => Ok(build_result(
            method,
            &winner.solution,
            &winner.circle,
            &winner.slices,
            slope.is_seismic(),
        )),
        None => Err(CalcError::NoCriticalSurface {
            candidates_examined: candidates.len(),
        }),
    }
}
