//! # Method-of-Slices Discretization
//!
//! Converts a slope definition plus one trial circle into the ordered
//! sequence of vertical slices every equilibrium method consumes. Slices
//! are recomputed fresh for every circle and never reused across trials.
//!
//! The discretizer samples uniform-width columns across the circle's
//! horizontal extent at column midpoints. Columns where the arc sits at or
//! above the ground surface (height <= 0) are dropped; if fewer than 3
//! columns survive, the circle does not form a usable failure surface.
//!
//! All per-slice force quantities (weight, pore pressure, base geometry,
//! seismic moment arm) are evaluated here. They are pure per-slice
//! computations with no inter-slice coupling.

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{SlopeInput, TrialCircle};

/// Minimum number of valid slices for a usable failure surface
pub const MIN_SLICES: usize = 3;

/// One vertical slice of the sliding mass.
///
/// Identity is positional: `index` is the 1-based position in the ordered
/// left-to-right sequence. Internal to the engine; the serialized
/// diagnostic view lives in [`crate::results::SliceRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// 1-based position, ordered left to right
    pub index: usize,
    /// Horizontal position of the slice midline (m)
    pub x: f64,
    /// Slice width b (m)
    pub width: f64,
    /// Vertical extent between ground surface and slip arc (m)
    pub height: f64,
    /// Slice weight W = gamma * b * h (kN per meter of slope length)
    pub weight: f64,
    /// Signed base inclination alpha (radians)
    pub alpha: f64,
    /// Base length along the arc, l = b / cos(alpha) (m)
    pub base_length: f64,
    /// Pore pressure at the base, u = r_u * gamma * h (kPa)
    pub pore_pressure: f64,
    /// Elevation of the slip arc at the slice midline (m)
    pub base_y: f64,
    /// Vertical distance from circle center to the slice mass centroid (m);
    /// moment arm of the pseudo-static horizontal force about the center
    pub seismic_arm: f64,
}

/// Partition the failure surface under `circle` into `count` uniform-width
/// columns and keep those with positive height.
///
/// # Errors
///
/// `InvalidGeometry` when fewer than [`MIN_SLICES`] columns intersect the
/// sliding mass - the circle misses the slope or only grazes it.
pub fn discretize(
    slope: &SlopeInput,
    circle: &TrialCircle,
    count: usize,
) -> CalcResult<Vec<Slice>> {
    if count < MIN_SLICES {
        return Err(CalcError::invalid_input(
            "slice_count",
            count.to_string(),
            format!("At least {} slices are required", MIN_SLICES),
        ));
    }

    let x_left = circle.center.x - circle.radius;
    let width = 2.0 * circle.radius / count as f64;

    let mut slices = Vec::new();
    for i in 0..count {
        let x = x_left + (i as f64 + 0.5) * width;
        let base_y = match circle.arc_y(x) {
            Some(y) => y,
            None => continue,
        };
        let ground_y = slope.ground_y(x);
        let height = ground_y - base_y;
        if height <= 0.0 {
            continue;
        }

        let alpha = circle.base_angle_rad(x);
        let weight = slope.unit_weight * width * height;
        slices.push(Slice {
            index: slices.len() + 1,
            x,
            width,
            height,
            weight,
            alpha,
            base_length: width / alpha.cos(),
            pore_pressure: slope.ru * slope.unit_weight * height,
            base_y,
            seismic_arm: circle.center.y - (ground_y + base_y) / 2.0,
        });
    }

    if slices.len() < MIN_SLICES {
        return Err(CalcError::invalid_geometry(format!(
            "Circle (center ({:.2}, {:.2}), radius {:.2}) intersects the sliding mass in {} slices; at least {} required",
            circle.center.x,
            circle.center.y,
            circle.radius,
            slices.len(),
            MIN_SLICES,
        )));
    }

    Ok(slices)
}

/// Sag-to-chord ratio d/L of the slip surface.
///
/// The chord runs between the base points of the first and last slices;
/// d is the maximum perpendicular distance of the arc below that chord.
/// Used by the Janbu correction factor.
pub fn sag_ratio(slices: &[Slice]) -> f64 {
    let first = match slices.first() {
        Some(s) => s,
        None => return 0.0,
    };
    let last = match slices.last() {
        Some(s) => s,
        None => return 0.0,
    };

    let dx = last.x - first.x;
    let dy = last.base_y - first.base_y;
    let chord = (dx * dx + dy * dy).sqrt();
    if chord <= f64::EPSILON {
        return 0.0;
    }

    let mut sag: f64 = 0.0;
    for slice in slices {
        // Perpendicular distance from the base point to the chord line
        let d = ((slice.x - first.x) * dy - (slice.base_y - first.base_y) * dx).abs() / chord;
        sag = sag.max(d);
    }
    sag / chord
}
