//! # Analysis Results
//!
//! The output contract of the engine: one [`SlopeResult`] per method
//! invocation, carrying the factor of safety, the governing circle, a
//! stability classification, and ordered per-slice diagnostics. Plain
//! nested records of numbers and short enumerated strings - the consuming
//! layer may serialize them however it likes.

use serde::{Deserialize, Serialize};

use crate::equilibrium::{Method, Solution};
use crate::geometry::{Point, TrialCircle};
use crate::slices::Slice;

/// FS at or above which a static slope is considered stable
pub const STATIC_STABLE_FS: f64 = 1.5;

/// FS at or above which a pseudo-static (seismic) slope is considered stable
pub const SEISMIC_STABLE_FS: f64 = 1.1;

/// FS below which predicted failure governs, static or seismic
pub const UNSTABLE_FS: f64 = 1.0;

/// Categorical stability classification derived from FS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityStatus {
    /// FS below 1.0 - failure predicted
    Unstable,
    /// FS between the failure and stable thresholds
    Marginal,
    /// FS at or above the stable threshold (1.5 static, 1.1 seismic)
    Stable,
}

impl StabilityStatus {
    /// Classify a factor of safety.
    ///
    /// The stable threshold drops from 1.5 to 1.1 under seismic loading:
    /// pseudo-static FS demands are conventionally lower because the
    /// design acceleration is itself a conservative envelope.
    pub fn from_fs(fs: f64, seismic: bool) -> Self {
        let stable_fs = if seismic {
            SEISMIC_STABLE_FS
        } else {
            STATIC_STABLE_FS
        };
        if fs < UNSTABLE_FS {
            StabilityStatus::Unstable
        } else if fs < stable_fs {
            StabilityStatus::Marginal
        } else {
            StabilityStatus::Stable
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> &'static str {
        match self {
            StabilityStatus::Unstable => "Unstable",
            StabilityStatus::Marginal => "Marginally stable",
            StabilityStatus::Stable => "Stable",
        }
    }
}

/// Per-slice diagnostic record, ordered left to right.
///
/// Angles are reported in degrees for readability; the engine's internal
/// slice representation works in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceRecord {
    /// 1-based position in the slice sequence
    pub index: usize,
    /// Horizontal position of the slice midline (m)
    pub x: f64,
    /// Slice width (m)
    pub width: f64,
    /// Slice weight (kN per meter of slope length)
    pub weight: f64,
    /// Base inclination (degrees, signed)
    pub base_angle: f64,
    /// Base length along the slip arc (m)
    pub base_length: f64,
}

impl From<&Slice> for SliceRecord {
    fn from(slice: &Slice) -> Self {
        SliceRecord {
            index: slice.index,
            x: slice.x,
            width: slice.width,
            weight: slice.weight,
            base_angle: slice.alpha.to_degrees(),
            base_length: slice.base_length,
        }
    }
}

/// Complete result of one stability analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "method": "Bishop",
///   "fs": 2.214,
///   "converged": true,
///   "iterations": 6,
///   "status": "stable",
///   "status_label": "Stable",
///   "critical_center": { "x": 8.1, "y": 14.4 },
///   "critical_radius": 16.6,
///   "slices": [
///     { "index": 1, "x": 0.3, "width": 0.8, "weight": 4.1,
///       "base_angle": -28.5, "base_length": 0.91 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopeResult {
    /// Equilibrium method name ("Fellenius", "Bishop", "Janbu")
    pub method: String,

    /// Factor of safety, rounded to 3 decimals for display
    pub fs: f64,

    /// False when the fixed-point iteration hit its cap before meeting
    /// tolerance; the reported fs is then the last estimate
    pub converged: bool,

    /// Iterations the solver used (0 for the closed-form Fellenius method)
    pub iterations: usize,

    /// Categorical stability classification
    pub status: StabilityStatus,

    /// Human-readable form of `status`
    pub status_label: String,

    /// Center of the governing circle (m)
    pub critical_center: Point,

    /// Radius of the governing circle (m)
    pub critical_radius: f64,

    /// Ordered per-slice diagnostics for downstream charting/reporting
    pub slices: Vec<SliceRecord>,
}

/// Round a factor of safety to 3 decimals for display.
///
/// Rounding is monotone, so FS orderings established by the solver and the
/// search survive it.
pub fn round_fs(fs: f64) -> f64 {
    (fs * 1000.0).round() / 1000.0
}

/// Package one solved surface into the output contract.
pub fn build_result(
    method: Method,
    solution: &Solution,
    circle: &TrialCircle,
    slices: &[Slice],
    seismic: bool,
) -> SlopeResult {
    let fs = round_fs(solution.fs);
    let status = StabilityStatus::from_fs(fs, seismic);
    SlopeResult {
        method: method.name().to_string(),
        fs,
        converged: solution.converged,
        iterations: solution.iterations,
        status,
        status_label: status.label().to_string(),
        critical_center: circle.center,
        critical_radius: circle.radius,
        slices: slices.iter().map(SliceRecord::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_thresholds() {
        assert_eq!(StabilityStatus::from_fs(0.95, false), StabilityStatus::Unstable);
        assert_eq!(StabilityStatus::from_fs(1.0, false), StabilityStatus::Marginal);
        assert_eq!(StabilityStatus::from_fs(1.49, false), StabilityStatus::Marginal);
        assert_eq!(StabilityStatus::from_fs(1.5, false), StabilityStatus::Stable);
    }

    #[test]
    fn test_seismic_thresholds_drop_to_1_1() {
        assert_eq!(StabilityStatus::from_fs(1.2, true), StabilityStatus::Stable);
        assert_eq!(StabilityStatus::from_fs(1.05, true), StabilityStatus::Marginal);
        assert_eq!(StabilityStatus::from_fs(1.2, false), StabilityStatus::Marginal);
        assert_eq!(StabilityStatus::from_fs(0.99, true), StabilityStatus::Unstable);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StabilityStatus::Stable.label(), "Stable");
        assert_eq!(StabilityStatus::Marginal.label(), "Marginally stable");
        assert_eq!(StabilityStatus::Unstable.label(), "Unstable");
    }

    #[test]
    fn test_round_fs() {
        assert_eq!(round_fs(1.23456), 1.235);
        assert_eq!(round_fs(0.9994), 0.999);
        // Monotone: a <= b implies round(a) <= round(b)
        assert!(round_fs(1.2344) <= round_fs(1.2346));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&StabilityStatus::Marginal).unwrap();
        assert_eq!(json, "\"marginal\"");
    }

    #[test]
    fn test_slice_record_reports_degrees() {
        let slice = Slice {
            index: 1,
            x: 0.5,
            width: 1.0,
            height: 2.0,
            weight: 36.0,
            alpha: std::f64::consts::FRAC_PI_6,
            base_length: 1.0 / std::f64::consts::FRAC_PI_6.cos(),
            pore_pressure: 0.0,
            base_y: 0.0,
            seismic_arm: 5.0,
        };
        let record = SliceRecord::from(&slice);
        assert!((record.base_angle - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let result = SlopeResult {
            method: "Bishop".to_string(),
            fs: 1.732,
            converged: true,
            iterations: 5,
            status: StabilityStatus::Stable,
            status_label: "Stable".to_string(),
            critical_center: Point { x: 8.0, y: 14.0 },
            critical_radius: 16.1,
            slices: vec![SliceRecord {
                index: 1,
                x: 0.5,
                width: 0.8,
                weight: 4.2,
                base_angle: -28.0,
                base_length: 0.9,
            }],
        };
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("critical_center"));
        assert!(json.contains("status_label"));

        let roundtrip: SlopeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
