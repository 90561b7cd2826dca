//! # Slope Geometry
//!
//! Input types for a slope cross-section and a trial circular failure
//! surface, plus the ground-profile evaluation everything downstream
//! samples against.
//!
//! ## Coordinate frame
//!
//! The slope lives in a local x-y frame with the toe at the origin:
//!
//! ```text
//!                      crest ________ y = H
//!                           /
//!                          /  slope face, y = x tan(beta)
//!              y = 0 _____/
//!                         toe (0, 0)
//! ```
//!
//! Ground is flat at y = 0 left of the toe and flat at y = H beyond the
//! crest. A trial circle's lower arc cuts through this profile; the soil
//! mass between arc and ground is what the method of slices analyzes.
//!
//! ## Example
//!
//! ```rust
//! use slope_core::geometry::{SlopeInput, TrialCircle, Point};
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
//! slope.validate().unwrap();
//!
//! let circle = TrialCircle {
//!     center: Point { x: 8.0, y: 14.0 },
//!     radius: 16.1,
//! };
//! circle.validate().unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Degrees;

/// A point in the slope's local coordinate frame (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Slope cross-section and soil strength parameters.
///
/// Immutable once handed to the engine; every analysis call takes it by
/// shared reference and builds fresh output.
///
/// ## JSON Example
///
/// ```json
/// {
///   "height_m": 10.0,
///   "slope_angle": 30.0,
///   "unit_weight": 18.0,
///   "cohesion": 25.0,
///   "friction_angle": 25.0,
///   "ru": 0.0,
///   "kh": 0.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeInput {
    /// Slope height H (m), toe to crest
    pub height_m: f64,

    /// Slope face angle from horizontal (degrees), 0 < beta < 90
    pub slope_angle: Degrees,

    /// Soil unit weight gamma (kN/m3)
    pub unit_weight: f64,

    /// Cohesion c (kPa)
    pub cohesion: f64,

    /// Friction angle phi (degrees), 0 <= phi < 90
    pub friction_angle: Degrees,

    /// Pore-pressure ratio r_u (0 to 1), 0 = dry slope
    #[serde(default)]
    pub ru: f64,

    /// Horizontal seismic coefficient k_h, 0 = static analysis
    #[serde(default)]
    pub kh: f64,
}

impl SlopeInput {
    /// Validate input parameters.
    ///
    /// Rejects anything outside its physically meaningful range; the
    /// engine never silently clamps.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.height_m.is_finite() || self.height_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "height_m",
                self.height_m.to_string(),
                "Slope height must be positive",
            ));
        }
        let beta = self.slope_angle.value();
        if !beta.is_finite() || beta <= 0.0 || beta >= 90.0 {
            return Err(CalcError::invalid_input(
                "slope_angle",
                beta.to_string(),
                "Slope angle must be between 0 and 90 degrees exclusive",
            ));
        }
        if !self.unit_weight.is_finite() || self.unit_weight <= 0.0 {
            return Err(CalcError::invalid_input(
                "unit_weight",
                self.unit_weight.to_string(),
                "Unit weight must be positive",
            ));
        }
        if !self.cohesion.is_finite() || self.cohesion < 0.0 {
            return Err(CalcError::invalid_input(
                "cohesion",
                self.cohesion.to_string(),
                "Cohesion must be zero or positive",
            ));
        }
        let phi = self.friction_angle.value();
        if !phi.is_finite() || phi < 0.0 || phi >= 90.0 {
            return Err(CalcError::invalid_input(
                "friction_angle",
                phi.to_string(),
                "Friction angle must be in [0, 90) degrees",
            ));
        }
        if !self.ru.is_finite() || self.ru < 0.0 || self.ru > 1.0 {
            return Err(CalcError::invalid_input(
                "ru",
                self.ru.to_string(),
                "Pore-pressure ratio must be in [0, 1]",
            ));
        }
        if !self.kh.is_finite() || self.kh < 0.0 || self.kh > 1.0 {
            return Err(CalcError::invalid_input(
                "kh",
                self.kh.to_string(),
                "Seismic coefficient must be in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Horizontal run of the slope face, toe to crest: H / tan(beta)
    pub fn horizontal_run(&self) -> f64 {
        self.height_m / self.slope_angle.tan()
    }

    /// Ground surface elevation at horizontal position x.
    ///
    /// Flat at the toe level left of the toe, the slope face between toe
    /// and crest, flat at the crest level beyond.
    pub fn ground_y(&self, x: f64) -> f64 {
        let run = self.horizontal_run();
        if x <= 0.0 {
            0.0
        } else if x >= run {
            self.height_m
        } else {
            x * self.slope_angle.tan()
        }
    }

    /// Whether this analysis carries pseudo-static seismic load
    pub fn is_seismic(&self) -> bool {
        self.kh > 0.0
    }
}

/// One trial circular failure surface.
///
/// The circle's center and radius wholly determine the candidate slip
/// surface: its lower arc is the slip line, and the soil between arc and
/// ground surface is the sliding mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialCircle {
    /// Circle center in the slope's local frame (m)
    pub center: Point,

    /// Circle radius R (m)
    pub radius: f64,
}

impl TrialCircle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        TrialCircle {
            center: Point { x, y },
            radius,
        }
    }

    /// Validate circle parameters.
    ///
    /// Whether the circle actually intersects the slope profile is decided
    /// later, during discretization, where the ground profile is in hand.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(CalcError::invalid_input(
                "radius",
                self.radius.to_string(),
                "Circle radius must be positive",
            ));
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(CalcError::invalid_input(
                "center",
                format!("({}, {})", self.center.x, self.center.y),
                "Circle center must be finite",
            ));
        }
        Ok(())
    }

    /// Elevation of the lower arc at horizontal position x, or None where
    /// the circle has no vertical extent (|x - xc| > R).
    pub fn arc_y(&self, x: f64) -> Option<f64> {
        let dx = x - self.center.x;
        let under = self.radius * self.radius - dx * dx;
        if under < 0.0 {
            None
        } else {
            Some(self.center.y - under.sqrt())
        }
    }

    /// Signed base inclination at x: alpha = arcsin((x - xc) / R), radians.
    ///
    /// Positive where the arc climbs to the right (downslope side),
    /// negative near the toe entry.
    pub fn base_angle_rad(&self, x: f64) -> f64 {
        ((x - self.center.x) / self.radius).asin()
    }
}
