//! # Angle Units
//!
//! Type-safe wrappers for the one unit confusion that actually bites in
//! this engine: degrees versus radians. Inputs and reported diagnostics
//! use degrees (what engineers type and read); all trigonometry runs in
//! radians, converted once at the boundary.
//!
//! Lengths, forces, and stresses stay as plain `f64` in consistent SI
//! units (m, kN/m, kPa, kN/m3) so JSON serialization remains bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use slope_core::units::{Degrees, Radians};
//!
//! let beta = Degrees(30.0);
//! let rad: Radians = beta.into();
//! assert!((rad.0 - std::f64::consts::FRAC_PI_6).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Degrees {
    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians as a bare f64, for use inside trig-heavy loops
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Tangent of the angle
    pub fn tan(self) -> f64 {
        self.0.to_radians().tan()
    }
}

impl Radians {
    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }
}
