//! # Error Types
//!
//! Structured error types for slope_core. Every failure the engine can
//! report crosses the boundary as a `CalcError` value - never as a panic -
//! so callers (web layer, CLI, tests) can handle conditions programmatically.
//!
//! ## Example
//!
//! ```rust
//! use slope_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_m: f64) -> CalcResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "height_m",
//!             height_m.to_string(),
//!             "Slope height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for slope_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for slope stability calculations.
///
/// Each variant carries enough context to understand and fix the problem
/// without re-running the analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its physically meaningful range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A trial circle does not form a usable failure surface for this slope
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// The equilibrium equation degenerates (driving force near zero,
    /// collapsing m-alpha, or a non-positive factor of safety)
    #[error("Degenerate surface: {reason}")]
    DegenerateSurface { reason: String },

    /// The critical-surface search examined its whole candidate grid
    /// without finding a single valid circle
    #[error("No valid failure surface found ({candidates_examined} candidates examined)")]
    NoCriticalSurface { candidates_examined: usize },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Create a DegenerateSurface error
    pub fn degenerate_surface(reason: impl Into<String>) -> Self {
        CalcError::DegenerateSurface {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::DegenerateSurface { .. } => "DEGENERATE_SURFACE",
            CalcError::NoCriticalSurface { .. } => "NO_CRITICAL_SURFACE",
        }
    }

    /// True for conditions that reject one candidate surface without
    /// invalidating the slope input itself. The critical-surface search
    /// skips these and moves on to the next circle.
    pub fn is_surface_rejection(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidGeometry { .. } | CalcError::DegenerateSurface { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("height_m", "-5.0", "Slope height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_geometry("too few slices").error_code(),
            "INVALID_GEOMETRY"
        );
        assert_eq!(
            CalcError::NoCriticalSurface {
                candidates_examined: 960
            }
            .error_code(),
            "NO_CRITICAL_SURFACE"
        );
    }

    #[test]
    fn test_surface_rejection_classification() {
        assert!(CalcError::invalid_geometry("x").is_surface_rejection());
        assert!(CalcError::degenerate_surface("x").is_surface_rejection());
        assert!(!CalcError::invalid_input("f", "v", "r").is_surface_rejection());
    }
}
