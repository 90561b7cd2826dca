//! # slope_core - Slope-Stability Limit-Equilibrium Engine
//!
//! `slope_core` is the computational heart of Slopecalc: method-of-slices
//! stability analysis for slope cross-sections, with a critical-surface
//! search over trial circle geometry. All inputs and outputs are
//! JSON-serializable plain records, making the crate easy to sit behind a
//! web layer, a CLI, or an AI-assistant protocol.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results;
//!   nothing lives beyond one call
//! - **JSON-First**: All contract types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Bounded**: Every iteration carries a cap, every search a budget
//!
//! ## Quick Start
//!
//! ```rust
//! use slope_core::{find_critical_surface, Method, SearchConfig, SlopeInput};
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
//! let result = find_critical_surface(&slope, Method::Bishop, &SearchConfig::default()).unwrap();
//! println!("FS = {} ({})", result.fs, result.status_label);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Slope cross-section, trial circles, ground profile
//! - [`slices`] - Discretization into vertical slices and per-slice forces
//! - [`equilibrium`] - Fellenius, Bishop, and Janbu solvers
//! - [`search`] - Critical-surface search over a candidate circle grid
//! - [`results`] - Output contract and stability classification
//! - [`units`] - Degree/radian newtypes
//! - [`errors`] - Structured error types

pub mod equilibrium;
pub mod errors;
pub mod geometry;
pub mod results;
pub mod search;
pub mod slices;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use equilibrium::{analyze_circle, analyze_circle_with_slices, Method};
pub use errors::{CalcError, CalcResult};
pub use geometry::{Point, SlopeInput, TrialCircle};
pub use results::{SlopeResult, StabilityStatus};
pub use search::{find_critical_surface, SearchConfig};
